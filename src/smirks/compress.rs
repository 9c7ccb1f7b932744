use std::collections::BTreeSet;

use crate::decorators::DecoratorTuple;

/// Writes a descriptor set as an OR-list of fully ANDed tuples.
///
/// With `compress`, every category on which all tuples agree is written
/// once as a leading `;` clause and dropped from the branches. Sets of one
/// tuple are always written plain.
pub fn write_or_list<T: DecoratorTuple>(set: &BTreeSet<T>, compress: bool, out: &mut String) {
    let rows: Vec<Vec<String>> = set.iter().map(DecoratorTuple::primitives).collect();
    if !compress || rows.len() < 2 {
        write_branches(&rows, |_| true, out);
        return;
    }

    let width = rows[0].len();
    let shared: Vec<bool> = (0..width)
        .map(|c| rows.iter().all(|row| row[c] == rows[0][c]))
        .collect();

    for (c, primitive) in rows[0].iter().enumerate() {
        if shared[c] && !primitive.is_empty() {
            out.push_str(primitive);
            out.push(';');
        }
    }
    write_branches(&rows, |c| !shared[c], out);
}

fn write_branches(rows: &[Vec<String>], keep: impl Fn(usize) -> bool, out: &mut String) {
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        for (c, primitive) in row.iter().enumerate() {
            if keep(c) {
                out.push_str(primitive);
            }
        }
    }
}
