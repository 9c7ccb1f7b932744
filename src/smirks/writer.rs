use std::collections::HashSet;

use crate::cluster::{ClusterGraph, SlotId, SlotKey};

use super::compress::write_or_list;

pub fn to_smirks(graph: &ClusterGraph, compress: bool) -> String {
    let n = graph.slot_count();
    if n == 0 {
        return String::new();
    }

    let neighbor_lists: Vec<Vec<SlotId>> = graph
        .slots()
        .map(|slot| {
            let mut nbs = graph.neighbors(slot).to_vec();
            nbs.sort_by_key(|&nb| visit_key(graph.slot_key(nb)));
            nbs
        })
        .collect();

    let mut visited = vec![false; n];
    let mut parts = Vec::new();
    for index in 1..=graph.arity() {
        let Some(root) = graph.tagged_slot(index) else {
            continue;
        };
        if visited[root.index()] {
            continue;
        }
        parts.push(write_component(graph, root, &neighbor_lists, &mut visited, compress));
    }
    parts.join(".")
}

/// Layer children first by rank, tagged neighbours after by index, so the
/// chain through the tagged slots is the one written unwrapped. The full key
/// breaks ties between layer slots grown from different tagged slots.
fn visit_key(key: &SlotKey) -> (u8, usize, &SlotKey) {
    match key {
        SlotKey::Layer { path, .. } => (0, path.last().copied().unwrap_or(0), key),
        SlotKey::Tagged(index) => (1, *index, key),
    }
}

struct Tree {
    children: Vec<Vec<SlotId>>,
    ring_opens: Vec<Vec<(usize, SlotId)>>,
    ring_closes: Vec<Vec<(usize, SlotId)>>,
}

fn write_component(
    graph: &ClusterGraph,
    start: SlotId,
    neighbor_lists: &[Vec<SlotId>],
    visited: &mut [bool],
    compress: bool,
) -> String {
    let n = graph.slot_count();
    let mut parent = vec![None::<SlotId>; n];
    let mut tree = Tree {
        children: vec![Vec::new(); n],
        ring_opens: vec![Vec::new(); n],
        ring_closes: vec![Vec::new(); n],
    };
    let mut closed: HashSet<(SlotId, SlotId)> = HashSet::new();
    let mut next_ring_id: usize = 1;

    let mut stack: Vec<(SlotId, usize)> = Vec::new();
    visited[start.index()] = true;
    stack.push((start, 0));

    loop {
        let Some(&mut (node, ref mut ni)) = stack.last_mut() else {
            break;
        };
        let neighbors = &neighbor_lists[node.index()];
        if *ni >= neighbors.len() {
            stack.pop();
            continue;
        }
        let neighbor = neighbors[*ni];
        *ni += 1;

        if !visited[neighbor.index()] {
            visited[neighbor.index()] = true;
            parent[neighbor.index()] = Some(node);
            tree.children[node.index()].push(neighbor);
            stack.push((neighbor, 0));
        } else if parent[node.index()] != Some(neighbor) {
            let edge = if node < neighbor {
                (node, neighbor)
            } else {
                (neighbor, node)
            };
            if closed.insert(edge) {
                // First seen from the deeper end; the ancestor opens the ring.
                tree.ring_opens[neighbor.index()].push((next_ring_id, node));
                tree.ring_closes[node.index()].push((next_ring_id, neighbor));
                next_ring_id += 1;
            }
        }
    }

    let mut out = String::new();
    write_node(graph, start, &tree, compress, &mut out);
    out
}

fn write_node(graph: &ClusterGraph, node: SlotId, tree: &Tree, compress: bool, out: &mut String) {
    write_atom(graph, node, compress, out);

    for &(ring_id, other) in tree.ring_opens[node.index()]
        .iter()
        .chain(&tree.ring_closes[node.index()])
    {
        write_bond(graph, node, other, compress, out);
        write_ring_digit(ring_id, out);
    }

    let kids = &tree.children[node.index()];
    if kids.is_empty() {
        return;
    }

    let last = kids.len() - 1;
    for (i, &child) in kids.iter().enumerate() {
        let is_branch = i < last;
        if is_branch {
            out.push('(');
        }
        write_bond(graph, node, child, compress, out);
        write_node(graph, child, tree, compress, out);
        if is_branch {
            out.push(')');
        }
    }
}

fn write_atom(graph: &ClusterGraph, slot: SlotId, compress: bool, out: &mut String) {
    out.push('[');
    write_or_list(graph.atom_decorators(slot), compress, out);
    if let SlotKey::Tagged(index) = graph.slot_key(slot) {
        out.push(':');
        out.push_str(&index.to_string());
    }
    out.push(']');
}

fn write_bond(graph: &ClusterGraph, a: SlotId, b: SlotId, compress: bool, out: &mut String) {
    if let Some(set) = graph.bond_decorators(a, b) {
        write_or_list(set, compress, out);
    }
}

fn write_ring_digit(id: usize, out: &mut String) {
    if id <= 9 {
        out.push(char::from(b'0' + id as u8));
    } else {
        out.push('%');
        out.push_str(&id.to_string());
    }
}
