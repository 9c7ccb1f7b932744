//! SMIRKS serialization of cluster graphs.
//!
//! Each slot becomes a bracket atom holding the OR-list of its decorator
//! tuples, with a `:n` index tag on tagged slots. Edges become the OR-list
//! of their bond tuples. Decorators inside one tuple are juxtaposed
//! (high-precedence AND), tuples are joined by `,`, and compression hoists
//! shared categories into leading `;` clauses.

mod compress;
mod writer;

pub use compress::write_or_list;
pub use writer::to_smirks;
