//! Hand-built molecules for unit tests. Heavy atoms come first, then explicit
//! hydrogens appended heavy atom by heavy atom, the numbering toolkits use
//! after adding explicit hydrogens.

use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::mol::Mol;

pub(crate) fn build(atoms: &[Atom], bonds: &[(usize, usize, BondOrder)]) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    for atom in atoms {
        mol.add_atom(atom.clone());
    }
    for &(a, b, order) in bonds {
        mol.add_bond(NodeIndex::new(a), NodeIndex::new(b), Bond::new(order));
    }
    mol
}

pub(crate) fn with_hydrogens(
    heavy: &[Atom],
    bonds: &[(usize, usize, BondOrder)],
    hydrogens: &[u8],
) -> Mol<Atom, Bond> {
    let mut mol = build(heavy, bonds);
    for (i, &count) in hydrogens.iter().enumerate() {
        for _ in 0..count {
            let h = mol.add_atom(Atom::new(1));
            mol.add_bond(NodeIndex::new(i), h, Bond::default());
        }
    }
    mol
}

fn single(pairs: &[(usize, usize)]) -> Vec<(usize, usize, BondOrder)> {
    pairs
        .iter()
        .map(|&(a, b)| (a, b, BondOrder::Single))
        .collect()
}

/// C0-C1, H2..H4 on C0, H5..H7 on C1.
pub(crate) fn ethane() -> Mol<Atom, Bond> {
    with_hydrogens(&[Atom::new(6), Atom::new(6)], &single(&[(0, 1)]), &[3, 3])
}

/// C0-C1-C2, H3..H5 on C0, H6 and H7 on C1, H8..H10 on C2.
pub(crate) fn propane() -> Mol<Atom, Bond> {
    with_hydrogens(
        &[Atom::new(6), Atom::new(6), Atom::new(6)],
        &single(&[(0, 1), (1, 2)]),
        &[3, 2, 3],
    )
}

/// Three-membered carbon ring, H3 and H4 on C0, H5 and H6 on C1, H7 and H8 on C2.
pub(crate) fn cyclopropane() -> Mol<Atom, Bond> {
    with_hydrogens(
        &[Atom::new(6), Atom::new(6), Atom::new(6)],
        &single(&[(0, 1), (1, 2), (2, 0)]),
        &[2, 2, 2],
    )
}

/// Kekulé benzene with aromatic atoms, H6..H11 on C0..C5.
pub(crate) fn benzene() -> Mol<Atom, Bond> {
    let bonds: Vec<_> = (0..6)
        .map(|i| {
            let order = if i % 2 == 0 {
                BondOrder::Double
            } else {
                BondOrder::Single
            };
            (i, (i + 1) % 6, order)
        })
        .collect();
    with_hydrogens(&vec![Atom::aromatic(6); 6], &bonds, &[1; 6])
}

/// CH3-NH3+, H2..H4 on C0, H5..H7 on N1.
pub(crate) fn methylammonium() -> Mol<Atom, Bond> {
    let nitrogen = Atom {
        atomic_num: 7,
        formal_charge: 1,
        ..Atom::default()
    };
    with_hydrogens(&[Atom::new(6), nitrogen], &single(&[(0, 1)]), &[3, 3])
}
