use std::collections::VecDeque;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::mol::Mol;

/// Ring membership of every atom and bond of one molecule.
///
/// A bond is a ring bond when its endpoints remain connected after the bond
/// is removed. The smallest ring of an atom is the shortest cycle through
/// it, found as the shortest detour around one of its ring bonds.
#[derive(Debug, Clone)]
pub struct RingInfo {
    /// Smallest cycle through each bond, `None` for chain bonds.
    bond_cycle: Vec<Option<usize>>,
    /// Smallest cycle through each atom, `None` for acyclic atoms.
    atom_cycle: Vec<Option<usize>>,
    ring_bond_counts: Vec<u8>,
}

impl RingInfo {
    pub fn perceive<A, B>(mol: &Mol<A, B>) -> Self {
        let mut bond_cycle = vec![None; mol.bond_count()];
        for bond in mol.bonds() {
            let Some((u, v)) = mol.bond_endpoints(bond) else {
                continue;
            };
            bond_cycle[bond.index()] = shortest_detour(mol, bond, u, v).map(|d| d + 1);
        }

        let mut atom_cycle = vec![None; mol.atom_count()];
        let mut ring_bond_counts = vec![0u8; mol.atom_count()];
        for atom in mol.atoms() {
            for bond in mol.bonds_of(atom) {
                if let Some(size) = bond_cycle[bond.index()] {
                    ring_bond_counts[atom.index()] += 1;
                    let slot: &mut Option<usize> = &mut atom_cycle[atom.index()];
                    *slot = Some(slot.map_or(size, |s| s.min(size)));
                }
            }
        }

        Self {
            bond_cycle,
            atom_cycle,
            ring_bond_counts,
        }
    }

    pub fn is_ring_bond(&self, bond: EdgeIndex) -> bool {
        self.bond_cycle
            .get(bond.index())
            .is_some_and(|c| c.is_some())
    }

    pub fn is_ring_atom(&self, atom: NodeIndex) -> bool {
        self.smallest_ring_size(atom).is_some()
    }

    pub fn smallest_ring_size(&self, atom: NodeIndex) -> Option<usize> {
        self.atom_cycle.get(atom.index()).copied().flatten()
    }

    pub fn smallest_bond_ring_size(&self, bond: EdgeIndex) -> Option<usize> {
        self.bond_cycle.get(bond.index()).copied().flatten()
    }

    pub fn ring_bond_count(&self, atom: NodeIndex) -> u8 {
        self.ring_bond_counts.get(atom.index()).copied().unwrap_or(0)
    }

    pub fn num_ring_bonds(&self) -> usize {
        self.bond_cycle.iter().filter(|c| c.is_some()).count()
    }
}

/// Length of the shortest path from `from` to `to` that does not use `skip`.
fn shortest_detour<A, B>(
    mol: &Mol<A, B>,
    skip: EdgeIndex,
    from: NodeIndex,
    to: NodeIndex,
) -> Option<usize> {
    let mut dist = vec![usize::MAX; mol.atom_count()];
    dist[from.index()] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(from);
    while let Some(cur) = queue.pop_front() {
        let d = dist[cur.index()];
        for bond in mol.bonds_of(cur) {
            if bond == skip {
                continue;
            }
            let Some(nb) = mol.other_atom(bond, cur) else {
                continue;
            };
            if dist[nb.index()] != usize::MAX {
                continue;
            }
            if nb == to {
                return Some(d + 1);
            }
            dist[nb.index()] = d + 1;
            queue.push_back(nb);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::{Bond, BondOrder};
    use crate::testing::{benzene, build, cyclopropane, propane};
    use crate::Atom;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn cyclopropane_ring() {
        let mol = cyclopropane();
        let ri = RingInfo::perceive(&mol);
        for i in 0..3 {
            assert_eq!(ri.smallest_ring_size(n(i)), Some(3));
            assert_eq!(ri.ring_bond_count(n(i)), 2);
        }
        for h in 3..9 {
            assert!(!ri.is_ring_atom(n(h)), "hydrogen {h} should be acyclic");
        }
        assert_eq!(ri.num_ring_bonds(), 3);
    }

    #[test]
    fn propane_acyclic() {
        let mol = propane();
        let ri = RingInfo::perceive(&mol);
        assert_eq!(ri.num_ring_bonds(), 0);
        assert!(mol.atoms().all(|a| ri.smallest_ring_size(a).is_none()));
    }

    #[test]
    fn benzene_ring_bonds() {
        let mol = benzene();
        let ri = RingInfo::perceive(&mol);
        for i in 0..6 {
            let j = (i + 1) % 6;
            let bond = mol.bond_between(n(i), n(j)).unwrap();
            assert!(ri.is_ring_bond(bond), "bond {i}-{j} should be in ring");
            assert_eq!(ri.smallest_bond_ring_size(bond), Some(6));
        }
        let ch = mol.bond_between(n(0), n(6)).unwrap();
        assert!(!ri.is_ring_bond(ch));
    }

    #[test]
    fn fused_three_and_four_rings() {
        // 0-1-2 triangle sharing the 0-1 edge with the 0-3-4-1 square.
        let bonds: Vec<_> = [(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 1)]
            .into_iter()
            .map(|(a, b)| (a, b, BondOrder::Single))
            .collect();
        let mol = build(&vec![Atom::new(6); 5], &bonds);
        let ri = RingInfo::perceive(&mol);
        assert_eq!(ri.smallest_ring_size(n(0)), Some(3));
        assert_eq!(ri.smallest_ring_size(n(3)), Some(4));
        assert_eq!(ri.ring_bond_count(n(0)), 3);
        let shared = mol.bond_between(n(0), n(1)).unwrap();
        assert_eq!(ri.smallest_bond_ring_size(shared), Some(3));
    }

    #[test]
    fn bridge_between_rings_is_chain_bond() {
        let mut mol = Mol::<Atom, Bond>::new();
        let atoms: Vec<_> = (0..6).map(|_| mol.add_atom(Atom::new(6))).collect();
        for (a, b) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
            mol.add_bond(atoms[a], atoms[b], Bond::default());
        }
        let bridge = mol.add_bond(atoms[2], atoms[3], Bond::default());
        let ri = RingInfo::perceive(&mol);
        assert!(!ri.is_ring_bond(bridge));
        assert_eq!(ri.ring_bond_count(atoms[2]), 2);
        assert_eq!(ri.num_ring_bonds(), 6);
    }
}
