use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::bond::BondOrder;
use crate::mol::Mol;
use crate::rings::RingInfo;
use crate::traits::{AtomProperties, BondProperties};

/// A molecule bundled with its perceived ring information.
///
/// Every graph-dependent atom or bond property the decorator extractor needs
/// is answered here. Ring perception runs once in [`PerceivedMol::new`], so
/// one `PerceivedMol` should be shared by every cluster built over the same
/// molecule.
///
/// Index arguments must belong to the molecule; like [`Mol::atom`], the
/// queries panic otherwise.
pub struct PerceivedMol<'a, A, B> {
    mol: &'a Mol<A, B>,
    rings: RingInfo,
}

impl<'a, A, B> PerceivedMol<'a, A, B>
where
    A: AtomProperties,
    B: BondProperties,
{
    pub fn new(mol: &'a Mol<A, B>) -> Self {
        Self {
            rings: RingInfo::perceive(mol),
            mol,
        }
    }

    pub fn mol(&self) -> &'a Mol<A, B> {
        self.mol
    }

    pub fn rings(&self) -> &RingInfo {
        &self.rings
    }

    pub fn atom_count(&self) -> usize {
        self.mol.atom_count()
    }

    pub fn atomic_number(&self, idx: NodeIndex) -> u8 {
        self.mol.atom(idx).atomic_num()
    }

    pub fn formal_charge(&self, idx: NodeIndex) -> i8 {
        self.mol.atom(idx).formal_charge()
    }

    pub fn is_aromatic(&self, idx: NodeIndex) -> bool {
        self.mol.atom(idx).is_aromatic()
    }

    /// Explicit neighbours only.
    pub fn degree(&self, idx: NodeIndex) -> u8 {
        u8::try_from(self.mol.degree(idx)).unwrap_or(u8::MAX)
    }

    /// Degree plus virtual hydrogens (SMARTS `X`).
    pub fn connectivity(&self, idx: NodeIndex) -> u8 {
        self.degree(idx)
            .saturating_add(self.mol.atom(idx).hydrogen_count())
    }

    /// Bond-order sum plus virtual hydrogens (SMARTS `v`).
    pub fn valence(&self, idx: NodeIndex) -> u8 {
        self.mol
            .bonds_of(idx)
            .map(|b| self.mol.bond(b).bond_order().as_u8())
            .fold(self.mol.atom(idx).hydrogen_count(), u8::saturating_add)
    }

    /// Virtual hydrogens plus explicit hydrogen neighbours (SMARTS `H`).
    pub fn hydrogen_count(&self, idx: NodeIndex) -> u8 {
        let explicit = self
            .mol
            .neighbors(idx)
            .filter(|&nb| self.mol.atom(nb).atomic_num() == 1)
            .count();
        u8::try_from(explicit)
            .unwrap_or(u8::MAX)
            .saturating_add(self.mol.atom(idx).hydrogen_count())
    }

    /// Number of ring bonds on the atom (SMARTS `x`).
    pub fn ring_connectivity(&self, idx: NodeIndex) -> u8 {
        self.rings.ring_bond_count(idx)
    }

    pub fn min_ring_size(&self, idx: NodeIndex) -> Option<usize> {
        self.rings.smallest_ring_size(idx)
    }

    pub fn bond_order(&self, bond: EdgeIndex) -> BondOrder {
        self.mol.bond(bond).bond_order()
    }

    pub fn is_ring_bond(&self, bond: EdgeIndex) -> bool {
        self.rings.is_ring_bond(bond)
    }

    /// A ring bond whose endpoints are both aromatic.
    pub fn is_aromatic_bond(&self, bond: EdgeIndex) -> bool {
        let Some((a, b)) = self.mol.bond_endpoints(bond) else {
            return false;
        };
        self.is_ring_bond(bond) && self.is_aromatic(a) && self.is_aromatic(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{benzene, cyclopropane, ethane, methylammonium};
    use crate::{Atom, Bond};

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn methane_like_carbon_of_ethane() {
        let mol = ethane();
        let pm = PerceivedMol::new(&mol);
        assert_eq!(pm.atomic_number(n(0)), 6);
        assert_eq!(pm.degree(n(0)), 4);
        assert_eq!(pm.connectivity(n(0)), 4);
        assert_eq!(pm.valence(n(0)), 4);
        assert_eq!(pm.formal_charge(n(0)), 0);
        assert_eq!(pm.hydrogen_count(n(0)), 3);
        assert_eq!(pm.ring_connectivity(n(0)), 0);
        assert_eq!(pm.min_ring_size(n(0)), None);
        assert!(!pm.is_aromatic(n(0)));
    }

    #[test]
    fn hydrogen_atom_has_no_hydrogens() {
        let mol = ethane();
        let pm = PerceivedMol::new(&mol);
        assert_eq!(pm.hydrogen_count(n(5)), 0);
        assert_eq!(pm.connectivity(n(5)), 1);
    }

    #[test]
    fn virtual_hydrogens_count_toward_h_and_x() {
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom {
            atomic_num: 6,
            hydrogen_count: 3,
            ..Atom::default()
        });
        let o = mol.add_atom(Atom {
            atomic_num: 8,
            hydrogen_count: 1,
            ..Atom::default()
        });
        mol.add_bond(c, o, Bond::default());
        let pm = PerceivedMol::new(&mol);
        assert_eq!(pm.hydrogen_count(c), 3);
        assert_eq!(pm.connectivity(c), 4);
        assert_eq!(pm.degree(c), 1);
        assert_eq!(pm.valence(o), 2);
    }

    #[test]
    fn huge_virtual_hydrogen_counts_saturate() {
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom {
            atomic_num: 6,
            hydrogen_count: u8::MAX - 1,
            ..Atom::default()
        });
        for _ in 0..3 {
            let h = mol.add_atom(Atom::new(1));
            mol.add_bond(c, h, Bond::default());
        }
        let pm = PerceivedMol::new(&mol);
        assert_eq!(pm.degree(c), 3);
        assert_eq!(pm.connectivity(c), u8::MAX);
        assert_eq!(pm.valence(c), u8::MAX);
        assert_eq!(pm.hydrogen_count(c), u8::MAX);
    }

    #[test]
    fn cyclopropane_ring_properties() {
        let mol = cyclopropane();
        let pm = PerceivedMol::new(&mol);
        assert_eq!(pm.min_ring_size(n(1)), Some(3));
        assert_eq!(pm.ring_connectivity(n(1)), 2);
        let cc = mol.bond_between(n(0), n(1)).unwrap();
        assert!(pm.is_ring_bond(cc));
        assert!(!pm.is_aromatic_bond(cc));
        assert_eq!(pm.rings().num_ring_bonds(), 3);
    }

    #[test]
    fn benzene_bonds_are_aromatic() {
        let mol = benzene();
        let pm = PerceivedMol::new(&mol);
        let cc = mol.bond_between(n(2), n(3)).unwrap();
        assert!(pm.is_aromatic_bond(cc));
        assert_eq!(pm.valence(n(0)), 4);
        let ch = mol.bond_between(n(2), n(8)).unwrap();
        assert!(!pm.is_aromatic_bond(ch));
    }

    #[test]
    fn charged_nitrogen() {
        let mol = methylammonium();
        let pm = PerceivedMol::new(&mol);
        assert_eq!(pm.formal_charge(n(1)), 1);
        assert_eq!(pm.hydrogen_count(n(1)), 3);
        assert_eq!(pm.connectivity(n(1)), 4);
    }
}
