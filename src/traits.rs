use crate::bond::BondOrder;

pub trait HasAtomicNum {
    fn atomic_num(&self) -> u8;
}

pub trait HasFormalCharge {
    fn formal_charge(&self) -> i8;
}

pub trait HasHydrogenCount {
    fn hydrogen_count(&self) -> u8;
}

pub trait HasAromaticity {
    fn is_aromatic(&self) -> bool;
}

pub trait HasBondOrder {
    fn bond_order(&self) -> BondOrder;
}

/// Everything the decorator extractor reads from an atom.
pub trait AtomProperties: HasAtomicNum + HasFormalCharge + HasHydrogenCount + HasAromaticity {}

impl<T> AtomProperties for T where T: HasAtomicNum + HasFormalCharge + HasHydrogenCount + HasAromaticity {}

/// Everything the decorator extractor reads from a bond.
pub trait BondProperties: HasBondOrder {}

impl<T> BondProperties for T where T: HasBondOrder {}
