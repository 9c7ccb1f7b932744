//! Decorator tuples: the per-atom and per-bond chemical descriptors a
//! cluster pattern is assembled from.
//!
//! Field order is the canonical category order. It drives the derived
//! `Ord`, the rendering order of primitives, and the order in which the
//! compressor pulls shared categories out of an OR-list.

use std::fmt;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::bond::BondOrder;
use crate::config::DecoratorConfig;
use crate::perception::PerceivedMol;
use crate::traits::{AtomProperties, BondProperties};

/// Ring membership of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RingMembership {
    /// Not in any ring (`!r`).
    Acyclic,
    /// Smallest containing ring has this many atoms (`r3`, `r6`, …).
    Smallest(u8),
}

/// Descriptors of one concrete atom in one occurrence.
///
/// `None` marks a category that was not recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomDecorators {
    /// Atomic number; `None` renders as the wildcard `*`.
    pub element: Option<u8>,
    pub aromatic: Option<bool>,
    /// Total attached hydrogens (`H`).
    pub hydrogens: Option<u8>,
    /// Explicit connectivity including hydrogens (`X`).
    pub connectivity: Option<u8>,
    pub ring: Option<RingMembership>,
    /// Ring bonds on the atom (`x`).
    pub ring_bonds: Option<u8>,
    pub charge: Option<i8>,
}

/// Bond order as written in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondKind {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondKind {
    pub fn symbol(self) -> char {
        match self {
            BondKind::Single => '-',
            BondKind::Double => '=',
            BondKind::Triple => '#',
            BondKind::Aromatic => ':',
        }
    }
}

/// Descriptors of one concrete bond in one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BondDecorators {
    /// `None` renders as the any-bond `~`.
    pub order: Option<BondKind>,
    pub in_ring: Option<bool>,
}

/// A decorator tuple that can be split into per-category primitive strings.
///
/// `primitives` always returns one entry per category in canonical order;
/// an unrecorded category yields an empty string unless it has a wildcard
/// spelling.
pub trait DecoratorTuple: Ord + Clone + fmt::Display {
    fn primitives(&self) -> Vec<String>;
}

impl DecoratorTuple for AtomDecorators {
    fn primitives(&self) -> Vec<String> {
        vec![
            match self.element {
                Some(z) => format!("#{z}"),
                None => "*".to_string(),
            },
            match self.aromatic {
                Some(true) => "a".to_string(),
                Some(false) => "A".to_string(),
                None => String::new(),
            },
            self.hydrogens.map(|h| format!("H{h}")).unwrap_or_default(),
            self.connectivity.map(|x| format!("X{x}")).unwrap_or_default(),
            match self.ring {
                Some(RingMembership::Acyclic) => "!r".to_string(),
                Some(RingMembership::Smallest(size)) => format!("r{size}"),
                None => String::new(),
            },
            self.ring_bonds.map(|x| format!("x{x}")).unwrap_or_default(),
            self.charge.map(format_charge).unwrap_or_default(),
        ]
    }
}

impl DecoratorTuple for BondDecorators {
    fn primitives(&self) -> Vec<String> {
        vec![
            self.order.map_or('~', BondKind::symbol).to_string(),
            match self.in_ring {
                Some(true) => "@".to_string(),
                Some(false) => "!@".to_string(),
                None => String::new(),
            },
        ]
    }
}

fn format_charge(charge: i8) -> String {
    if charge >= 0 {
        format!("+{charge}")
    } else {
        format!("-{}", charge.unsigned_abs())
    }
}

impl fmt::Display for AtomDecorators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for primitive in self.primitives() {
            f.write_str(&primitive)?;
        }
        Ok(())
    }
}

impl fmt::Display for BondDecorators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for primitive in self.primitives() {
            f.write_str(&primitive)?;
        }
        Ok(())
    }
}

/// Extracts the decorators of atom `idx`.
///
/// # Panics
///
/// Panics if `idx` is not an atom of `mol`; callers validate occurrence
/// indices before extraction.
pub fn atom_decorators<A, B>(
    mol: &PerceivedMol<'_, A, B>,
    idx: NodeIndex,
    config: &DecoratorConfig,
) -> AtomDecorators
where
    A: AtomProperties,
    B: BondProperties,
{
    AtomDecorators {
        element: config.element.then(|| mol.atomic_number(idx)),
        aromatic: config.aromaticity.then(|| mol.is_aromatic(idx)),
        hydrogens: config.hydrogen_count.then(|| mol.hydrogen_count(idx)),
        connectivity: config.connectivity.then(|| mol.connectivity(idx)),
        ring: config.ring_size.then(|| match mol.min_ring_size(idx) {
            Some(size) => RingMembership::Smallest(size.min(u8::MAX as usize) as u8),
            None => RingMembership::Acyclic,
        }),
        ring_bonds: config.ring_bond_count.then(|| mol.ring_connectivity(idx)),
        charge: config.charge.then(|| mol.formal_charge(idx)),
    }
}

/// Extracts the decorators of bond `bond`.
///
/// # Panics
///
/// Panics if `bond` is not a bond of `mol`.
pub fn bond_decorators<A, B>(
    mol: &PerceivedMol<'_, A, B>,
    bond: EdgeIndex,
    config: &DecoratorConfig,
) -> BondDecorators
where
    A: AtomProperties,
    B: BondProperties,
{
    let order = if mol.is_aromatic_bond(bond) {
        BondKind::Aromatic
    } else {
        match mol.bond_order(bond) {
            BondOrder::Single => BondKind::Single,
            BondOrder::Double => BondKind::Double,
            BondOrder::Triple => BondKind::Triple,
        }
    };
    BondDecorators {
        order: config.bond_order.then_some(order),
        in_ring: config.bond_ring.then(|| mol.is_ring_bond(bond)),
    }
}
