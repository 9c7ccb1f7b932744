/// Default atom type for a molecular graph node.
///
/// `Atom` stores the intrinsic properties a cluster pattern is built from.
/// Ring membership, connectivity and total hydrogen count depend on the
/// surrounding graph and are computed by
/// [`PerceivedMol`](crate::PerceivedMol) instead.
///
/// # Examples
///
/// ```
/// use chemcrab_cluster::Atom;
///
/// let carbon = Atom {
///     atomic_num: 6,
///     formal_charge: 0,
///     hydrogen_count: 0,
///     is_aromatic: false,
/// };
/// assert_eq!(carbon.atomic_num, 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …).
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Number of virtual (suppressed) hydrogens on this atom.
    ///
    /// Hydrogens present as graph nodes are not counted here. Force-field
    /// style inputs usually carry every hydrogen explicitly and leave this 0.
    pub hydrogen_count: u8,
    /// Whether this atom is aromatic.
    pub is_aromatic: bool,
}

impl Atom {
    pub fn new(atomic_num: u8) -> Self {
        Self {
            atomic_num,
            ..Self::default()
        }
    }

    pub fn aromatic(atomic_num: u8) -> Self {
        Self {
            atomic_num,
            is_aromatic: true,
            ..Self::default()
        }
    }
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasAromaticity for Atom {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}
