use thiserror::Error;

use crate::cluster::SlotKey;

/// Result type alias for cluster construction.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Broad category of a [`ClusterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid build parameters or inputs that do not line up.
    Configuration,
    /// Occurrences of one cluster have differing tuple lengths.
    ArityMismatch,
    /// Occurrences imply conflicting adjacency among tagged slots.
    TopologyMismatch,
    /// An occurrence refers to atoms its molecule does not have.
    Reference,
}

/// Errors raised while building a [`ClusterGraph`](crate::ClusterGraph).
///
/// Every error is raised at construction time. Occurrence-level variants
/// carry the cluster label, the molecule index and the occurrence index
/// within that molecule so the offending match can be traced upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("invalid layer specification {0:?}: expected a non-negative integer or \"all\"")]
    InvalidLayers(String),

    #[error("cluster {label:?} has no occurrences")]
    EmptyCluster { label: String },

    #[error("cluster {label:?}: {molecules} molecules but {occurrence_lists} occurrence lists")]
    MoleculeCountMismatch {
        label: String,
        molecules: usize,
        occurrence_lists: usize,
    },

    #[error("cluster {label:?}: molecule {molecule} occurrence {occurrence} is empty")]
    EmptyOccurrence {
        label: String,
        molecule: usize,
        occurrence: usize,
    },

    #[error(
        "cluster {label:?}: molecule {molecule} occurrence {occurrence} has {found} atoms, expected {expected}"
    )]
    ArityMismatch {
        label: String,
        molecule: usize,
        occurrence: usize,
        expected: usize,
        found: usize,
    },

    #[error(
        "cluster {label:?}: molecule {molecule} occurrence {occurrence} {}",
        topology_detail(.slots, .bonded)
    )]
    TopologyMismatch {
        label: String,
        molecule: usize,
        occurrence: usize,
        /// The two slots that are linked in one occurrence and not the other.
        slots: (SlotKey, SlotKey),
        /// Whether the offending occurrence has the bond.
        bonded: bool,
    },

    #[error(
        "cluster {label:?}: molecule {molecule} occurrence {occurrence} refers to atom {atom}, molecule has {atom_count} atoms"
    )]
    AtomOutOfRange {
        label: String,
        molecule: usize,
        occurrence: usize,
        atom: usize,
        atom_count: usize,
    },

    #[error("cluster {label:?}: molecule {molecule} occurrence {occurrence} repeats atom {atom}")]
    DuplicateAtom {
        label: String,
        molecule: usize,
        occurrence: usize,
        atom: usize,
    },
}

fn topology_detail(slots: &(SlotKey, SlotKey), bonded: &bool) -> String {
    let verb = if *bonded { "bonds" } else { "does not bond" };
    format!(
        "{verb} slots {} and {}, unlike earlier occurrences",
        slots.0, slots.1
    )
}

impl ClusterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLayers(_) | Self::EmptyCluster { .. } | Self::MoleculeCountMismatch { .. } => {
                ErrorKind::Configuration
            }
            Self::EmptyOccurrence { .. } | Self::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            Self::TopologyMismatch { .. } => ErrorKind::TopologyMismatch,
            Self::AtomOutOfRange { .. } | Self::DuplicateAtom { .. } => ErrorKind::Reference,
        }
    }
}
