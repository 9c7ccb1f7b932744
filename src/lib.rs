pub mod atom;
pub mod bond;
pub mod cluster;
pub mod config;
pub mod decorators;
pub mod error;
pub mod matcher;
pub mod mol;
pub mod perception;
pub mod rings;
pub mod smirks;
pub mod traits;

pub use atom::Atom;
pub use bond::{Bond, BondOrder};
pub use cluster::{
    build_cluster_graph, build_cluster_graph_with, build_clusters, ClusterGraph, ClusterMatches,
    SlotId, SlotKey,
};
pub use config::{BuildOptions, DecoratorConfig, Layers};
pub use decorators::{AtomDecorators, BondDecorators, BondKind, DecoratorTuple, RingMembership};
pub use error::{ClusterError, ClusterResult, ErrorKind};
pub use matcher::{collect_matches, Matcher};
pub use mol::Mol;
pub use perception::PerceivedMol;
pub use rings::RingInfo;
pub use smirks::to_smirks;
pub use traits::{
    AtomProperties, BondProperties, HasAromaticity, HasAtomicNum, HasBondOrder, HasFormalCharge,
    HasHydrogenCount,
};

#[cfg(test)]
mod testing;
