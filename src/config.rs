use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClusterError;

/// How far beyond the tagged atoms a cluster pattern extends.
///
/// `Depth(0)` keeps only the tagged atoms. `All` expands until every
/// connected component containing a tagged atom is exhausted.
///
/// Deserializes from a non-negative integer or the string `"all"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LayersRepr", into = "LayersRepr")]
pub enum Layers {
    Depth(usize),
    All,
}

impl Layers {
    /// Whether atoms found at `hop` bonds from a tagged atom may be expanded
    /// one bond further.
    pub fn expands_beyond(self, hop: usize) -> bool {
        match self {
            Layers::Depth(depth) => hop < depth,
            Layers::All => true,
        }
    }
}

impl Default for Layers {
    fn default() -> Self {
        Layers::Depth(0)
    }
}

impl From<usize> for Layers {
    fn from(depth: usize) -> Self {
        Layers::Depth(depth)
    }
}

impl FromStr for Layers {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Layers::All);
        }
        trimmed
            .parse::<usize>()
            .map(Layers::Depth)
            .map_err(|_| ClusterError::InvalidLayers(s.to_string()))
    }
}

impl fmt::Display for Layers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layers::Depth(depth) => write!(f, "{depth}"),
            Layers::All => f.write_str("all"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LayersRepr {
    Depth(i64),
    Named(String),
}

impl TryFrom<LayersRepr> for Layers {
    type Error = ClusterError;

    fn try_from(repr: LayersRepr) -> Result<Self, Self::Error> {
        match repr {
            LayersRepr::Depth(depth) => usize::try_from(depth)
                .map(Layers::Depth)
                .map_err(|_| ClusterError::InvalidLayers(depth.to_string())),
            LayersRepr::Named(name) => name.parse(),
        }
    }
}

impl From<Layers> for LayersRepr {
    fn from(layers: Layers) -> Self {
        match layers {
            Layers::Depth(depth) => LayersRepr::Depth(i64::try_from(depth).unwrap_or(i64::MAX)),
            Layers::All => LayersRepr::Named("all".to_string()),
        }
    }
}

/// Which decorator categories are recorded per atom and bond.
///
/// A category switched off is left out of every decorator tuple; an
/// unrecorded element is written as the wildcard `*` and an unrecorded bond
/// order as `~`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoratorConfig {
    pub element: bool,
    pub aromaticity: bool,
    pub hydrogen_count: bool,
    pub connectivity: bool,
    pub ring_size: bool,
    pub ring_bond_count: bool,
    pub charge: bool,
    pub bond_order: bool,
    pub bond_ring: bool,
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        Self {
            element: true,
            aromaticity: true,
            hydrogen_count: true,
            connectivity: true,
            ring_size: true,
            ring_bond_count: true,
            charge: true,
            bond_order: true,
            bond_ring: true,
        }
    }
}

/// Parameters of one cluster build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub layers: Layers,
    pub decorators: DecoratorConfig,
}

impl BuildOptions {
    pub fn with_layers(layers: Layers) -> Self {
        Self {
            layers,
            ..Self::default()
        }
    }
}
