//! Cluster graphs: one generalized pattern graph assembled from every
//! occurrence of a cluster.

mod align;
mod builder;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::config::{BuildOptions, Layers};
use crate::decorators::{AtomDecorators, BondDecorators};
use crate::error::{ClusterError, ClusterResult};
use crate::mol::Mol;
use crate::perception::PerceivedMol;
use crate::smirks;
use crate::traits::{AtomProperties, BondProperties};

pub use align::{SlotId, SlotKey};

use align::SlotArena;
use builder::GraphBuilder;

/// Per-label occurrences: for every cluster label, one list of atom-index
/// tuples per molecule, aligned with the molecule list.
pub type ClusterMatches = BTreeMap<String, Vec<Vec<Vec<usize>>>>;

pub(crate) fn edge_key(a: SlotId, b: SlotId) -> (SlotId, SlotId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The generalized pattern graph of one cluster.
///
/// Every slot and edge carries the deduplicated set of decorator tuples
/// contributed by the occurrences that reach it. The graph is immutable once
/// built; serialization only reads it, so a graph can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct ClusterGraph {
    label: String,
    arity: usize,
    layers: Layers,
    keys: Vec<SlotKey>,
    lookup: HashMap<SlotKey, SlotId>,
    atoms: Vec<BTreeSet<AtomDecorators>>,
    bonds: BTreeMap<(SlotId, SlotId), BTreeSet<BondDecorators>>,
    adjacency: Vec<Vec<SlotId>>,
    occurrences: usize,
}

impl ClusterGraph {
    pub(crate) fn from_parts(
        label: String,
        arity: usize,
        layers: Layers,
        arena: SlotArena,
        atoms: Vec<BTreeSet<AtomDecorators>>,
        bonds: BTreeMap<(SlotId, SlotId), BTreeSet<BondDecorators>>,
        occurrences: usize,
    ) -> Self {
        let (keys, lookup) = arena.into_parts();
        let mut adjacency = vec![Vec::new(); keys.len()];
        for &(a, b) in bonds.keys() {
            adjacency[a.index()].push(b);
            adjacency[b.index()].push(a);
        }
        Self {
            label,
            arity,
            layers,
            keys,
            lookup,
            atoms,
            bonds,
            adjacency,
            occurrences,
        }
    }

    /// Builds the graph of one cluster over already perceived molecules.
    ///
    /// `occurrences[m]` lists the atom tuples matched in `molecules[m]`.
    pub fn from_perceived<A, B>(
        label: &str,
        molecules: &[PerceivedMol<'_, A, B>],
        occurrences: &[Vec<Vec<usize>>],
        options: &BuildOptions,
    ) -> ClusterResult<Self>
    where
        A: AtomProperties,
        B: BondProperties,
    {
        if molecules.len() != occurrences.len() {
            return Err(ClusterError::MoleculeCountMismatch {
                label: label.to_string(),
                molecules: molecules.len(),
                occurrence_lists: occurrences.len(),
            });
        }

        let mut builder = GraphBuilder::new(label.to_string(), options);
        for (molecule, (mol, tuples)) in molecules.iter().zip(occurrences).enumerate() {
            for (occurrence, atoms) in tuples.iter().enumerate() {
                builder.add_occurrence(mol, molecule, occurrence, atoms)?;
            }
        }
        let graph = builder.finish()?;
        debug!(
            label,
            arity = graph.arity,
            slots = graph.slot_count(),
            edges = graph.bonds.len(),
            occurrences = graph.occurrences,
            layers = %graph.layers,
            "built cluster graph"
        );
        Ok(graph)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of tagged slots.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn layers(&self) -> Layers {
        self.layers
    }

    pub fn occurrence_count(&self) -> usize {
        self.occurrences
    }

    pub fn slot_count(&self) -> usize {
        self.keys.len()
    }

    pub fn slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        (0..self.keys.len()).map(SlotId::new)
    }

    pub fn slot_key(&self, slot: SlotId) -> &SlotKey {
        &self.keys[slot.index()]
    }

    pub fn slot_by_key(&self, key: &SlotKey) -> Option<SlotId> {
        self.lookup.get(key).copied()
    }

    /// Slot of tuple position `index` (1-based).
    pub fn tagged_slot(&self, index: usize) -> Option<SlotId> {
        self.slot_by_key(&SlotKey::Tagged(index))
    }

    pub fn neighbors(&self, slot: SlotId) -> &[SlotId] {
        &self.adjacency[slot.index()]
    }

    pub fn atom_decorators(&self, slot: SlotId) -> &BTreeSet<AtomDecorators> {
        &self.atoms[slot.index()]
    }

    pub fn bond_decorators(&self, a: SlotId, b: SlotId) -> Option<&BTreeSet<BondDecorators>> {
        self.bonds.get(&edge_key(a, b))
    }

    pub fn edges(&self) -> impl Iterator<Item = (SlotId, SlotId, &BTreeSet<BondDecorators>)> + '_ {
        self.bonds.iter().map(|(&(a, b), set)| (a, b, set))
    }

    /// The atom expression of `slot`, without brackets or index tag.
    pub fn atom_expression(&self, slot: SlotId, compress: bool) -> String {
        let mut out = String::new();
        smirks::write_or_list(self.atom_decorators(slot), compress, &mut out);
        out
    }

    /// The bond expression between `a` and `b`, if they are bonded.
    pub fn bond_expression(&self, a: SlotId, b: SlotId, compress: bool) -> Option<String> {
        let set = self.bond_decorators(a, b)?;
        let mut out = String::new();
        smirks::write_or_list(set, compress, &mut out);
        Some(out)
    }

    /// Serializes the graph as SMIRKS text.
    pub fn as_smirks(&self, compress: bool) -> String {
        smirks::to_smirks(self, compress)
    }
}

/// Builds the graph of one cluster with default decorators.
pub fn build_cluster_graph<A, B>(
    label: &str,
    molecules: &[Mol<A, B>],
    occurrences: &[Vec<Vec<usize>>],
    layers: Layers,
) -> ClusterResult<ClusterGraph>
where
    A: AtomProperties,
    B: BondProperties,
{
    build_cluster_graph_with(label, molecules, occurrences, &BuildOptions::with_layers(layers))
}

pub fn build_cluster_graph_with<A, B>(
    label: &str,
    molecules: &[Mol<A, B>],
    occurrences: &[Vec<Vec<usize>>],
    options: &BuildOptions,
) -> ClusterResult<ClusterGraph>
where
    A: AtomProperties,
    B: BondProperties,
{
    let perceived: Vec<_> = molecules.iter().map(PerceivedMol::new).collect();
    ClusterGraph::from_perceived(label, &perceived, occurrences, options)
}

/// Builds one graph per label of `matches`, perceiving each molecule once.
///
/// Stops at the first cluster that fails to build.
pub fn build_clusters<A, B>(
    molecules: &[Mol<A, B>],
    matches: &ClusterMatches,
    options: &BuildOptions,
) -> ClusterResult<BTreeMap<String, ClusterGraph>>
where
    A: AtomProperties,
    B: BondProperties,
{
    let perceived: Vec<_> = molecules.iter().map(PerceivedMol::new).collect();
    let mut graphs = BTreeMap::new();
    for (label, occurrences) in matches {
        let graph = ClusterGraph::from_perceived(label, &perceived, occurrences, options)?;
        graphs.insert(label.clone(), graph);
    }
    debug!(clusters = graphs.len(), molecules = molecules.len(), "built clusters");
    Ok(graphs)
}
