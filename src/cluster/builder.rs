use std::collections::{BTreeMap, BTreeSet, HashSet};

use petgraph::graph::NodeIndex;
use tracing::trace;

use crate::config::BuildOptions;
use crate::decorators::{atom_decorators, bond_decorators, AtomDecorators, BondDecorators};
use crate::error::{ClusterError, ClusterResult};
use crate::perception::PerceivedMol;
use crate::traits::{AtomProperties, BondProperties};

use super::align::{align_occurrence, Placement, SlotArena, SlotId};
use super::{edge_key, ClusterGraph};

/// Folds occurrences into a [`ClusterGraph`] one at a time.
///
/// The first occurrence fixes the arity. Every occurrence is aligned and its
/// links (bonds joining the expansions of different tagged slots) are
/// checked against every earlier occurrence that reached the same two slots
/// before any of its decorators are merged.
pub(crate) struct GraphBuilder<'o> {
    label: String,
    options: &'o BuildOptions,
    arity: Option<usize>,
    arena: Option<SlotArena>,
    /// Occurrence ordinals that placed an atom in each slot.
    reached: Vec<BTreeSet<usize>>,
    links: BTreeSet<(SlotId, SlotId)>,
    atoms: Vec<BTreeSet<AtomDecorators>>,
    bonds: BTreeMap<(SlotId, SlotId), BTreeSet<BondDecorators>>,
    occurrences: usize,
}

impl<'o> GraphBuilder<'o> {
    pub(crate) fn new(label: String, options: &'o BuildOptions) -> Self {
        Self {
            label,
            options,
            arity: None,
            arena: None,
            reached: Vec::new(),
            links: BTreeSet::new(),
            atoms: Vec::new(),
            bonds: BTreeMap::new(),
            occurrences: 0,
        }
    }

    pub(crate) fn add_occurrence<A, B>(
        &mut self,
        mol: &PerceivedMol<'_, A, B>,
        molecule: usize,
        occurrence: usize,
        atoms: &[usize],
    ) -> ClusterResult<()>
    where
        A: AtomProperties,
        B: BondProperties,
    {
        let tagged = self.validate(mol, molecule, occurrence, atoms)?;
        self.arity.get_or_insert(tagged.len());

        let arena = self
            .arena
            .get_or_insert_with(|| SlotArena::with_tagged(tagged.len()));
        let placement = align_occurrence(arena, mol, &tagged, self.options.layers);
        let slots = arena.len();
        if self.atoms.len() < slots {
            self.atoms.resize_with(slots, BTreeSet::new);
            self.reached.resize_with(slots, BTreeSet::new);
        }
        if let Some((a, b, bonded)) = link_conflict(&self.links, &self.reached, &placement) {
            return Err(ClusterError::TopologyMismatch {
                label: self.label.clone(),
                molecule,
                occurrence,
                slots: (arena.key(a).clone(), arena.key(b).clone()),
                bonded,
            });
        }

        let config = self.options.decorators;
        for &(slot, atom) in &placement.atoms {
            self.atoms[slot.index()].insert(atom_decorators(mol, atom, &config));
            self.reached[slot.index()].insert(self.occurrences);
        }
        for &(a, b, bond) in placement.tree_bonds.iter().chain(&placement.links) {
            self.bonds
                .entry(edge_key(a, b))
                .or_default()
                .insert(bond_decorators(mol, bond, &config));
        }
        self.links
            .extend(placement.links.iter().map(|&(a, b, _)| (a, b)));

        self.occurrences += 1;
        trace!(
            label = %self.label,
            molecule,
            occurrence,
            slots = placement.atoms.len(),
            links = placement.links.len(),
            "aligned occurrence"
        );
        Ok(())
    }

    fn validate<A, B>(
        &self,
        mol: &PerceivedMol<'_, A, B>,
        molecule: usize,
        occurrence: usize,
        atoms: &[usize],
    ) -> ClusterResult<Vec<NodeIndex>>
    where
        A: AtomProperties,
        B: BondProperties,
    {
        if atoms.is_empty() {
            return Err(ClusterError::EmptyOccurrence {
                label: self.label.clone(),
                molecule,
                occurrence,
            });
        }
        if let Some(expected) = self.arity {
            if atoms.len() != expected {
                return Err(ClusterError::ArityMismatch {
                    label: self.label.clone(),
                    molecule,
                    occurrence,
                    expected,
                    found: atoms.len(),
                });
            }
        }

        let mut seen = HashSet::with_capacity(atoms.len());
        let mut tagged = Vec::with_capacity(atoms.len());
        for &atom in atoms {
            if !mol.mol().contains_atom(atom) {
                return Err(ClusterError::AtomOutOfRange {
                    label: self.label.clone(),
                    molecule,
                    occurrence,
                    atom,
                    atom_count: mol.atom_count(),
                });
            }
            if !seen.insert(atom) {
                return Err(ClusterError::DuplicateAtom {
                    label: self.label.clone(),
                    molecule,
                    occurrence,
                    atom,
                });
            }
            tagged.push(NodeIndex::new(atom));
        }
        Ok(tagged)
    }

    pub(crate) fn finish(self) -> ClusterResult<ClusterGraph> {
        let (Some(arity), Some(arena)) = (self.arity, self.arena) else {
            return Err(ClusterError::EmptyCluster { label: self.label });
        };
        Ok(ClusterGraph::from_parts(
            self.label,
            arity,
            self.options.layers,
            arena,
            self.atoms,
            self.bonds,
            self.occurrences,
        ))
    }
}

/// First slot pair that this occurrence and an earlier one both reached but
/// disagree on linking, with whether this occurrence links it.
fn link_conflict(
    links: &BTreeSet<(SlotId, SlotId)>,
    reached: &[BTreeSet<usize>],
    placement: &Placement,
) -> Option<(SlotId, SlotId, bool)> {
    let here: HashSet<SlotId> = placement.atoms.iter().map(|&(slot, _)| slot).collect();
    let linked: BTreeSet<(SlotId, SlotId)> =
        placement.links.iter().map(|&(a, b, _)| (a, b)).collect();

    linked
        .symmetric_difference(links)
        .map(|&(a, b)| (a, b, linked.contains(&(a, b))))
        .find(|&(a, b, bonded)| {
            if bonded {
                !reached[a.index()].is_disjoint(&reached[b.index()])
            } else {
                here.contains(&a) && here.contains(&b)
            }
        })
}
