use std::cmp::Reverse;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::config::Layers;
use crate::perception::PerceivedMol;
use crate::traits::{AtomProperties, BondProperties};

/// Index of a slot in a cluster graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(usize);

impl SlotId {
    pub(crate) fn new(index: usize) -> Self {
        SlotId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Identity of a slot, shared by every occurrence that reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKey {
    /// Position `i` (1-based) of the occurrence tuples.
    Tagged(usize),
    /// Found by expanding outward from tagged slot `source`. `path` holds the
    /// neighbour rank taken at each hop, so `path.len()` is the hop distance.
    Layer { source: usize, path: Vec<usize> },
}

impl SlotKey {
    pub fn is_tagged(&self) -> bool {
        matches!(self, SlotKey::Tagged(_))
    }

    pub fn hop(&self) -> usize {
        match self {
            SlotKey::Tagged(_) => 0,
            SlotKey::Layer { path, .. } => path.len(),
        }
    }

    /// The tagged slot this slot was expanded from (itself when tagged).
    pub fn source(&self) -> usize {
        match self {
            SlotKey::Tagged(index) => *index,
            SlotKey::Layer { source, .. } => *source,
        }
    }

    fn child(&self, rank: usize) -> SlotKey {
        let mut path = match self {
            SlotKey::Tagged(_) => Vec::new(),
            SlotKey::Layer { path, .. } => path.clone(),
        };
        path.push(rank);
        SlotKey::Layer {
            source: self.source(),
            path,
        }
    }
}

/// `2` for a tagged slot, `2.0.1` for the layer slot reached from tagged
/// slot 2 by taking rank 0 and then rank 1.
impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source())?;
        if let SlotKey::Layer { path, .. } = self {
            for rank in path {
                write!(f, ".{rank}")?;
            }
        }
        Ok(())
    }
}

/// Arena of slots. Tagged slot `i` always lives at `SlotId(i - 1)`; layer
/// slots are appended as occurrences first reach them.
#[derive(Debug, Clone)]
pub(crate) struct SlotArena {
    keys: Vec<SlotKey>,
    lookup: HashMap<SlotKey, SlotId>,
}

impl SlotArena {
    pub(crate) fn with_tagged(arity: usize) -> Self {
        let mut arena = Self {
            keys: Vec::new(),
            lookup: HashMap::new(),
        };
        for index in 1..=arity {
            arena.insert(SlotKey::Tagged(index));
        }
        arena
    }

    fn insert(&mut self, key: SlotKey) -> SlotId {
        let id = SlotId::new(self.keys.len());
        self.keys.push(key.clone());
        self.lookup.insert(key, id);
        id
    }

    pub(crate) fn tagged(&self, position: usize) -> SlotId {
        SlotId::new(position)
    }

    fn child(&mut self, parent: SlotId, rank: usize) -> SlotId {
        let key = self.keys[parent.0].child(rank);
        match self.lookup.get(&key) {
            Some(&id) => id,
            None => self.insert(key),
        }
    }

    pub(crate) fn key(&self, slot: SlotId) -> &SlotKey {
        &self.keys[slot.0]
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn into_parts(self) -> (Vec<SlotKey>, HashMap<SlotKey, SlotId>) {
        (self.keys, self.lookup)
    }
}

/// Where one occurrence's atoms and tree bonds landed.
#[derive(Debug, Default)]
pub(crate) struct Placement {
    pub(crate) atoms: Vec<(SlotId, NodeIndex)>,
    /// `(parent, child, bond)` for every layer slot reached.
    pub(crate) tree_bonds: Vec<(SlotId, SlotId, EdgeIndex)>,
    /// Bonds between placed atoms that grew from different tagged slots,
    /// tagged pairs included, as `(low, high, bond)` sorted by slot pair.
    pub(crate) links: Vec<(SlotId, SlotId, EdgeIndex)>,
}

/// Neighbour ranking: heavier elements first, then higher connectivity,
/// then lower atom index.
fn rank_key<A, B>(mol: &PerceivedMol<'_, A, B>, atom: NodeIndex) -> (Reverse<u8>, Reverse<u8>, usize)
where
    A: AtomProperties,
    B: BondProperties,
{
    (
        Reverse(mol.atomic_number(atom)),
        Reverse(mol.connectivity(atom)),
        atom.index(),
    )
}

/// Assigns the atoms of one occurrence to slots, creating layer slots in
/// `arena` as needed.
///
/// Expansion is breadth first from the tagged atoms in tag order. An atom is
/// claimed by the first slot that discovers it, so it lands in at most one
/// slot. A bond between two placed atoms that is not a tree bond becomes a
/// link when the atoms hang off different tagged slots; one that closes a
/// ring inside a single tagged slot's expansion is dropped.
pub(crate) fn align_occurrence<A, B>(
    arena: &mut SlotArena,
    mol: &PerceivedMol<'_, A, B>,
    tagged: &[NodeIndex],
    layers: Layers,
) -> Placement
where
    A: AtomProperties,
    B: BondProperties,
{
    let mut placement = Placement::default();
    let mut claimed: HashSet<NodeIndex> = tagged.iter().copied().collect();
    let mut queue = VecDeque::with_capacity(tagged.len());

    for (position, &atom) in tagged.iter().enumerate() {
        let slot = arena.tagged(position);
        placement.atoms.push((slot, atom));
        queue.push_back((slot, atom, 0usize));
    }

    while let Some((slot, atom, hop)) = queue.pop_front() {
        if !layers.expands_beyond(hop) {
            continue;
        }
        let mut fresh: Vec<NodeIndex> = mol
            .mol()
            .neighbors(atom)
            .filter(|nb| !claimed.contains(nb))
            .collect();
        fresh.sort_by_key(|&nb| rank_key(mol, nb));
        fresh.dedup();

        for (rank, nb) in fresh.into_iter().enumerate() {
            let Some(bond) = mol.mol().bond_between(atom, nb) else {
                continue;
            };
            claimed.insert(nb);
            let child = arena.child(slot, rank);
            placement.atoms.push((child, nb));
            placement.tree_bonds.push((slot, child, bond));
            queue.push_back((child, nb, hop + 1));
        }
    }

    placement.links = links(arena, mol, &placement.atoms);
    placement
}

fn links<A, B>(
    arena: &SlotArena,
    mol: &PerceivedMol<'_, A, B>,
    placed: &[(SlotId, NodeIndex)],
) -> Vec<(SlotId, SlotId, EdgeIndex)>
where
    A: AtomProperties,
    B: BondProperties,
{
    let slot_of: HashMap<NodeIndex, SlotId> =
        placed.iter().map(|&(slot, atom)| (atom, slot)).collect();
    let mut links = Vec::new();
    for &(slot, atom) in placed {
        for bond in mol.mol().bonds_of(atom) {
            let Some(other) = mol.mol().other_atom(bond, atom) else {
                continue;
            };
            let Some(&other_slot) = slot_of.get(&other) else {
                continue;
            };
            if slot < other_slot && arena.key(slot).source() != arena.key(other_slot).source() {
                links.push((slot, other_slot, bond));
            }
        }
    }
    links.sort_by_key(|&(a, b, _)| (a, b));
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{cyclopropane, ethane, propane};

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn keys(arena: &SlotArena, placement: &Placement) -> Vec<(SlotKey, usize)> {
        placement
            .atoms
            .iter()
            .map(|&(slot, atom)| (arena.keys[slot.0].clone(), atom.index()))
            .collect()
    }

    #[test]
    fn depth_zero_places_only_tagged_atoms() {
        let mol = ethane();
        let pm = PerceivedMol::new(&mol);
        let mut arena = SlotArena::with_tagged(3);
        let placement = align_occurrence(&mut arena, &pm, &[n(5), n(1), n(7)], Layers::Depth(0));
        assert_eq!(placement.atoms.len(), 3);
        assert!(placement.tree_bonds.is_empty());
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn heavier_neighbour_takes_first_rank() {
        let mol = ethane();
        let pm = PerceivedMol::new(&mol);
        let mut arena = SlotArena::with_tagged(3);
        let placement = align_occurrence(&mut arena, &pm, &[n(5), n(1), n(7)], Layers::Depth(1));
        let placed = keys(&arena, &placement);
        assert!(placed.contains(&(SlotKey::Layer { source: 2, path: vec![0] }, 0)));
        assert!(placed.contains(&(SlotKey::Layer { source: 2, path: vec![1] }, 6)));
        assert_eq!(placed.len(), 5);
    }

    #[test]
    fn analogous_neighbours_share_slots() {
        let mol = ethane();
        let pm = PerceivedMol::new(&mol);
        let mut arena = SlotArena::with_tagged(3);
        let first = align_occurrence(&mut arena, &pm, &[n(5), n(1), n(7)], Layers::Depth(1));
        let second = align_occurrence(&mut arena, &pm, &[n(6), n(1), n(7)], Layers::Depth(1));
        assert_eq!(arena.len(), 5);
        let slots = |p: &Placement| p.atoms.iter().map(|&(s, _)| s).collect::<Vec<_>>();
        assert_eq!(slots(&first), slots(&second));
    }

    #[test]
    fn all_layers_stop_at_component_boundary() {
        let mol = propane();
        let pm = PerceivedMol::new(&mol);
        let mut arena = SlotArena::with_tagged(1);
        let placement = align_occurrence(&mut arena, &pm, &[n(1)], Layers::All);
        assert_eq!(placement.atoms.len(), mol.atom_count());
        assert_eq!(placement.tree_bonds.len(), mol.bond_count());
        let deepest = arena.keys.iter().map(SlotKey::hop).max();
        assert_eq!(deepest, Some(2));
    }

    #[test]
    fn bonds_between_tagged_expansions_are_links() {
        let mol = ethane();
        let pm = PerceivedMol::new(&mol);
        let mut arena = SlotArena::with_tagged(2);
        let placement = align_occurrence(&mut arena, &pm, &[n(2), n(5)], Layers::Depth(1));
        let cc = mol.bond_between(n(0), n(1)).unwrap();
        assert_eq!(placement.tree_bonds.len(), 2);
        assert_eq!(placement.links, vec![(SlotId(2), SlotId(3), cc)]);
        assert_eq!(arena.key(SlotId(2)).to_string(), "1.0");
        assert_eq!(arena.key(SlotId(3)).to_string(), "2.0");
    }

    #[test]
    fn ring_inside_one_expansion_is_not_a_link() {
        let mol = cyclopropane();
        let pm = PerceivedMol::new(&mol);
        let mut arena = SlotArena::with_tagged(1);
        let placement = align_occurrence(&mut arena, &pm, &[n(0)], Layers::All);
        assert!(placement.links.is_empty());
        assert_eq!(placement.tree_bonds.len(), mol.bond_count() - 1);
    }

    #[test]
    fn atom_reachable_from_two_tags_is_claimed_once() {
        let mol = propane();
        let pm = PerceivedMol::new(&mol);
        let mut arena = SlotArena::with_tagged(2);
        // C0 and C2 both reach C1 at hop 1; tag order decides.
        let placement = align_occurrence(&mut arena, &pm, &[n(0), n(2)], Layers::Depth(1));
        let c1: Vec<_> = keys(&arena, &placement)
            .into_iter()
            .filter(|&(_, atom)| atom == 1)
            .collect();
        assert_eq!(c1, vec![(SlotKey::Layer { source: 1, path: vec![0] }, 1)]);
    }
}
