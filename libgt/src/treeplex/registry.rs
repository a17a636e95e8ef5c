use crate::treeplex::{Sequence, SequenceId, SequenceStep};
use efg_tree::game::Player;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
struct SequenceEntry {
    player: Player,
    // `None` only for the two empty sequences.
    parent: Option<SequenceId>,
    step: Option<SequenceStep>,
}

/// Assigns a stable integer identity to every sequence reached while walking
/// a game tree. A non-empty sequence is indexed by its parent's id and its
/// last step: by induction on length, two sequences are equal iff these
/// pairs are equal, so lookups never compare or copy whole step lists.
///
/// Ids are handed out in order of first registration, starting at 2 after
/// the two empty sequences, and are therefore a pure function of traversal
/// order.
#[derive(Debug, Clone)]
pub struct SequenceRegistry {
    entries: Vec<SequenceEntry>,
    children: BTreeMap<(SequenceId, SequenceStep), SequenceId>,
}

impl SequenceRegistry {
    pub fn new() -> SequenceRegistry {
        let mut registry = SequenceRegistry {
            entries: vec![],
            children: BTreeMap::new(),
        };
        for player in [Player::Player1, Player::Player2].iter() {
            registry.entries.push(SequenceEntry {
                player: *player,
                parent: None,
                step: None,
            });
            assert_eq!(registry.entries.len() - 1, player.index());
        }
        registry
    }

    pub fn empty_sequence_id(&self, player: Player) -> SequenceId {
        player.index()
    }

    /// Returns the id of `parent` extended by `step`, registering it if it has
    /// not been seen before. The flag is true iff the sequence is new.
    pub fn extend(&mut self, parent: SequenceId, step: SequenceStep) -> (SequenceId, bool) {
        let player = self.player(parent);
        if let Some(id) = self.children.get(&(parent, step)) {
            return (*id, false);
        }
        let id = self.entries.len();
        self.entries.push(SequenceEntry {
            player,
            parent: Some(parent),
            step: Some(step),
        });
        self.children.insert((parent, step), id);
        (id, true)
    }

    /// Id of `parent` extended by `step`, if registered.
    pub fn child(&self, parent: SequenceId, step: SequenceStep) -> Option<SequenceId> {
        self.children.get(&(parent, step)).cloned()
    }

    /// Finds the id of a full sequence of `player`.
    pub fn lookup(&self, player: Player, sequence: &Sequence) -> Option<SequenceId> {
        sequence
            .steps()
            .iter()
            .try_fold(self.empty_sequence_id(player), |parent, step| {
                self.child(parent, *step)
            })
    }

    /// Reconstructs the steps of the sequence with the given id.
    pub fn sequence(&self, id: SequenceId) -> Sequence {
        let mut steps = vec![];
        let mut cursor = id;
        while let (Some(parent), Some(step)) = (self.entries[cursor].parent, self.entries[cursor].step) {
            steps.push(step);
            cursor = parent;
        }
        steps.reverse();
        Sequence::from_steps(steps)
    }

    pub fn player(&self, id: SequenceId) -> Player {
        self.entries[id].player
    }

    pub fn parent(&self, id: SequenceId) -> Option<SequenceId> {
        self.entries[id].parent
    }

    /// Last step of the sequence, or `None` for an empty sequence.
    pub fn last_step(&self, id: SequenceId) -> Option<SequenceStep> {
        self.entries[id].step
    }

    pub fn num_sequences(&self) -> usize {
        self.entries.len()
    }

    /// Ids of all sequences belonging to `player`, in increasing order.
    pub fn sequences_of(&self, player: Player) -> impl Iterator<Item = SequenceId> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, entry)| entry.player == player)
            .map(|(id, _)| id)
    }
}

impl Default for SequenceRegistry {
    fn default() -> Self {
        SequenceRegistry::new()
    }
}
