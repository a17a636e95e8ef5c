use crate::treeplex::{SequenceId, SequenceStep};
use efg_tree::game::InfosetId;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Identifies one payoff-bounding constraint: either the root of the game, or
/// the opponent's most recent move. Under perfect recall the last move of the
/// opponent determines its whole sequence.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ConstraintKey {
    Root,
    After(SequenceStep),
}

impl ConstraintKey {
    pub fn from_last_step(step: Option<SequenceStep>) -> ConstraintKey {
        match step {
            None => ConstraintKey::Root,
            Some(step) => ConstraintKey::After(step),
        }
    }

    /// Opponent infoset whose value variable this constraint bounds, or
    /// `None` for the root.
    pub fn infoset(&self) -> Option<InfosetId> {
        match self {
            ConstraintKey::Root => None,
            ConstraintKey::After(step) => Some(step.infoset),
        }
    }
}

impl fmt::Display for ConstraintKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConstraintKey::Root => write!(f, "root"),
            ConstraintKey::After(step) => write!(f, "{}_{}", step.infoset, step.action),
        }
    }
}

/// One summand of a payoff-bounding constraint.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ConstraintTerm {
    /// Leaf payoff (in `Player1` units) reached with chance probability
    /// `probability` when the solving player plays `sequence`.
    Payoff {
        sequence: SequenceId,
        probability: f64,
        payoff: f64,
    },
    /// Value variable of an opponent information set nested directly below
    /// the constraint's key. `probability` is the chance reach of the first
    /// history at which the infoset was met; chance mass below the infoset
    /// is already carried by its own payoff terms.
    Nested { probability: f64, infoset: InfosetId },
}

/// Accumulates constraint terms for the opponent's information sets while the
/// game tree is walked.
#[derive(Debug, Clone)]
pub struct ConstraintAccumulator {
    entries: BTreeMap<ConstraintKey, Vec<ConstraintTerm>>,
    nested: BTreeSet<(ConstraintKey, InfosetId)>,
}

impl ConstraintAccumulator {
    /// Creates an accumulator holding the (empty) root entry.
    pub fn new() -> ConstraintAccumulator {
        let mut entries = BTreeMap::new();
        entries.insert(ConstraintKey::Root, vec![]);
        ConstraintAccumulator {
            entries,
            nested: BTreeSet::new(),
        }
    }

    pub fn push_payoff(
        &mut self,
        key: ConstraintKey,
        sequence: SequenceId,
        probability: f64,
        payoff: f64,
    ) {
        self.entries
            .entry(key)
            .or_insert_with(Vec::new)
            .push(ConstraintTerm::Payoff {
                sequence,
                probability,
                payoff,
            });
    }

    /// Wires the value of `infoset` into the constraint under `key`. Each
    /// infoset is added at most once per key; returns false if it was
    /// already present.
    pub fn push_nested(&mut self, key: ConstraintKey, probability: f64, infoset: InfosetId) -> bool {
        if !self.nested.insert((key, infoset)) {
            return false;
        }
        self.entries
            .entry(key)
            .or_insert_with(Vec::new)
            .push(ConstraintTerm::Nested {
                probability,
                infoset,
            });
        true
    }

    pub fn terms(&self, key: &ConstraintKey) -> Option<&[ConstraintTerm]> {
        self.entries.get(key).map(|x| &x[..])
    }

    pub fn root(&self) -> &[ConstraintTerm] {
        &self.entries[&ConstraintKey::Root]
    }

    /// Iterates over all entries, root first.
    pub fn iter(&self) -> impl Iterator<Item = (&ConstraintKey, &[ConstraintTerm])> {
        self.entries.iter().map(|(key, terms)| (key, &terms[..]))
    }

    /// All opponent infosets which need a value variable: those bounded by a
    /// constraint and those referenced from one.
    pub fn value_infosets(&self) -> BTreeSet<InfosetId> {
        let bounded = self.entries.keys().filter_map(|key| key.infoset());
        let referenced = self.nested.iter().map(|(_, infoset)| *infoset);
        bounded.chain(referenced).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConstraintAccumulator {
    fn default() -> Self {
        ConstraintAccumulator::new()
    }
}
