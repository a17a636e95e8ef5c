use efg_tree::game::{ActionIndex, InfosetId};
use itertools::Itertools;
use std::fmt;

/// Identity handed out by `SequenceRegistry`. Ids are shared between both
/// players; the empty sequences of `Player1` and `Player2` are 0 and 1.
pub type SequenceId = usize;

/// A single move of a player: an (infoset_index, action_index) pair.
/// Note that `SequenceStep` does not contain actions, it merely contains
/// the *index* of the action in its information set, so that equal action
/// labels at different information sets remain different steps.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Hash, Clone, Copy)]
pub struct SequenceStep {
    pub infoset: InfosetId,
    pub action: ActionIndex,
}

impl SequenceStep {
    pub fn new(infoset: InfosetId, action: ActionIndex) -> SequenceStep {
        SequenceStep { infoset, action }
    }
}

impl fmt::Display for SequenceStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.infoset, self.action)
    }
}

/// Ordered list of steps taken by one player along a history. Equality and
/// hashing are purely structural, so two independently built sequences with
/// the same steps are the same sequence.
#[derive(Debug, Default, PartialOrd, Ord, PartialEq, Eq, Hash, Clone)]
pub struct Sequence {
    steps: Vec<SequenceStep>,
}

impl Sequence {
    pub fn empty() -> Sequence {
        Sequence { steps: vec![] }
    }

    pub fn from_steps(steps: Vec<SequenceStep>) -> Sequence {
        Sequence { steps }
    }

    /// Returns a new sequence with `step` appended, leaving `self` untouched.
    pub fn extended(&self, step: SequenceStep) -> Sequence {
        let mut steps = self.steps.clone();
        steps.push(step);
        Sequence { steps }
    }

    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }

    pub fn last(&self) -> Option<SequenceStep> {
        self.steps.last().cloned()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "<empty>");
        }
        write!(f, "{}", self.steps.iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equality() {
        let a = Sequence::empty()
            .extended(SequenceStep::new(3, 0))
            .extended(SequenceStep::new(7, 1));
        let b = Sequence::from_steps(vec![SequenceStep::new(3, 0), SequenceStep::new(7, 1)]);
        assert_eq!(a, b);
        assert_eq!(a.last(), Some(SequenceStep::new(7, 1)));
        assert_eq!(format!("{}", a), "(3, 0) (7, 1)");
    }

    #[test]
    fn same_action_index_at_different_infosets() {
        // Folding with a jack is not folding with a queen.
        let fold_jack = Sequence::empty().extended(SequenceStep::new(0, 0));
        let fold_queen = Sequence::empty().extended(SequenceStep::new(1, 0));
        assert_ne!(fold_jack, fold_queen);
    }
}
