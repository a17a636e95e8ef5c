// (LIB)rary for (G)ame (T)rees.
// Walks a game tree exposed through `efg_tree::game::History` and collects the
// sequence-form description of one player's problem: the sequences of both
// players, the realization-plan structure of the solving player and the
// payoff-bounding constraints of the opponent's information sets.

pub mod treeplex;

pub use treeplex::{SequenceFormBuilder, SequenceFormProgram};
pub use treeplex::{ConstraintAccumulator, ConstraintKey, ConstraintTerm, FlowMap, SequenceRegistry};
pub use treeplex::{Sequence, SequenceId, SequenceStep};
