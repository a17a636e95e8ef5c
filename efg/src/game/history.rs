use crate::game::{Infoset, Player};
use std::fmt::Debug;

/// Kind of node a `History` sits at.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HistoryType {
    Decision,
    Chance,
    Terminal,
}

/// `History` is the main trait that should be implemented by a game. A value
/// of the implementing type stands for one node of the game tree, and the
/// tree is implicitly defined by `actions()` and `child()`.
///
/// Histories are cloned while the tree is walked, so implementations should
/// keep them cheap to copy: small `Copy` state, or reference-counted shared
/// nodes.
///
/// Contract, which callers rely on but do not check:
/// * `current_player()` and `infoset()` are only called at decision nodes,
///   `utility()` only at terminal nodes and `chance_prob()` only at chance
///   nodes.
/// * All histories in one information set return the same ordered list of
///   actions, so the index of an action in that list identifies it.
/// * Chance probabilities at a node are non-negative and sum to one.
/// * The game has perfect recall.
pub trait History
where
    Self: Debug + Clone,
{
    // Actions at a decision or chance node. Labels may repeat across
    // information sets; sequences are identified by (infoset, action index).
    type Action: Debug + Clone;

    type Infoset: Infoset;

    fn history_type(&self) -> HistoryType;
    fn current_player(&self) -> Player;
    fn infoset(&self) -> Self::Infoset;
    fn actions(&self) -> Box<[Self::Action]>;

    /// Payoff of the terminal node for `Player::Player1`. The payoff for
    /// `Player::Player2` is its negation.
    fn utility(&self) -> f64;

    fn chance_prob(&self, action: &Self::Action) -> f64;
    fn child(&self, action: &Self::Action) -> Self;
}
