// Game trees spelled out node by node.
//
// Nodes are immutable and shared through `Arc`, so a history is a pointer and
// taking a child never copies a subtree.

use efg_tree::game::{History, HistoryType, InfosetId, Player};
use std::sync::Arc;

#[derive(Debug)]
enum Node {
    Terminal(f64),
    Chance(Vec<(f64, ExplicitHistory)>),
    Decision {
        player: Player,
        infoset: InfosetId,
        children: Vec<ExplicitHistory>,
    },
}

#[derive(Debug, Clone)]
pub struct ExplicitHistory(Arc<Node>);

/// Leaf paying `utility` to `Player::Player1`.
pub fn terminal(utility: f64) -> ExplicitHistory {
    ExplicitHistory(Arc::new(Node::Terminal(utility)))
}

/// Chance node over (probability, child) outcomes.
pub fn chance(outcomes: Vec<(f64, ExplicitHistory)>) -> ExplicitHistory {
    ExplicitHistory(Arc::new(Node::Chance(outcomes)))
}

/// Decision node of `player` in information set `infoset`. Action `i` leads
/// to `children[i]`. Every node of one information set must have the same
/// number of children.
pub fn decision(player: Player, infoset: InfosetId, children: Vec<ExplicitHistory>) -> ExplicitHistory {
    ExplicitHistory(Arc::new(Node::Decision {
        player,
        infoset,
        children,
    }))
}

impl History for ExplicitHistory {
    type Action = usize;
    type Infoset = InfosetId;

    fn history_type(&self) -> HistoryType {
        match *self.0 {
            Node::Terminal(_) => HistoryType::Terminal,
            Node::Chance(_) => HistoryType::Chance,
            Node::Decision { .. } => HistoryType::Decision,
        }
    }

    fn current_player(&self) -> Player {
        match *self.0 {
            Node::Decision { player, .. } => player,
            _ => panic!("Not a decision node: {:?}", self),
        }
    }

    fn infoset(&self) -> Self::Infoset {
        match *self.0 {
            Node::Decision { infoset, .. } => infoset,
            _ => panic!("Not a decision node: {:?}", self),
        }
    }

    fn actions(&self) -> Box<[Self::Action]> {
        let num_actions = match &*self.0 {
            Node::Terminal(_) => 0,
            Node::Chance(outcomes) => outcomes.len(),
            Node::Decision { children, .. } => children.len(),
        };
        (0..num_actions).collect::<Vec<_>>().into_boxed_slice()
    }

    fn utility(&self) -> f64 {
        match *self.0 {
            Node::Terminal(utility) => utility,
            _ => panic!("Not a terminal node: {:?}", self),
        }
    }

    fn chance_prob(&self, action: &Self::Action) -> f64 {
        match &*self.0 {
            Node::Chance(outcomes) => outcomes[*action].0,
            _ => panic!("Not a chance node: {:?}", self),
        }
    }

    fn child(&self, action: &Self::Action) -> Self {
        match &*self.0 {
            Node::Chance(outcomes) => outcomes[*action].1.clone(),
            Node::Decision { children, .. } => children[*action].clone(),
            Node::Terminal(_) => panic!("Terminal node has no children"),
        }
    }
}

/// Value of a perfect-information game for `Player::Player1` by backward
/// induction. Meaningless if some information set holds several histories.
pub fn expectiminimax<T: History>(history: &T) -> f64 {
    match history.history_type() {
        HistoryType::Terminal => history.utility(),
        HistoryType::Chance => history
            .actions()
            .iter()
            .map(|a| history.chance_prob(a) * expectiminimax(&history.child(a)))
            .sum(),
        HistoryType::Decision => {
            let values = history
                .actions()
                .iter()
                .map(|a| expectiminimax(&history.child(a)))
                .collect::<Vec<f64>>();
            match history.current_player() {
                Player::Player1 => values.into_iter().fold(std::f64::NEG_INFINITY, f64::max),
                Player::Player2 => values.into_iter().fold(std::f64::INFINITY, f64::min),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn children_are_shared() {
        let leaf = terminal(1.0);
        let root = decision(Player::Player1, 0, vec![leaf.clone(), leaf.clone()]);
        assert_eq!(root.actions().len(), 2);
        assert!(Arc::ptr_eq(&root.child(&0).0, &root.child(&1).0));
    }

    #[test]
    fn backward_induction() {
        let root = decision(
            Player::Player1,
            0,
            vec![
                chance(vec![(0.5, terminal(4.0)), (0.5, terminal(-2.0))]),
                decision(Player::Player2, 1, vec![terminal(3.0), terminal(0.5)]),
            ],
        );
        assert_approx_eq!(expectiminimax(&root), 1.0);
    }
}
