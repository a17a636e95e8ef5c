// Normal-form games played as extensive-form games: Player 1 picks a row, then
// Player 2 picks a column without observing the row.

use efg_tree::game::{History, HistoryType, InfosetId, Player};
use std::sync::Arc;

const INFOSET_PL1: InfosetId = 0;
const INFOSET_PL2: InfosetId = 1;

#[derive(Debug, Clone)]
pub struct MatrixGame {
    // Payoffs to Player 1, indexed by [row][column].
    payoffs: Arc<Vec<Vec<f64>>>,
    row: Option<usize>,
    column: Option<usize>,
}

impl MatrixGame {
    pub fn new(payoffs: Vec<Vec<f64>>) -> MatrixGame {
        assert!(!payoffs.is_empty(), "Payoff matrix has no rows");
        assert!(
            payoffs.iter().all(|row| !row.is_empty() && row.len() == payoffs[0].len()),
            "Payoff matrix rows must be non-empty and of equal length"
        );
        MatrixGame {
            payoffs: Arc::new(payoffs),
            row: None,
            column: None,
        }
    }

    pub fn rock_paper_scissors() -> MatrixGame {
        MatrixGame::new(vec![
            vec![0.0, -1.0, 1.0],
            vec![1.0, 0.0, -1.0],
            vec![-1.0, 1.0, 0.0],
        ])
    }

    pub fn matching_pennies() -> MatrixGame {
        MatrixGame::new(vec![vec![1.0, -1.0], vec![-1.0, 1.0]])
    }

    pub fn num_rows(&self) -> usize {
        self.payoffs.len()
    }

    pub fn num_columns(&self) -> usize {
        self.payoffs[0].len()
    }
}

impl History for MatrixGame {
    type Action = usize;
    type Infoset = InfosetId;

    fn history_type(&self) -> HistoryType {
        match self.column {
            Some(_) => HistoryType::Terminal,
            None => HistoryType::Decision,
        }
    }

    fn current_player(&self) -> Player {
        match self.row {
            None => Player::Player1,
            Some(_) => Player::Player2,
        }
    }

    fn infoset(&self) -> Self::Infoset {
        match self.current_player() {
            Player::Player1 => INFOSET_PL1,
            Player::Player2 => INFOSET_PL2,
        }
    }

    fn actions(&self) -> Box<[Self::Action]> {
        let num_actions = match (self.history_type(), self.current_player()) {
            (HistoryType::Terminal, _) => 0,
            (_, Player::Player1) => self.num_rows(),
            (_, Player::Player2) => self.num_columns(),
        };
        (0..num_actions).collect::<Vec<_>>().into_boxed_slice()
    }

    fn utility(&self) -> f64 {
        match (self.row, self.column) {
            (Some(row), Some(column)) => self.payoffs[row][column],
            _ => panic!("Not a terminal node: {:?}", self),
        }
    }

    fn chance_prob(&self, _action: &Self::Action) -> f64 {
        panic!("Matrix games have no chance nodes")
    }

    fn child(&self, action: &Self::Action) -> Self {
        let mut next = self.clone();
        match self.current_player() {
            Player::Player1 => next.row = Some(*action),
            Player::Player2 => next.column = Some(*action),
        }
        next
    }
}
