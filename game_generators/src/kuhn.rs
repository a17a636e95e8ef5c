// Kuhn poker.
//
// Three cards (jack, queen, king), one dealt to each player, ante of 1. Player
// 1 checks or bets 1. After a check Player 2 may check (showdown for 1) or bet,
// in which case Player 1 folds or calls. Facing a bet, a player folds or calls
// (showdown for 2). The value of the game to Player 1 is -1/18.

use efg_tree::game::{History, HistoryType, InfosetId, Player};

pub const NUM_CARDS: usize = 3;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KuhnAction {
    Deal(usize, usize),
    Check,
    Bet,
    Fold,
    Call,
}

/// Public betting state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Betting {
    Open,
    Checked,
    CheckedBet,
    Bet,
    CheckedDown,
    Folded(Player),
    Called,
}

impl Betting {
    fn code(self) -> usize {
        match self {
            Betting::Open => 0,
            Betting::Checked => 1,
            Betting::CheckedBet => 2,
            Betting::Bet => 3,
            _ => panic!("No player acts after {:?}", self),
        }
    }

    fn next(self, action: KuhnAction) -> Betting {
        match (self, action) {
            (Betting::Open, KuhnAction::Check) => Betting::Checked,
            (Betting::Open, KuhnAction::Bet) => Betting::Bet,
            (Betting::Checked, KuhnAction::Check) => Betting::CheckedDown,
            (Betting::Checked, KuhnAction::Bet) => Betting::CheckedBet,
            (Betting::CheckedBet, KuhnAction::Fold) => Betting::Folded(Player::Player1),
            (Betting::Bet, KuhnAction::Fold) => Betting::Folded(Player::Player2),
            (Betting::CheckedBet, KuhnAction::Call) | (Betting::Bet, KuhnAction::Call) => {
                Betting::Called
            }
            _ => panic!("Illegal action {:?} after {:?}", action, self),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Kuhn {
    cards: Option<(usize, usize)>,
    betting: Betting,
}

impl Kuhn {
    pub fn new() -> Kuhn {
        Kuhn {
            cards: None,
            betting: Betting::Open,
        }
    }

    fn showdown(&self, stake: f64) -> f64 {
        let (card_pl1, card_pl2) = self.cards.expect("Cards have not been dealt");
        if card_pl1 > card_pl2 {
            stake
        } else {
            -stake
        }
    }
}

impl Default for Kuhn {
    fn default() -> Self {
        Kuhn::new()
    }
}

impl History for Kuhn {
    type Action = KuhnAction;
    type Infoset = InfosetId;

    fn history_type(&self) -> HistoryType {
        match (self.cards, self.betting) {
            (None, _) => HistoryType::Chance,
            (_, Betting::CheckedDown) | (_, Betting::Folded(_)) | (_, Betting::Called) => {
                HistoryType::Terminal
            }
            _ => HistoryType::Decision,
        }
    }

    fn current_player(&self) -> Player {
        match self.betting {
            Betting::Open | Betting::CheckedBet => Player::Player1,
            _ => Player::Player2,
        }
    }

    /// The acting player sees its own card and the betting so far.
    fn infoset(&self) -> Self::Infoset {
        let (card_pl1, card_pl2) = self.cards.expect("Cards have not been dealt");
        let card = match self.current_player() {
            Player::Player1 => card_pl1,
            Player::Player2 => card_pl2,
        };
        self.betting.code() * NUM_CARDS + card
    }

    fn actions(&self) -> Box<[Self::Action]> {
        match self.history_type() {
            HistoryType::Chance => {
                let mut deals = vec![];
                for card_pl1 in 0..NUM_CARDS {
                    for card_pl2 in (0..NUM_CARDS).filter(|&c| c != card_pl1) {
                        deals.push(KuhnAction::Deal(card_pl1, card_pl2));
                    }
                }
                deals.into_boxed_slice()
            }
            HistoryType::Decision => {
                let actions = match self.betting {
                    Betting::Open | Betting::Checked => vec![KuhnAction::Check, KuhnAction::Bet],
                    _ => vec![KuhnAction::Fold, KuhnAction::Call],
                };
                actions.into_boxed_slice()
            }
            HistoryType::Terminal => vec![].into_boxed_slice(),
        }
    }

    fn utility(&self) -> f64 {
        match self.betting {
            Betting::CheckedDown => self.showdown(1.0),
            Betting::Called => self.showdown(2.0),
            Betting::Folded(Player::Player1) => -1.0,
            Betting::Folded(Player::Player2) => 1.0,
            _ => panic!("Not a terminal node: {:?}", self),
        }
    }

    fn chance_prob(&self, _action: &Self::Action) -> f64 {
        1.0 / (NUM_CARDS * (NUM_CARDS - 1)) as f64
    }

    fn child(&self, action: &Self::Action) -> Self {
        match *action {
            KuhnAction::Deal(card_pl1, card_pl2) => Kuhn {
                cards: Some((card_pl1, card_pl2)),
                betting: self.betting,
            },
            _ => Kuhn {
                cards: self.cards,
                betting: self.betting.next(*action),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn six_deals() {
        let root = Kuhn::new();
        assert_eq!(root.actions().len(), 6);
        let total: f64 = root.actions().iter().map(|a| root.chance_prob(a)).sum();
        assert_approx_eq!(total, 1.0);
    }

    #[test]
    fn check_bet_fold() {
        let history = Kuhn::new()
            .child(&KuhnAction::Deal(2, 0))
            .child(&KuhnAction::Check);
        assert_eq!(history.current_player(), Player::Player2);
        assert_eq!(history.infoset(), NUM_CARDS);

        let history = history.child(&KuhnAction::Bet);
        assert_eq!(history.current_player(), Player::Player1);
        assert_eq!(history.infoset(), 2 * NUM_CARDS + 2);

        let folded = history.child(&KuhnAction::Fold);
        assert_eq!(folded.history_type(), HistoryType::Terminal);
        assert_approx_eq!(folded.utility(), -1.0);
        assert_approx_eq!(history.child(&KuhnAction::Call).utility(), 2.0);
    }
}
