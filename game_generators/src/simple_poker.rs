// Simplified poker with a deck of jacks and queens.
//
// Chance deals one card to each player. Player 1 folds (losing 1) or bets.
// Facing a bet, Player 2 folds (losing 1) or calls, after which the higher
// card wins 3 and equal cards split.

use efg_tree::game::{History, HistoryType, Infoset, InfosetId, Player};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Card {
    Jack,
    Queen,
}

impl Card {
    fn rank(self) -> usize {
        match self {
            Card::Jack => 0,
            Card::Queen => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PokerAction {
    Deal(Card, Card),
    Fold,
    Bet,
    Call,
}

const DEALS: [(Card, Card, f64); 4] = [
    (Card::Jack, Card::Jack, 1.0 / 6.0),
    (Card::Jack, Card::Queen, 1.0 / 3.0),
    (Card::Queen, Card::Jack, 1.0 / 3.0),
    (Card::Queen, Card::Queen, 1.0 / 6.0),
];

/// A player only observes its own card.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PokerInfoset {
    player: Player,
    card: Card,
}

impl PokerInfoset {
    pub fn new(player: Player, card: Card) -> PokerInfoset {
        PokerInfoset { player, card }
    }
}

impl Infoset for PokerInfoset {
    fn index(&self) -> InfosetId {
        self.player.index() * 2 + self.card.rank()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct SimplePoker {
    cards: Option<(Card, Card)>,
    action_pl1: Option<PokerAction>,
    action_pl2: Option<PokerAction>,
}

impl SimplePoker {
    /// Root of the game, before the deal.
    pub fn new() -> SimplePoker {
        SimplePoker {
            cards: None,
            action_pl1: None,
            action_pl2: None,
        }
    }

    fn card(&self, player: Player) -> Card {
        let (card_pl1, card_pl2) = self.cards.expect("Cards have not been dealt");
        match player {
            Player::Player1 => card_pl1,
            Player::Player2 => card_pl2,
        }
    }
}

impl Default for SimplePoker {
    fn default() -> Self {
        SimplePoker::new()
    }
}

impl History for SimplePoker {
    type Action = PokerAction;
    type Infoset = PokerInfoset;

    fn history_type(&self) -> HistoryType {
        match (self.cards, self.action_pl1, self.action_pl2) {
            (None, _, _) => HistoryType::Chance,
            (Some(_), Some(PokerAction::Fold), _) => HistoryType::Terminal,
            (Some(_), _, Some(_)) => HistoryType::Terminal,
            _ => HistoryType::Decision,
        }
    }

    fn current_player(&self) -> Player {
        match self.action_pl1 {
            None => Player::Player1,
            Some(_) => Player::Player2,
        }
    }

    fn infoset(&self) -> Self::Infoset {
        let player = self.current_player();
        PokerInfoset {
            player,
            card: self.card(player),
        }
    }

    fn actions(&self) -> Box<[Self::Action]> {
        match self.history_type() {
            HistoryType::Chance => DEALS
                .iter()
                .map(|&(pl1, pl2, _)| PokerAction::Deal(pl1, pl2))
                .collect::<Vec<_>>()
                .into_boxed_slice(),
            HistoryType::Decision => match self.current_player() {
                Player::Player1 => vec![PokerAction::Fold, PokerAction::Bet].into_boxed_slice(),
                Player::Player2 => vec![PokerAction::Fold, PokerAction::Call].into_boxed_slice(),
            },
            HistoryType::Terminal => vec![].into_boxed_slice(),
        }
    }

    fn utility(&self) -> f64 {
        match (self.action_pl1, self.action_pl2) {
            (Some(PokerAction::Fold), _) => -1.0,
            (_, Some(PokerAction::Fold)) => 1.0,
            _ => {
                let (card_pl1, card_pl2) = (self.card(Player::Player1), self.card(Player::Player2));
                if card_pl1 == card_pl2 {
                    0.0
                } else if card_pl1 > card_pl2 {
                    3.0
                } else {
                    -3.0
                }
            }
        }
    }

    fn chance_prob(&self, action: &Self::Action) -> f64 {
        match action {
            PokerAction::Deal(pl1, pl2) => DEALS
                .iter()
                .find(|&&(a, b, _)| a == *pl1 && b == *pl2)
                .map(|&(_, _, prob)| prob)
                .unwrap_or(0.0),
            _ => panic!("Unexpected chance action {:?}", action),
        }
    }

    fn child(&self, action: &Self::Action) -> Self {
        let mut next = *self;
        match *action {
            PokerAction::Deal(pl1, pl2) => next.cards = Some((pl1, pl2)),
            _ => match self.current_player() {
                Player::Player1 => next.action_pl1 = Some(*action),
                Player::Player2 => next.action_pl2 = Some(*action),
            },
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn deal_probabilities_sum_to_one() {
        let root = SimplePoker::new();
        assert_eq!(root.history_type(), HistoryType::Chance);
        let total: f64 = root.actions().iter().map(|a| root.chance_prob(a)).sum();
        assert_approx_eq!(total, 1.0);
    }

    #[test]
    fn payoffs() {
        let dealt = SimplePoker::new().child(&PokerAction::Deal(Card::Queen, Card::Jack));
        assert_eq!(dealt.current_player(), Player::Player1);

        let folded = dealt.child(&PokerAction::Fold);
        assert_eq!(folded.history_type(), HistoryType::Terminal);
        assert_approx_eq!(folded.utility(), -1.0);

        let bet = dealt.child(&PokerAction::Bet);
        assert_eq!(bet.current_player(), Player::Player2);
        assert_eq!(bet.infoset(), PokerInfoset::new(Player::Player2, Card::Jack));
        assert_approx_eq!(bet.child(&PokerAction::Fold).utility(), 1.0);
        assert_approx_eq!(bet.child(&PokerAction::Call).utility(), 3.0);
    }

    #[test]
    fn infosets_are_distinct_per_player() {
        let indices = [
            PokerInfoset::new(Player::Player1, Card::Jack).index(),
            PokerInfoset::new(Player::Player1, Card::Queen).index(),
            PokerInfoset::new(Player::Player2, Card::Jack).index(),
            PokerInfoset::new(Player::Player2, Card::Queen).index(),
        ];
        assert_eq!(indices, [0, 1, 2, 3]);
    }
}
