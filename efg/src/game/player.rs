use std::convert::TryFrom;
use std::fmt;
use std::ops::Neg;

/// The two players of a zero-sum game. `Player1` is the maximizer and is
/// addressed with index 0, `Player2` is the minimizer with index 1. Payoffs
/// throughout the workspace are expressed in `Player1` units.
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    /// Zero-indexed identity of the player.
    pub fn index(self) -> usize {
        match self {
            Player::Player1 => 0,
            Player::Player2 => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Player> {
        match index {
            0 => Some(Player::Player1),
            1 => Some(Player::Player2),
            _ => None,
        }
    }

    pub fn opponent(self) -> Player {
        -self
    }
}

impl Neg for Player {
    type Output = Player;
    fn neg(self) -> Self::Output {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }
}

impl TryFrom<usize> for Player {
    type Error = InvalidPlayer;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Player::from_index(index).ok_or(InvalidPlayer(index))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "player {}", self.index())
    }
}

/// Returned when converting an index other than 0 or 1 into a `Player`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct InvalidPlayer(pub usize);

impl fmt::Display for InvalidPlayer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid player index {}, expected 0 or 1", self.0)
    }
}

impl std::error::Error for InvalidPlayer {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        assert_eq!(Player::from_index(Player::Player1.index()), Some(Player::Player1));
        assert_eq!(Player::from_index(Player::Player2.index()), Some(Player::Player2));
        assert_eq!(Player::from_index(2), None);
    }

    #[test]
    fn negation_swaps_players() {
        assert_eq!(-Player::Player1, Player::Player2);
        assert_eq!(Player::Player2.opponent(), Player::Player1);
    }

    #[test]
    fn try_from_rejects_third_player() {
        assert_eq!(Player::try_from(1), Ok(Player::Player2));
        assert_eq!(Player::try_from(3), Err(InvalidPlayer(3)));
    }
}
