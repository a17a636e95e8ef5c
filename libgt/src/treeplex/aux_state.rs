use crate::treeplex::SequenceId;
use efg_tree::game::Player;

/// `AuxState` records a succinct summary of the path taken in the game tree
/// traversal: the sequence each player has played so far and the cumulative
/// probability of the chance outcomes on the path.
#[derive(Debug, Clone, Copy)]
pub struct AuxState {
    /// Last sequence that Player 1 took prior to this state.
    pub prev_seq_pl1: SequenceId,

    /// Last sequence that Player 2 took prior to this state.
    pub prev_seq_pl2: SequenceId,

    /// Product of chance probabilities taken before reaching this state.
    pub chance_factor: f64,
}

impl AuxState {
    pub fn new(prev_seq_pl1: SequenceId, prev_seq_pl2: SequenceId) -> AuxState {
        AuxState {
            prev_seq_pl1,
            prev_seq_pl2,
            chance_factor: 1.0,
        }
    }

    pub fn prev_seq(&self, player: Player) -> SequenceId {
        match player {
            Player::Player1 => self.prev_seq_pl1,
            Player::Player2 => self.prev_seq_pl2,
        }
    }

    /// Create a new auxillary state with only the chance factor modified.
    pub fn new_with_updated_chance(&self, chance_to_multiply: f64) -> AuxState {
        AuxState {
            chance_factor: chance_to_multiply * self.chance_factor,
            ..*self
        }
    }

    /// Create a new auxillary state with exactly one of the player's sequences modified.
    pub fn new_with_updated_sequence(&self, player: Player, new_seq: SequenceId) -> AuxState {
        match player {
            Player::Player1 => AuxState {
                prev_seq_pl1: new_seq,
                ..*self
            },
            Player::Player2 => AuxState {
                prev_seq_pl2: new_seq,
                ..*self
            },
        }
    }
}
