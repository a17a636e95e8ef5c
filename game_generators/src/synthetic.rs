// Randomly generated games for property tests. Every generator is seeded, so a
// given seed always yields the same tree.

use crate::explicit::{chance, decision, terminal, ExplicitHistory};
use efg_tree::game::{InfosetId, Player};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Copy, Clone)]
pub struct SyntheticConfig {
    /// Maximum number of moves (including chance) along any path.
    pub depth: usize,
    /// Number of actions per node is drawn from [2, max_actions].
    pub max_actions: usize,
    /// Probability that an internal node is a chance node.
    pub chance_frequency: f64,
    /// Probability that an internal node is cut short into a leaf.
    pub early_leaf_frequency: f64,
    /// Payoffs are integers drawn from [-payoff_range, payoff_range].
    pub payoff_range: i32,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        SyntheticConfig {
            depth: 4,
            max_actions: 3,
            chance_frequency: 0.2,
            early_leaf_frequency: 0.1,
            payoff_range: 5,
        }
    }
}

struct TreeGenerator {
    rng: ChaCha8Rng,
    config: SyntheticConfig,
    next_infoset: InfosetId,
}

impl TreeGenerator {
    fn new(seed: u64, config: SyntheticConfig) -> TreeGenerator {
        assert!(config.max_actions >= 2);
        TreeGenerator {
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            next_infoset: 0,
        }
    }

    fn payoff(&mut self) -> f64 {
        let range = self.config.payoff_range;
        self.rng.gen_range(-range, range + 1) as f64
    }

    fn num_actions(&mut self) -> usize {
        self.rng.gen_range(2, self.config.max_actions + 1)
    }

    fn perfect_information_vertex(&mut self, depth: usize) -> ExplicitHistory {
        let cut_short = depth < self.config.depth && self.rng.gen_bool(self.config.early_leaf_frequency);
        if depth == 0 || cut_short {
            return terminal(self.payoff());
        }

        let num_actions = self.num_actions();
        if self.rng.gen_bool(self.config.chance_frequency) {
            let prob = 1.0 / num_actions as f64;
            let outcomes = (0..num_actions)
                .map(|_| (prob, self.perfect_information_vertex(depth - 1)))
                .collect();
            return chance(outcomes);
        }

        let player = if self.rng.gen_bool(0.5) {
            Player::Player1
        } else {
            Player::Player2
        };
        let infoset = self.next_infoset;
        self.next_infoset += 1;
        let children = (0..num_actions)
            .map(|_| self.perfect_information_vertex(depth - 1))
            .collect();
        decision(player, infoset, children)
    }
}

/// Random tree in which every information set is a single history. Players
/// are drawn independently at each node, so either player frequently moves
/// several times in a row.
pub fn perfect_information_tree(seed: u64, config: SyntheticConfig) -> ExplicitHistory {
    let mut generator = TreeGenerator::new(seed, config);
    let root = generator.perfect_information_vertex(config.depth);
    debug!(
        "Generated perfect information tree (seed {}) with {} decision nodes",
        seed, generator.next_infoset
    );
    root
}

/// Random two-stage game with private types. Chance draws a type for each
/// player uniformly from `num_types`; Player 1 then acts knowing only its own
/// type, followed by Player 2 knowing only its own type and, if
/// `observe_first_move` is set, Player 1's action.
pub fn bayesian_game(
    seed: u64,
    num_types: usize,
    num_actions: usize,
    observe_first_move: bool,
    payoff_range: i32,
) -> ExplicitHistory {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let infoset_pl2 = |type_pl2: usize, action_pl1: usize| -> InfosetId {
        match observe_first_move {
            true => num_types + type_pl2 * num_actions + action_pl1,
            false => num_types + type_pl2,
        }
    };

    let prob = 1.0 / (num_types * num_types) as f64;
    let mut outcomes = vec![];
    for type_pl1 in 0..num_types {
        for type_pl2 in 0..num_types {
            let mut moves_pl1 = vec![];
            for action_pl1 in 0..num_actions {
                let leaves = (0..num_actions)
                    .map(|_| terminal(rng.gen_range(-payoff_range, payoff_range + 1) as f64))
                    .collect();
                moves_pl1.push(decision(
                    Player::Player2,
                    infoset_pl2(type_pl2, action_pl1),
                    leaves,
                ));
            }
            outcomes.push((prob, decision(Player::Player1, type_pl1, moves_pl1)));
        }
    }
    chance(outcomes)
}
