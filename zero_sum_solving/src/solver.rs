use crate::error::Error;
use crate::sequence_form_lp::SequenceFormLp;
use crate::zero_sum_solution::ZeroSumSolution;
use efg_tree::game::{History, Player};
use libgt::{SequenceFormBuilder, SequenceFormProgram};
use log::debug;
use optimizers::{MinilpSolver, SolverBackend};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolverConfig {
    /// Check flow conservation of the returned realization plan.
    pub validate_plan: bool,
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            validate_plan: true,
            tolerance: 1e-6,
        }
    }
}

/// Solves an already collected sequence-form program with `backend`.
pub fn solve_program<B: SolverBackend>(
    program: &SequenceFormProgram,
    backend: B,
    config: &SolverConfig,
) -> Result<ZeroSumSolution, Error> {
    let solution = SequenceFormLp::new(program, backend).solve()?;
    if config.validate_plan {
        solution
            .realization_plan
            .validate(program.flows(), config.tolerance)?;
        debug!("Realization plan of {} passed validation", program.player());
    }
    Ok(solution)
}

/// Walks the tree below `root` and solves the sequence-form LP of `player`.
pub fn solve<T: History, B: SolverBackend>(
    root: &T,
    player: Player,
    backend: B,
    config: &SolverConfig,
) -> Result<ZeroSumSolution, Error> {
    let program = SequenceFormBuilder::new(player).make_program(root);
    solve_program(&program, backend, config)
}

/// Equilibrium value of the game below `root` for `player`. Each call builds
/// and solves a fresh LP; the values for the two players are computed
/// independently and sum to zero.
pub fn root_value<T: History>(root: &T, player: Player) -> Result<f64, Error> {
    let solution = solve(root, player, MinilpSolver::new(), &SolverConfig::default())?;
    Ok(solution.game_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use game_generators::explicit::{chance, decision, expectiminimax, terminal, ExplicitHistory};
    use game_generators::kuhn::Kuhn;
    use game_generators::matrix::MatrixGame;
    use game_generators::simple_poker::SimplePoker;
    use game_generators::synthetic::{bayesian_game, perfect_information_tree, SyntheticConfig};
    use lazy_static::lazy_static;
    use optimizers::{
        Bounds, Comparison, LinearExpression, LpSolution, Sense, SolverError, Variable,
    };

    const PLAYERS: [Player; 2] = [Player::Player1, Player::Player2];

    lazy_static! {
        // Player 1 moves twice in a row, then Player 2 moves twice in a row.
        static ref CONSECUTIVE_MOVES: ExplicitHistory = decision(
            Player::Player1,
            0,
            vec![
                decision(Player::Player1, 1, vec![terminal(1.0), terminal(-2.0)]),
                decision(
                    Player::Player2,
                    2,
                    vec![
                        decision(Player::Player2, 3, vec![terminal(4.0), terminal(3.0)]),
                        terminal(5.0),
                    ],
                ),
            ],
        );

        // Player 2 cannot tell which card Player 1 holds.
        static ref HIDDEN_CARD: ExplicitHistory = chance(vec![
            (
                0.5,
                decision(
                    Player::Player1,
                    0,
                    vec![
                        terminal(-1.0),
                        decision(Player::Player2, 2, vec![terminal(1.0), terminal(2.0)]),
                    ],
                ),
            ),
            (
                0.5,
                decision(
                    Player::Player1,
                    1,
                    vec![
                        terminal(-1.0),
                        decision(Player::Player2, 2, vec![terminal(1.0), terminal(-2.0)]),
                    ],
                ),
            ),
        ]);
    }

    /// Backend which accepts a model and then refuses to solve it.
    struct FailingBackend {
        num_variables: usize,
        error: SolverError,
    }

    impl SolverBackend for FailingBackend {
        fn add_variable(&mut self, _name: &str, _bounds: Bounds) -> Variable {
            self.num_variables += 1;
            Variable(self.num_variables - 1)
        }

        fn add_constraint(&mut self, _: &str, _: LinearExpression, _: Comparison, _: f64) {}

        fn set_objective(&mut self, _expression: LinearExpression, _sense: Sense) {}

        fn num_variables(&self) -> usize {
            self.num_variables
        }

        fn num_constraints(&self) -> usize {
            0
        }

        fn optimize(&mut self) -> Result<LpSolution, SolverError> {
            Err(self.error.clone())
        }
    }

    #[test]
    fn simple_poker_values() {
        let root = SimplePoker::new();
        assert_approx_eq!(root_value(&root, Player::Player1).unwrap(), -1.0 / 6.0, 1e-6);
        assert_approx_eq!(root_value(&root, Player::Player2).unwrap(), 1.0 / 6.0, 1e-6);
    }

    #[test]
    fn kuhn_values() {
        let root = Kuhn::new();
        assert_approx_eq!(root_value(&root, Player::Player1).unwrap(), -1.0 / 18.0, 1e-6);
        assert_approx_eq!(root_value(&root, Player::Player2).unwrap(), 1.0 / 18.0, 1e-6);
    }

    #[test]
    fn matrix_games_are_fair() {
        for game in [MatrixGame::rock_paper_scissors(), MatrixGame::matching_pennies()].iter() {
            for &player in PLAYERS.iter() {
                assert_approx_eq!(root_value(game, player).unwrap(), 0.0, 1e-6);
            }
        }
    }

    #[test]
    fn matrix_game_with_saddle_point() {
        let game = MatrixGame::new(vec![vec![3.0, 1.0], vec![4.0, 2.0]]);
        assert_approx_eq!(root_value(&game, Player::Player1).unwrap(), 2.0, 1e-6);
        assert_approx_eq!(root_value(&game, Player::Player2).unwrap(), -2.0, 1e-6);
    }

    #[test]
    fn degenerate_tree() {
        let root = terminal(2.5);
        assert_approx_eq!(root_value(&root, Player::Player1).unwrap(), 2.5);
        assert_approx_eq!(root_value(&root, Player::Player2).unwrap(), -2.5);
    }

    #[test]
    fn chance_only_tree() {
        let root = chance(vec![
            (0.25, terminal(4.0)),
            (0.5, chance(vec![(0.5, terminal(-2.0)), (0.5, terminal(2.0))])),
            (0.25, terminal(-8.0)),
        ]);
        assert_approx_eq!(root_value(&root, Player::Player1).unwrap(), -1.0);
        assert_approx_eq!(root_value(&root, Player::Player2).unwrap(), 1.0);
    }

    #[test]
    fn consecutive_moves() {
        let root: &ExplicitHistory = &CONSECUTIVE_MOVES;
        assert_approx_eq!(expectiminimax(root), 3.0);
        assert_approx_eq!(root_value(root, Player::Player1).unwrap(), 3.0, 1e-6);
        assert_approx_eq!(root_value(root, Player::Player2).unwrap(), -3.0, 1e-6);
    }

    #[test]
    fn hidden_information() {
        // Player 1 always bets with card 0 and bets a third of the time
        // with card 1, which leaves Player 2 indifferent.
        let root: &ExplicitHistory = &HIDDEN_CARD;
        assert_approx_eq!(root_value(root, Player::Player1).unwrap(), 1.0 / 3.0, 1e-6);
        assert_approx_eq!(root_value(root, Player::Player2).unwrap(), -1.0 / 3.0, 1e-6);
    }

    #[test]
    fn perfect_information_matches_backward_induction() {
        for seed in 0..20 {
            let root = perfect_information_tree(seed, SyntheticConfig::default());
            let expected = expectiminimax(&root);
            assert_approx_eq!(root_value(&root, Player::Player1).unwrap(), expected, 1e-6);
            assert_approx_eq!(root_value(&root, Player::Player2).unwrap(), -expected, 1e-6);
        }
    }

    #[test]
    fn bayesian_games_are_zero_sum() {
        for seed in 0..10 {
            for &observe in [false, true].iter() {
                let root = bayesian_game(seed, 2, 3, observe, 5);
                let value_pl1 = root_value(&root, Player::Player1).unwrap();
                let value_pl2 = root_value(&root, Player::Player2).unwrap();
                assert_approx_eq!(value_pl1 + value_pl2, 0.0, 1e-6);
            }
        }
    }

    #[test]
    fn returned_plans_conserve_flow() {
        for &player in PLAYERS.iter() {
            let program = SequenceFormBuilder::new(player).make_program(&Kuhn::new());
            let config = SolverConfig {
                validate_plan: false,
                ..SolverConfig::default()
            };
            let solution = solve_program(&program, MinilpSolver::new(), &config).unwrap();
            let plan = &solution.realization_plan;

            assert_eq!(solution.player, player);
            assert_eq!(plan.len(), program.sequences().count());
            assert_approx_eq!(plan.probability(program.empty_sequence_id()).unwrap(), 1.0, 1e-6);
            for (parent, _, children) in program.flows().iter() {
                let children_mass: f64 = children.iter().map(|&c| plan.probability(c).unwrap()).sum();
                assert_approx_eq!(plan.probability(parent).unwrap(), children_mass, 1e-6);
            }
            for (_, probability) in plan.iter() {
                assert!(probability >= -1e-9);
            }
            assert!(plan.validate(program.flows(), 1e-6).is_ok());
        }
    }

    #[test]
    fn simple_poker_strategies() {
        // Infosets are indexed player * 2 + card, with the jack as card 0.
        // Both players' first action is fold.
        let program = SequenceFormBuilder::new(Player::Player1).make_program(&SimplePoker::new());
        let solution = solve_program(&program, MinilpSolver::new(), &SolverConfig::default()).unwrap();
        let strategy = solution
            .realization_plan
            .behavioral(program.flows(), program.registry());
        assert_approx_eq!(strategy[&0][0], 1.0, 1e-6);
        assert_approx_eq!(strategy[&1][1], 1.0, 1e-6);

        let program = SequenceFormBuilder::new(Player::Player2).make_program(&SimplePoker::new());
        let solution = solve_program(&program, MinilpSolver::new(), &SolverConfig::default()).unwrap();
        let strategy = solution
            .realization_plan
            .behavioral(program.flows(), program.registry());
        assert_approx_eq!(strategy[&2][0], 1.0, 1e-6);
        assert_approx_eq!(strategy[&3][1], 1.0, 1e-6);
    }

    #[test]
    fn repeated_solves_are_identical() {
        let root = Kuhn::new();
        for &player in PLAYERS.iter() {
            let first = root_value(&root, player).unwrap();
            for _ in 0..3 {
                assert_eq!(root_value(&root, player).unwrap(), first);
            }
        }
    }

    #[test]
    fn childless_opponent_vertex_is_unbounded() {
        let root = decision(
            Player::Player1,
            0,
            vec![terminal(1.0), decision(Player::Player2, 1, vec![])],
        );
        assert_eq!(
            root_value(&root, Player::Player1),
            Err(Error::Solver(SolverError::Unbounded))
        );
        let result = solve(&root, Player::Player1, MinilpSolver::new(), &SolverConfig::default());
        assert_eq!(result.unwrap_err(), Error::Solver(SolverError::Unbounded));
    }

    #[test]
    fn backend_errors_are_surfaced() {
        for error in vec![SolverError::Infeasible, SolverError::Unbounded] {
            let backend = FailingBackend {
                num_variables: 0,
                error: error.clone(),
            };
            let result = solve(&SimplePoker::new(), Player::Player1, backend, &SolverConfig::default());
            assert_eq!(result.unwrap_err(), Error::Solver(error));
        }
    }
}
