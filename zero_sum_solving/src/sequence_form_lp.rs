use crate::error::Error;
use crate::zero_sum_solution::{RealizationPlan, ZeroSumSolution};
use efg_tree::game::{InfosetId, Player};
use libgt::{ConstraintTerm, SequenceFormProgram, SequenceId};
use log::{debug, info};
use optimizers::{Bounds, Comparison, LinearExpression, Sense, SolverBackend, Variable};
use std::collections::BTreeMap;

/// ===============================================================================================
/// Sequence-form LP of a two-player zero-sum game, written from the point of view of the solving
/// player (x) against the opponent's information sets.
///
///  Ax = a, x >= 0,  A, a are the flow constraints of the solving player and the empty sequence.
///
/// For every opponent infoset I, with key (I, b) standing for the opponent having just played
/// action b at I,
///
///  sum_{leaves below (I, b)} p_chance * u * x_seq + sum_{J nested below (I, b)} v_J  >=  v_I
///
/// where u is the payoff to Player1. The same bound is written once more for the root of the tree
/// against v_root. Player1 maximizes v_root; Player2 minimizes it, and its value is the negation.
/// All v are free.
/// ===============================================================================================
/// Number of variables:  |S| + |I_opp| + 1
/// Number of constraints: |F| + 1 + |I_opp keys| + 1
///
/// where
/// |S| = number of sequences of the solving player (including the empty sequence),
/// |F| = number of (parent sequence, infoset) flow entries of the solving player,
/// |I_opp| = number of opponent infosets carrying a value variable.
/// ===============================================================================================
pub struct SequenceFormLp<'a, B: SolverBackend> {
    program: &'a SequenceFormProgram,
    backend: B,
    realization_vars: BTreeMap<SequenceId, Variable>,
    value_vars: BTreeMap<InfosetId, Variable>,
    empty_sequence_value: Variable,
}

impl<'a, B: SolverBackend> SequenceFormLp<'a, B> {
    /// Emits all variables, constraints and the objective into `backend`.
    pub fn new(program: &'a SequenceFormProgram, mut backend: B) -> SequenceFormLp<'a, B> {
        let mut realization_vars = BTreeMap::new();
        for sequence_id in program.sequences() {
            let var = backend.add_variable(
                &format!("sequence_form_{}", sequence_id),
                Bounds::non_negative(),
            );
            realization_vars.insert(sequence_id, var);
        }

        let mut value_vars = BTreeMap::new();
        for infoset_id in program.constraints().value_infosets() {
            let var = backend.add_variable(&format!("infoset_value_{}", infoset_id), Bounds::free());
            value_vars.insert(infoset_id, var);
        }
        let empty_sequence_value = backend.add_variable("empty_sequence_value", Bounds::free());

        let mut lp = SequenceFormLp {
            program,
            backend,
            realization_vars,
            value_vars,
            empty_sequence_value,
        };
        lp.make_sequence_form_constraints();
        lp.make_value_constraints();
        lp.set_objective();

        debug!(
            "Sequence-form LP for {}: {} variables, {} constraints",
            program.player(),
            lp.backend.num_variables(),
            lp.backend.num_constraints()
        );
        lp
    }

    pub fn num_variables(&self) -> usize {
        self.backend.num_variables()
    }

    pub fn num_constraints(&self) -> usize {
        self.backend.num_constraints()
    }

    /// Runs the backend and reads back the game value and realization plan.
    pub fn solve(mut self) -> Result<ZeroSumSolution, Error> {
        let player = self.program.player();
        let solution = self.backend.optimize()?;

        let game_value = match player {
            Player::Player1 => solution.objective_value,
            Player::Player2 => -solution.objective_value,
        };
        info!("Game value for {}: {}", player, game_value);

        let probabilities = self
            .realization_vars
            .iter()
            .map(|(&sequence_id, &var)| (sequence_id, solution.value(var)))
            .collect();
        let plan = RealizationPlan::new(player, self.program.empty_sequence_id(), probabilities);

        Ok(ZeroSumSolution::new(player, game_value, plan))
    }

    /// Flow conservation of the solving player, plus unit mass on the empty
    /// sequence.
    fn make_sequence_form_constraints(&mut self) {
        let empty_sequence_id = self.program.empty_sequence_id();
        let expression = LinearExpression::new().with(self.realization_vars[&empty_sequence_id], 1f64);
        self.backend.add_constraint(
            "sequence_form_empty_sequence",
            expression,
            Comparison::Equal,
            1f64,
        );

        for (parent, infoset, children) in self.program.flows().iter() {
            let mut expression = LinearExpression::new();
            for child in children {
                expression.add(self.realization_vars[child], 1f64);
            }
            expression.add(self.realization_vars[&parent], -1f64);
            self.backend.add_constraint(
                &format!("sequence_form_{}_{}", parent, infoset),
                expression,
                Comparison::Equal,
                0f64,
            );
        }
    }

    /// One payoff-bounding constraint per accumulator entry.
    fn make_value_constraints(&mut self) {
        let comparison = match self.program.player() {
            Player::Player1 => Comparison::GreaterEqual,
            Player::Player2 => Comparison::LessEqual,
        };

        let mut rows = Vec::with_capacity(self.program.constraints().len());
        for (key, terms) in self.program.constraints().iter() {
            let bounded = match key.infoset() {
                Some(infoset) => self.value_vars[&infoset],
                None => self.empty_sequence_value,
            };
            rows.push((*key, self.value_expression(terms, bounded)));
        }

        for (key, expression) in rows {
            self.backend
                .add_constraint(&format!("value_{}", key), expression, comparison, 0f64);
        }
    }

    fn value_expression(&self, terms: &[ConstraintTerm], bounded: Variable) -> LinearExpression {
        let mut expression = LinearExpression::new();
        for term in terms {
            match *term {
                ConstraintTerm::Payoff {
                    sequence,
                    probability,
                    payoff,
                } => expression.add(self.realization_vars[&sequence], probability * payoff),
                ConstraintTerm::Nested { infoset, .. } => {
                    expression.add(self.value_vars[&infoset], 1f64)
                }
            }
        }
        expression.add(bounded, -1f64);
        expression
    }

    fn set_objective(&mut self) {
        let sense = match self.program.player() {
            Player::Player1 => Sense::Maximize,
            Player::Player2 => Sense::Minimize,
        };
        let objective = LinearExpression::new().with(self.empty_sequence_value, 1f64);
        self.backend.set_objective(objective, sense);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_generators::explicit::terminal;
    use game_generators::simple_poker::SimplePoker;
    use libgt::SequenceFormBuilder;
    use optimizers::MinilpSolver;

    #[test]
    fn degenerate_tree_model_size() {
        let root = terminal(2.5);
        let program = SequenceFormBuilder::new(Player::Player1).make_program(&root);
        let lp = SequenceFormLp::new(&program, MinilpSolver::new());
        // Empty sequence and root value; unit mass and root bound.
        assert_eq!(lp.num_variables(), 2);
        assert_eq!(lp.num_constraints(), 2);
    }

    #[test]
    fn simple_poker_model_size() {
        for &player in [Player::Player1, Player::Player2].iter() {
            let program = SequenceFormBuilder::new(player).make_program(&SimplePoker::new());
            let num_sequences = program.sequences().count();
            let num_values = program.constraints().value_infosets().len();
            let lp = SequenceFormLp::new(&program, MinilpSolver::new());
            assert_eq!(lp.num_variables(), num_sequences + num_values + 1);
            assert_eq!(
                lp.num_constraints(),
                1 + program.flows().len() + program.constraints().len()
            );
        }
    }
}
