use crate::model::{
    Bounds, Comparison, LinearExpression, LpSolution, Sense, SolverBackend, SolverError, Variable,
};
use log::{debug, trace};
use minilp::{ComparisonOp, OptimizationDirection, Problem};

#[derive(Debug, Clone)]
struct Row {
    name: String,
    expression: LinearExpression,
    comparison: Comparison,
    rhs: f64,
}

/// `SolverBackend` built on the pure-Rust `minilp` simplex solver.
///
/// minilp fixes objective coefficients when a column is created, so the model
/// is buffered here and handed to minilp in one go by `optimize()`. Names are
/// kept for logging only.
#[derive(Debug, Clone, Default)]
pub struct MinilpSolver {
    columns: Vec<(String, Bounds)>,
    rows: Vec<Row>,
    objective: LinearExpression,
    sense: Option<Sense>,
}

impl MinilpSolver {
    pub fn new() -> MinilpSolver {
        MinilpSolver::default()
    }

    fn direction(sense: Sense) -> OptimizationDirection {
        match sense {
            Sense::Maximize => OptimizationDirection::Maximize,
            Sense::Minimize => OptimizationDirection::Minimize,
        }
    }

    fn comparison_op(comparison: Comparison) -> ComparisonOp {
        match comparison {
            Comparison::Equal => ComparisonOp::Eq,
            Comparison::LessEqual => ComparisonOp::Le,
            Comparison::GreaterEqual => ComparisonOp::Ge,
        }
    }
}

impl SolverBackend for MinilpSolver {
    fn add_variable(&mut self, name: &str, bounds: Bounds) -> Variable {
        self.columns.push((name.to_string(), bounds));
        Variable(self.columns.len() - 1)
    }

    fn add_constraint(
        &mut self,
        name: &str,
        expression: LinearExpression,
        comparison: Comparison,
        rhs: f64,
    ) {
        debug_assert!(expression.iter().all(|(v, _)| v.index() < self.columns.len()));
        self.rows.push(Row {
            name: name.to_string(),
            expression,
            comparison,
            rhs,
        });
    }

    fn set_objective(&mut self, expression: LinearExpression, sense: Sense) {
        self.objective = expression;
        self.sense = Some(sense);
    }

    fn num_variables(&self) -> usize {
        self.columns.len()
    }

    fn num_constraints(&self) -> usize {
        self.rows.len()
    }

    fn optimize(&mut self) -> Result<LpSolution, SolverError> {
        let sense = self
            .sense
            .ok_or_else(|| SolverError::Backend("objective has not been set".to_string()))?;
        let mut problem = Problem::new(Self::direction(sense));

        let variables: Vec<minilp::Variable> = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, (_, bounds))| {
                problem.add_var(
                    self.objective.coefficient(Variable(index)),
                    (bounds.lower, bounds.upper),
                )
            })
            .collect();

        for row in self.rows.iter() {
            trace!("Adding constraint {} with {} terms", row.name, row.expression.len());
            let mut expression = minilp::LinearExpr::empty();
            for (variable, coefficient) in row.expression.iter() {
                expression.add(variables[variable.index()], coefficient);
            }
            problem.add_constraint(expression, Self::comparison_op(row.comparison), row.rhs);
        }

        debug!(
            "Solving LP with {} variables and {} constraints",
            self.columns.len(),
            self.rows.len()
        );

        let solution = problem.solve().map_err(|err| match err {
            minilp::Error::Infeasible => SolverError::Infeasible,
            minilp::Error::Unbounded => SolverError::Unbounded,
        })?;

        // minilp may report an unbounded ray as an optimum at infinity.
        let objective_value = solution.objective();
        let values: Vec<f64> = variables.iter().map(|v| *solution.var_value(*v)).collect();
        let all_values = values.iter().chain(std::iter::once(&objective_value));
        if all_values.clone().any(|x| x.is_nan()) {
            return Err(SolverError::Backend("solution contains NaN".to_string()));
        }
        if all_values.clone().any(|x| x.is_infinite()) {
            return Err(SolverError::Unbounded);
        }

        Ok(LpSolution {
            objective_value,
            values,
        })
    }
}
