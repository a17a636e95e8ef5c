use std::collections::BTreeMap;
use std::fmt;

/// Handle of a continuous variable inside one backend model. Handles are
/// numbered from zero in order of creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(pub usize);

impl Variable {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Lower and upper bound of a variable. Infinite values are allowed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn non_negative() -> Bounds {
        Bounds {
            lower: 0f64,
            upper: std::f64::INFINITY,
        }
    }

    pub fn free() -> Bounds {
        Bounds {
            lower: std::f64::NEG_INFINITY,
            upper: std::f64::INFINITY,
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::non_negative()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    LessEqual,
    GreaterEqual,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// Sparse linear combination of variables. Coefficients of a variable added
/// several times are summed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpression {
    coefficients: BTreeMap<Variable, f64>,
}

impl LinearExpression {
    pub fn new() -> LinearExpression {
        LinearExpression {
            coefficients: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, variable: Variable, coefficient: f64) {
        *self.coefficients.entry(variable).or_insert(0f64) += coefficient;
    }

    pub fn with(mut self, variable: Variable, coefficient: f64) -> LinearExpression {
        self.add(variable, coefficient);
        self
    }

    pub fn coefficient(&self, variable: Variable) -> f64 {
        self.coefficients.get(&variable).cloned().unwrap_or(0f64)
    }

    /// Nonzero (variable, coefficient) pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.coefficients
            .iter()
            .filter(|entry| *entry.1 != 0f64)
            .map(|(&variable, &coefficient)| (variable, coefficient))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Optimal objective value and the value of every variable, indexed by
/// `Variable`.
#[derive(Debug, Clone)]
pub struct LpSolution {
    pub objective_value: f64,
    pub values: Vec<f64>,
}

impl LpSolution {
    pub fn value(&self, variable: Variable) -> f64 {
        self.values[variable.index()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    Infeasible,
    Unbounded,
    /// Any other failure reported by the backend.
    Backend(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::Infeasible => write!(f, "linear program is infeasible"),
            SolverError::Unbounded => write!(f, "linear program is unbounded"),
            SolverError::Backend(message) => write!(f, "solver backend failed: {}", message),
        }
    }
}

impl std::error::Error for SolverError {}

/// Minimal interface of a linear programming engine: continuous variables,
/// linear constraints, a linear objective, and a blocking solve.
pub trait SolverBackend {
    fn add_variable(&mut self, name: &str, bounds: Bounds) -> Variable;

    fn add_constraint(
        &mut self,
        name: &str,
        expression: LinearExpression,
        comparison: Comparison,
        rhs: f64,
    );

    fn set_objective(&mut self, expression: LinearExpression, sense: Sense);

    fn num_variables(&self) -> usize;
    fn num_constraints(&self) -> usize;

    /// Solves the model built so far.
    fn optimize(&mut self) -> Result<LpSolution, SolverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_are_merged() {
        let expression = LinearExpression::new()
            .with(Variable(3), 1.5)
            .with(Variable(1), 2.0)
            .with(Variable(3), -0.5)
            .with(Variable(2), 1.0)
            .with(Variable(2), -1.0);
        assert_eq!(
            expression.iter().collect::<Vec<_>>(),
            vec![(Variable(1), 2.0), (Variable(3), 1.0)]
        );
        assert_eq!(expression.coefficient(Variable(2)), 0.0);
        assert_eq!(expression.len(), 2);
    }
}
