use efg_tree::game::InfosetId;
use libgt::SequenceId;
use optimizers::SolverError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The LP backend could not produce an optimum. For a well-formed game
    /// tree with perfect recall the sequence-form LP is always feasible and
    /// bounded, so this points at a malformed tree.
    Solver(SolverError),

    /// The realization plan returned by the backend violates a flow
    /// constraint by more than the configured tolerance. `infoset` is `None`
    /// for the constraint fixing the empty sequence to one.
    FlowViolation {
        parent: SequenceId,
        infoset: Option<InfosetId>,
        expected: f64,
        actual: f64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Solver(err) => write!(f, "{}", err),
            Error::FlowViolation {
                parent,
                infoset: Some(infoset),
                expected,
                actual,
            } => write!(
                f,
                "realization plan puts mass {} below sequence {} at infoset {}, expected {}",
                actual, parent, infoset, expected
            ),
            Error::FlowViolation {
                parent,
                infoset: None,
                expected,
                actual,
            } => write!(
                f,
                "empty sequence {} has mass {}, expected {}",
                parent, actual, expected
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Solver(err) => Some(err),
            Error::FlowViolation { .. } => None,
        }
    }
}

impl From<SolverError> for Error {
    fn from(err: SolverError) -> Error {
        Error::Solver(err)
    }
}
