mod aux_state;
mod builder;
mod constraints;
mod flow;
mod registry;
mod util;

pub use self::aux_state::AuxState;
pub use self::builder::{SequenceFormBuilder, SequenceFormProgram};
pub use self::constraints::{ConstraintAccumulator, ConstraintKey, ConstraintTerm};
pub use self::flow::FlowMap;
pub use self::registry::SequenceRegistry;
pub use self::util::{Sequence, SequenceId, SequenceStep};
