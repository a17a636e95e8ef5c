// Small games exposed through `efg_tree::game::History`, used to exercise and
// calibrate the sequence-form solver.

pub mod explicit;
pub mod kuhn;
pub mod matrix;
pub mod simple_poker;
pub mod synthetic;
