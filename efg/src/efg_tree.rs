/// Abstract description of two-player zero-sum extensive-form games.
///
/// Game implementations expose their tree through the `History` trait, one
/// value per node. Nothing in this crate knows how a tree is stored; the
/// sequence-form machinery in `libgt` only ever walks it through `History`.
pub mod game;
