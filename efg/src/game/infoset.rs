/// Opaque identity of an information set. Two histories belong to the same
/// information set iff their `Infoset::index()` values are equal.
pub type InfosetId = usize;

/// Position of an action in the ordered action list of an information set.
pub type ActionIndex = usize;

/// Handle returned by `History::infoset()`.
pub trait Infoset {
    fn index(&self) -> InfosetId;
}

impl Infoset for InfosetId {
    fn index(&self) -> InfosetId {
        *self
    }
}
