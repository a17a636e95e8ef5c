use crate::treeplex::SequenceId;
use efg_tree::game::InfosetId;
use std::collections::BTreeMap;

/// Records, for the solving player, which sequences extend a given sequence
/// at a given information set. Each entry becomes one realization-plan
/// constraint: the mass of the children equals the mass of the parent.
#[derive(Debug, Clone, Default)]
pub struct FlowMap {
    entries: BTreeMap<(SequenceId, InfosetId), Vec<SequenceId>>,
}

impl FlowMap {
    pub fn new() -> FlowMap {
        FlowMap {
            entries: BTreeMap::new(),
        }
    }

    /// Adds `child` as an extension of `parent` at `infoset`. Children keep
    /// the order in which they were recorded, which is action order.
    pub fn record(&mut self, parent: SequenceId, infoset: InfosetId, child: SequenceId) {
        let children = self.entries.entry((parent, infoset)).or_insert_with(Vec::new);
        debug_assert!(!children.contains(&child));
        children.push(child);
    }

    pub fn children(&self, parent: SequenceId, infoset: InfosetId) -> Option<&[SequenceId]> {
        self.entries.get(&(parent, infoset)).map(|x| &x[..])
    }

    /// Iterates over (parent sequence, infoset, children) in key order.
    pub fn iter(&self) -> impl Iterator<Item = (SequenceId, InfosetId, &[SequenceId])> {
        self.entries
            .iter()
            .map(|(&(parent, infoset), children)| (parent, infoset, &children[..]))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
