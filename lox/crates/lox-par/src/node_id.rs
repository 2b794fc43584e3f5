//! Stable per-node identity for expression nodes.
//!
//! The resolver keys its distance side-table on this id rather than on
//! pointer identity, so the table survives moves/clones of the tree.

use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const DUMMY: NodeId = NodeId(u32::MAX);
}

/// Generator for unique [`NodeId`]s, one per parser.
pub struct NodeIdGenerator {
    counter: AtomicU32,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self { counter: AtomicU32::new(0) }
    }

    pub fn next(&self) -> NodeId {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        if id == u32::MAX {
            panic!("NodeId overflow! parsed more expression nodes than fit in a u32.");
        }
        NodeId(id)
    }
}

impl Default for NodeIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
