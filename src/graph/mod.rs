//! Walk-stack traversals over the value graph.
//!
//! Node graphs are program-controlled in depth and may contain back-edges,
//! so structural equality and the copy passes run on explicit work lists,
//! never on native recursion. Both assume the single-writer invariant: the
//! traversed region is not mutated while a pass runs.

pub mod copy;
pub mod walk;

pub use copy::{CopyStats, clone_subgraph, collect};
pub use walk::equals;
