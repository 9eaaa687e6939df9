use crate::store::{NodeId, NodeValue, Store};

/// Opaque forwarding wrapper around exactly one underlying value.
///
/// Feature lookup delegates to the underlying value; identity, equality,
/// cloning and both traversal hooks treat the chunk as an atomic value.
/// This is the encapsulation seam for opaque host objects.
#[derive(Debug, Clone)]
pub struct Chunk {
    underlying: NodeId,
}

impl Chunk {
    pub fn build(store: &mut Store, underlying: NodeId) -> NodeId {
        store.alloc(NodeValue::Chunk(Chunk { underlying }))
    }

    pub(crate) fn new(underlying: NodeId) -> Chunk {
        Chunk { underlying }
    }

    pub fn underlying(&self) -> NodeId {
        self.underlying
    }
}
