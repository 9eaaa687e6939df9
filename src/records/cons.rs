use crate::store::{NodeId, NodeValue, Store};

/// List cell: exactly two fields, implicit features `{1, 2}`, label fixed
/// to the pipe atom `|`.
#[derive(Debug, Clone)]
pub struct Cons {
    elements: [NodeId; 2],
}

impl Cons {
    /// Allocates a cell with two freshly unbound slots.
    pub fn build(store: &mut Store) -> NodeId {
        let elements = [store.fresh_var(), store.fresh_var()];
        store.alloc(NodeValue::Cons(Cons { elements }))
    }

    /// Allocates a cell with slots initialized to `head` and `tail`.
    pub fn build_with(store: &mut Store, head: NodeId, tail: NodeId) -> NodeId {
        let id = Cons::build(store);
        let (head_slot, tail_slot) = match store.value(id) {
            NodeValue::Cons(cons) => (cons.head(), cons.tail()),
            _ => unreachable!("freshly built cons"),
        };
        store.bind(head_slot, head);
        store.bind(tail_slot, tail);
        id
    }

    pub(crate) fn from_parts(elements: [NodeId; 2]) -> Cons {
        Cons { elements }
    }

    pub fn head(&self) -> NodeId {
        self.elements[0]
    }

    pub fn tail(&self) -> NodeId {
        self.elements[1]
    }

    pub fn element(&self, index: usize) -> NodeId {
        self.elements[index]
    }

    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }
}

/// Builds the proper list `items[0] | items[1] | ... | nil`, folding right
/// to left.
pub fn build_list(store: &mut Store, items: &[NodeId]) -> NodeId {
    let mut list = store.atoms.nil;
    for &item in items.iter().rev() {
        list = Cons::build_with(store, item, list);
    }
    list
}
