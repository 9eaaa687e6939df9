use crate::store::{NodeId, NodeValue, Store};

/// Labeled aggregate with implicit integer features `1..=width`.
///
/// The tuple exclusively owns its element slots; the label node is shared.
#[derive(Debug, Clone)]
pub struct Tuple {
    label: NodeId,
    elements: Vec<NodeId>,
}

impl Tuple {
    /// Allocates a tuple of `width` freshly unbound slots.
    pub fn build(store: &mut Store, label: NodeId, width: usize) -> NodeId {
        let elements = (0..width).map(|_| store.fresh_var()).collect();
        store.alloc(NodeValue::Tuple(Tuple { label, elements }))
    }

    /// Allocates a tuple whose slots are initialized to `values`, in order.
    pub fn build_with(store: &mut Store, label: NodeId, values: &[NodeId]) -> NodeId {
        let id = Tuple::build(store, label, values.len());
        for (index, &value) in values.iter().enumerate() {
            let slot = match store.value(id) {
                NodeValue::Tuple(tuple) => tuple.element(index),
                _ => unreachable!("freshly built tuple"),
            };
            store.bind(slot, value);
        }
        id
    }

    pub(crate) fn from_parts(label: NodeId, elements: Vec<NodeId>) -> Tuple {
        Tuple { label, elements }
    }

    pub fn width(&self) -> usize {
        self.elements.len()
    }

    pub fn label(&self) -> NodeId {
        self.label
    }

    pub fn element(&self, index: usize) -> NodeId {
        self.elements[index]
    }

    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    /// True when the label is the reserved virtual-string atom `#`.
    pub fn has_sharp_label(&self, store: &Store) -> bool {
        match store.resolve_value(self.label) {
            NodeValue::Atom(text) => &**text == "#",
            _ => false,
        }
    }
}
