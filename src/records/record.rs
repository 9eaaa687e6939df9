use std::rc::Rc;

use crate::{
    exceptions::raise_illegal_arity,
    records::arity::Arity,
    store::{NodeId, NodeValue, OpResult, Store},
};

/// Labeled aggregate with an explicit arity.
///
/// The record exclusively owns its element slots; the arity table is shared
/// (`Rc`) across every record of the same shape, never duplicated.
#[derive(Debug, Clone)]
pub struct Record {
    arity: Rc<Arity>,
    elements: Vec<NodeId>,
}

impl Record {
    /// Allocates a record of the given shape with freshly unbound slots.
    pub fn build(store: &mut Store, arity: Rc<Arity>) -> NodeId {
        let elements = (0..arity.width()).map(|_| store.fresh_var()).collect();
        store.alloc(NodeValue::Record(Record { arity, elements }))
    }

    /// Allocates a record whose slots are initialized to `values`, in arity
    /// order. Raises `illegalArity` when the count does not match the shape.
    pub fn build_with(
        store: &mut Store,
        arity: Rc<Arity>,
        values: &[NodeId],
    ) -> OpResult<NodeId> {
        if values.len() != arity.width() {
            return raise_illegal_arity(store, arity.width(), values.len());
        }
        let id = Record::build(store, arity);
        for (index, &value) in values.iter().enumerate() {
            let slot = match store.value(id) {
                NodeValue::Record(record) => record.element(index),
                _ => unreachable!("freshly built record"),
            };
            store.bind(slot, value);
        }
        Ok(id)
    }

    pub(crate) fn from_parts(arity: Rc<Arity>, elements: Vec<NodeId>) -> Record {
        Record { arity, elements }
    }

    pub fn arity(&self) -> &Rc<Arity> {
        &self.arity
    }

    pub fn width(&self) -> usize {
        self.elements.len()
    }

    pub fn element(&self, index: usize) -> NodeId {
        self.elements[index]
    }

    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }
}
