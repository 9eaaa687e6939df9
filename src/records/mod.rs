//! The labeled-aggregate family and its shared capability contract.
//!
//! Four variants sit behind one dispatch surface: tuples (implicit integer
//! features), records (explicit arity), cons cells (fixed two fields,
//! label `|`) and chunks (opaque forwarding wrappers). Dispatch is an
//! exhaustive match over the closed [`NodeValue`] variant set; every
//! operation uniformly suspends on a transient operand, forwards a failed
//! operand's exception, and raises a `record` type error on anything that
//! is not an aggregate.

use std::rc::Rc;

use crate::{
    exceptions::raise_type_error,
    graph,
    store::{NodeId, NodeValue, OpResult, Store},
};

pub mod arity;
pub mod chunk;
pub mod cons;
pub mod feature;
pub mod record;
pub mod repr;
pub mod tuple;


pub use arity::{Arity, arities_equal};
pub use chunk::Chunk;
pub use cons::{Cons, build_list};
pub use feature::{compare_features, is_feature};
pub use record::Record;
pub use repr::{repr, repr_depth, repr_string};
pub use tuple::Tuple;

/// Owned decomposition of an aggregate, used by operations that interleave
/// reads with store mutation. Chunks are deliberately not a shape: only
/// feature lookup sees through them.
pub(crate) enum Shape {
    Tuple {
        label: NodeId,
        elements: Vec<NodeId>,
    },
    Record {
        arity: Rc<Arity>,
        elements: Vec<NodeId>,
    },
    Cons {
        elements: [NodeId; 2],
    },
}

impl Shape {
    pub(crate) fn width(&self) -> usize {
        self.elements().len()
    }

    pub(crate) fn elements(&self) -> &[NodeId] {
        match self {
            Shape::Tuple { elements, .. } => elements,
            Shape::Record { elements, .. } => elements,
            Shape::Cons { elements } => elements,
        }
    }

    /// The feature indexing element `index`: a fresh integer node for the
    /// implicit `1..=width` range, the arity's feature for records.
    pub(crate) fn feature_at(&self, store: &mut Store, index: usize) -> NodeId {
        match self {
            Shape::Tuple { .. } | Shape::Cons { .. } => store.int(index as i64 + 1),
            Shape::Record { arity, .. } => arity.feature_at(index),
        }
    }
}

/// Decomposes an aggregate; suspends on a transient, forwards a failure,
/// raises a `record` type error otherwise (chunks included).
pub(crate) fn shape(store: &mut Store, aggregate: NodeId) -> OpResult<Shape> {
    let aggregate = store.resolve(aggregate);
    match store.value(aggregate) {
        NodeValue::Var(_) => Err(store.wait(aggregate)),
        NodeValue::Failed(exception) => {
            let exception = *exception;
            store.raise(exception)
        }
        NodeValue::Tuple(tuple) => Ok(Shape::Tuple {
            label: tuple.label(),
            elements: tuple.elements().to_vec(),
        }),
        NodeValue::Record(record) => Ok(Shape::Record {
            arity: record.arity().clone(),
            elements: record.elements().to_vec(),
        }),
        NodeValue::Cons(cons) => Ok(Shape::Cons {
            elements: [cons.head(), cons.tail()],
        }),
        _ => raise_type_error(store, "record", aggregate),
    }
}

/// Slot handle of element `index`. Unchecked contract: panics on a
/// non-aggregate, on a chunk, or out of bounds.
pub fn get_element(store: &Store, aggregate: NodeId, index: usize) -> NodeId {
    match store.resolve_value(aggregate) {
        NodeValue::Tuple(tuple) => tuple.element(index),
        NodeValue::Record(record) => record.element(index),
        NodeValue::Cons(cons) => cons.element(index),
        other => panic!("get_element: {} has no element slots", other.kind_name()),
    }
}

/// Initializes element `index` (single assignment). Panics if the slot was
/// already initialized.
pub fn init_element(store: &mut Store, aggregate: NodeId, index: usize, value: NodeId) {
    let slot = get_element(store, aggregate, index);
    store.bind(slot, value);
}

pub fn width(store: &mut Store, aggregate: NodeId) -> OpResult<usize> {
    Ok(shape(store, aggregate)?.width())
}

pub fn label(store: &mut Store, aggregate: NodeId) -> OpResult<NodeId> {
    match shape(store, aggregate)? {
        Shape::Tuple { label, .. } => Ok(label),
        Shape::Record { arity, .. } => Ok(arity.label()),
        Shape::Cons { .. } => Ok(store.atoms.pipe),
    }
}

/// The feature indexing element `index`. Panics out of bounds.
pub fn feature_at(store: &mut Store, aggregate: NodeId, index: usize) -> OpResult<NodeId> {
    let shape = shape(store, aggregate)?;
    assert!(
        index < shape.width(),
        "feature_at: index {} out of range for width {}",
        index,
        shape.width()
    );
    Ok(shape.feature_at(store, index))
}

/// The aggregate's features as an ascending list, built right-to-left by
/// prepending onto `nil`.
pub fn arity_list(store: &mut Store, aggregate: NodeId) -> OpResult<NodeId> {
    let shape = shape(store, aggregate)?;
    let mut features = Vec::with_capacity(shape.width());
    for index in 0..shape.width() {
        features.push(shape.feature_at(store, index));
    }

    let mut list = store.atoms.nil;
    for &feature in features.iter().rev() {
        list = Cons::build_with(store, feature, list);
    }
    Ok(list)
}

/// Feature lookup. Tuples and cons cells answer integer keys with O(1)
/// bounds arithmetic; records delegate to their arity's binary search;
/// chunks forward opaquely to their underlying value.
///
/// Returns the element slot when found, `None` when the aggregate has no
/// such feature. Raises a `feature` type error on a non-feature key.
pub fn lookup_feature(store: &mut Store, value: NodeId, key: NodeId) -> OpResult<Option<NodeId>> {
    let mut target = store.resolve(value);
    while let NodeValue::Chunk(chunk) = store.value(target) {
        target = store.resolve(chunk.underlying());
    }

    let key = store.resolve(key);
    match store.value(key) {
        NodeValue::Var(_) => return Err(store.wait(key)),
        NodeValue::Failed(exception) => {
            let exception = *exception;
            return store.raise(exception);
        }
        _ => {}
    }
    if !is_feature(store, key) {
        return raise_type_error(store, "feature", key);
    }

    match store.value(target) {
        NodeValue::Var(_) => Err(store.wait(target)),
        NodeValue::Failed(exception) => {
            let exception = *exception;
            store.raise(exception)
        }
        NodeValue::Tuple(tuple) => Ok(implicit_lookup(
            store.value(key),
            tuple.elements(),
        )),
        NodeValue::Cons(cons) => Ok(implicit_lookup(store.value(key), cons.elements())),
        NodeValue::Record(record) => {
            let arity = record.arity().clone();
            let elements = record.elements().to_vec();
            let index = arity.lookup_feature(store, key)?;
            Ok(index.map(|index| elements[index]))
        }
        _ => raise_type_error(store, "record", target),
    }
}

/// Integer-key convenience over [`lookup_feature`].
pub fn lookup_feature_int(
    store: &mut Store,
    value: NodeId,
    key: i64,
) -> OpResult<Option<NodeId>> {
    let key = store.int(key);
    lookup_feature(store, value, key)
}

fn implicit_lookup(key: &NodeValue, elements: &[NodeId]) -> Option<NodeId> {
    match key {
        NodeValue::Int(index) if *index >= 1 && (*index as usize) <= elements.len() => {
            Some(elements[*index as usize - 1])
        }
        _ => None,
    }
}

/// True only for a record whose arity structurally equals the candidate
/// arity table.
pub fn test_record(store: &mut Store, value: NodeId, candidate: NodeId) -> OpResult<bool> {
    let value = store.resolve(value);
    match store.value(value) {
        NodeValue::Var(_) => Err(store.wait(value)),
        NodeValue::Failed(exception) => {
            let exception = *exception;
            store.raise(exception)
        }
        NodeValue::Record(record) => {
            let own = record.arity().clone();
            let candidate = store.resolve(candidate);
            match store.value(candidate) {
                NodeValue::Var(_) => Err(store.wait(candidate)),
                NodeValue::ArityTable(table) => {
                    let table = table.clone();
                    arities_equal(store, &own, &table)
                }
                _ => raise_type_error(store, "arity", candidate),
            }
        }
        _ => Ok(false),
    }
}

/// True only for a tuple or cons cell with equal label and matching width.
pub fn test_tuple(
    store: &mut Store,
    value: NodeId,
    label: NodeId,
    width: usize,
) -> OpResult<bool> {
    let value = store.resolve(value);
    match store.value(value) {
        NodeValue::Var(_) => Err(store.wait(value)),
        NodeValue::Failed(exception) => {
            let exception = *exception;
            store.raise(exception)
        }
        NodeValue::Tuple(tuple) => {
            if tuple.width() != width {
                return Ok(false);
            }
            let own = tuple.label();
            graph::equals(store, own, label)
        }
        NodeValue::Cons(_) => Ok(width == 2 && is_pipe_atom(store, label)),
        _ => Ok(false),
    }
}

/// Label equality only.
pub fn test_label(store: &mut Store, value: NodeId, label: NodeId) -> OpResult<bool> {
    let value = store.resolve(value);
    match store.value(value) {
        NodeValue::Var(_) => Err(store.wait(value)),
        NodeValue::Failed(exception) => {
            let exception = *exception;
            store.raise(exception)
        }
        NodeValue::Tuple(tuple) => {
            let own = tuple.label();
            graph::equals(store, own, label)
        }
        NodeValue::Record(record) => {
            let own = record.arity().label();
            graph::equals(store, own, label)
        }
        NodeValue::Cons(_) => Ok(is_pipe_atom(store, label)),
        _ => Ok(false),
    }
}

fn is_pipe_atom(store: &Store, label: NodeId) -> bool {
    matches!(store.resolve_value(label), NodeValue::Atom(text) if &**text == "|")
}

/// Partial copy: a new aggregate of the same shape with every slot freshly
/// unbound. Bindings are never carried over; this is the template used to
/// re-run a computation against a fresh record.
pub fn clone_unbound(store: &mut Store, aggregate: NodeId) -> OpResult<NodeId> {
    match shape(store, aggregate)? {
        Shape::Tuple { label, elements } => Ok(Tuple::build(store, label, elements.len())),
        Shape::Record { arity, .. } => Ok(Record::build(store, arity)),
        Shape::Cons { .. } => Ok(Cons::build(store)),
    }
}
