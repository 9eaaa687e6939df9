use std::rc::Rc;

use crate::{
    records::{arity::Arity, chunk::Chunk, cons::Cons, record::Record, tuple::Tuple},
    space::ReifiedSpace,
};

/// Stable handle to a node in a [`super::Store`].
///
/// Handles are never invalidated while their store is alive; a bound
/// variable keeps its handle and forwards through a `Ref` node instead of
/// being relocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An unbound dataflow variable.
///
/// `suspensions` holds the control variables parked on this slot by
/// [`crate::dataflow::wait_or`]; binding the variable moves them onto the
/// store's wake queue.
#[derive(Debug, Clone, Default)]
pub struct Variable {
    pub(crate) suspensions: Vec<NodeId>,
}

/// Contents of a store node.
///
/// This is the closed variant set of the interpreter core. Generic
/// operations (equality, copy, printing) dispatch over it with exhaustive
/// matches; adding a variant deliberately breaks every traversal until it is
/// handled.
///
/// Structural equality is the job of [`crate::graph::equals`], so this type
/// intentionally does not implement `PartialEq`.
#[derive(Debug, Clone)]
pub enum NodeValue {
    /// Transient: an unbound logical variable.
    Var(Variable),
    /// Binding indirection: a bound variable forwards to its value.
    Ref(NodeId),
    /// Terminal failure marker carrying an exception value.
    Failed(NodeId),
    /// 64-bit signed integer.
    Int(i64),
    /// Symbolic constant, compared by text.
    Atom(Rc<str>),
    /// Globally fresh name, compared by creation id.
    Name(u64),
    /// First-class arity table (label + sorted features).
    ArityTable(Rc<Arity>),
    /// Labeled aggregate with implicit features `1..N`.
    Tuple(Tuple),
    /// Labeled aggregate with an explicit arity.
    Record(Record),
    /// List cell: two fields, label fixed to `|`.
    Cons(Cons),
    /// Opaque forwarding wrapper around one underlying value.
    Chunk(Chunk),
    /// Reified computation-space handle.
    Space(ReifiedSpace),
}

impl NodeValue {
    /// Canonical type label used in diagnostics and exception values.
    ///
    /// These labels are user-visible and are expected to remain stable.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeValue::Var(_) => "variable",
            NodeValue::Ref(_) => "reference",
            NodeValue::Failed(_) => "failed",
            NodeValue::Int(_) => "int",
            NodeValue::Atom(_) => "atom",
            NodeValue::Name(_) => "name",
            NodeValue::ArityTable(_) => "arity",
            NodeValue::Tuple(_) => "tuple",
            NodeValue::Record(_) => "record",
            NodeValue::Cons(_) => "cons",
            NodeValue::Chunk(_) => "chunk",
            NodeValue::Space(_) => "space",
        }
    }
}
