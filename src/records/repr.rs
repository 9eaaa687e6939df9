use std::fmt;

use crate::store::{NodeId, NodeValue, Store};

/// Default nesting depth for renderings; deep or cyclic structures print
/// `...` past the cutoff.
pub const MAX_DEPTH: usize = 10;

/// Depth-limited rendering of a node, `Display`-style:
/// `label(feat:val ...)` for records, `label(val ...)` for tuples,
/// `head|tail` for cons cells, `_` for transients.
pub struct Repr<'a> {
    store: &'a Store,
    node: NodeId,
    depth: usize,
}

pub fn repr(store: &Store, node: NodeId) -> Repr<'_> {
    repr_depth(store, node, MAX_DEPTH)
}

pub fn repr_depth(store: &Store, node: NodeId, depth: usize) -> Repr<'_> {
    Repr { store, node, depth }
}

/// Convenience for tests and diagnostics.
pub fn repr_string(store: &Store, node: NodeId) -> String {
    repr(store, node).to_string()
}

impl Repr<'_> {
    fn child(&self, node: NodeId) -> Repr<'_> {
        Repr {
            store: self.store,
            node,
            depth: self.depth - 1,
        }
    }

    /// Labels render at the current depth; only contents count against it.
    fn same(&self, node: NodeId) -> Repr<'_> {
        Repr {
            store: self.store,
            node,
            depth: self.depth,
        }
    }
}

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.depth == 0 {
            return write!(f, "...");
        }
        match self.store.resolve_value(self.node) {
            NodeValue::Var(_) => write!(f, "_"),
            NodeValue::Ref(_) => unreachable!("resolved"),
            NodeValue::Failed(_) => write!(f, "<failed>"),
            NodeValue::Int(value) => write!(f, "{}", value),
            NodeValue::Atom(text) => write!(f, "{}", text),
            NodeValue::Name(id) => write!(f, "<name {}>", id),
            NodeValue::ArityTable(arity) => {
                write!(f, "<arity {}(", self.same(arity.label()))?;
                if self.depth <= 1 {
                    write!(f, "...")?;
                } else {
                    for index in 0..arity.width() {
                        if index > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{}", self.child(arity.feature_at(index)))?;
                    }
                }
                write!(f, ")>")
            }
            NodeValue::Tuple(tuple) => {
                write!(f, "{}(", self.same(tuple.label()))?;
                if self.depth <= 1 {
                    write!(f, "...")?;
                } else {
                    for index in 0..tuple.width() {
                        if index > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{}", self.child(tuple.element(index)))?;
                    }
                }
                write!(f, ")")
            }
            NodeValue::Record(record) => {
                let arity = record.arity();
                write!(f, "{}(", self.same(arity.label()))?;
                if self.depth <= 1 {
                    write!(f, "...")?;
                } else {
                    for index in 0..record.width() {
                        if index > 0 {
                            write!(f, " ")?;
                        }
                        write!(
                            f,
                            "{}:{}",
                            self.child(arity.feature_at(index)),
                            self.child(record.element(index))
                        )?;
                    }
                }
                write!(f, ")")
            }
            NodeValue::Cons(cons) => {
                write!(f, "{}|{}", self.child(cons.head()), self.child(cons.tail()))
            }
            NodeValue::Chunk(_) => write!(f, "<chunk>"),
            NodeValue::Space(space) => {
                if space.is_alive() {
                    write!(f, "<space>")
                } else {
                    write!(f, "<dead space>")
                }
            }
        }
    }
}
