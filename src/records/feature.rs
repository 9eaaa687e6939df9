use std::cmp::Ordering;

use crate::store::{NodeId, NodeValue, Store};

/// True when the node is an atomic key a record can be indexed by:
/// an integer, an atom, or a name.
pub fn is_feature(store: &Store, id: NodeId) -> bool {
    matches!(
        store.resolve_value(id),
        NodeValue::Int(_) | NodeValue::Atom(_) | NodeValue::Name(_)
    )
}

fn kind_rank(value: &NodeValue) -> u8 {
    match value {
        NodeValue::Int(_) => 0,
        NodeValue::Atom(_) => 1,
        NodeValue::Name(_) => 2,
        other => panic!("compare_features: {} is not a feature", other.kind_name()),
    }
}

/// Strict total order over features: integers before atoms before names,
/// integers by value, atoms by text, names by creation id.
///
/// Every arity invariant depends on this order. Precondition: both nodes are
/// features; the type guard runs upstream, so a violation here panics.
pub fn compare_features(store: &Store, left: NodeId, right: NodeId) -> Ordering {
    let left = store.resolve_value(left);
    let right = store.resolve_value(right);
    match (left, right) {
        (NodeValue::Int(a), NodeValue::Int(b)) => a.cmp(b),
        (NodeValue::Atom(a), NodeValue::Atom(b)) => a.as_ref().cmp(b.as_ref()),
        (NodeValue::Name(a), NodeValue::Name(b)) => a.cmp(b),
        (a, b) => kind_rank(a).cmp(&kind_rank(b)),
    }
}
