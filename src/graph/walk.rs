use std::collections::HashSet;
use std::rc::Rc;

use crate::store::{NodeId, NodeValue, OpResult, Store};

/// Structural equality over two value graphs.
///
/// An explicit work list of pending node pairs replaces recursion; a
/// visited set of in-flight pairs makes back-edges terminate (a revisited
/// pair is assumed equal). Any structural mismatch fails the whole call
/// immediately; width is checked before children are pushed so a mismatch
/// never does per-element work. Child pairs are pushed in a fixed order
/// (elements in index order, label/arity last) so the result never depends
/// on traversal details.
///
/// Chunks, space handles and names compare by identity only. A transient
/// operand suspends the caller; a failed operand forwards its exception.
pub fn equals(store: &Store, left: NodeId, right: NodeId) -> OpResult<bool> {
    let mut pending: Vec<(NodeId, NodeId)> = vec![(left, right)];
    let mut visited: HashSet<(NodeId, NodeId)> = HashSet::new();

    while let Some((left, right)) = pending.pop() {
        let left = store.resolve(left);
        let right = store.resolve(right);
        if left == right {
            continue;
        }
        if !visited.insert((left, right)) {
            continue;
        }

        match (store.value(left), store.value(right)) {
            (NodeValue::Var(_), _) => return Err(store.wait(left)),
            (_, NodeValue::Var(_)) => return Err(store.wait(right)),
            (NodeValue::Failed(exception), _) | (_, NodeValue::Failed(exception)) => {
                return store.raise(*exception);
            }
            (NodeValue::Int(a), NodeValue::Int(b)) => {
                if a != b {
                    return Ok(false);
                }
            }
            (NodeValue::Atom(a), NodeValue::Atom(b)) => {
                if a != b {
                    return Ok(false);
                }
            }
            (NodeValue::Tuple(a), NodeValue::Tuple(b)) => {
                if a.width() != b.width() {
                    return Ok(false);
                }
                for index in 0..a.width() {
                    pending.push((a.element(index), b.element(index)));
                }
                pending.push((a.label(), b.label()));
            }
            (NodeValue::Record(a), NodeValue::Record(b)) => {
                if a.width() != b.width() {
                    return Ok(false);
                }
                for index in 0..a.width() {
                    pending.push((a.element(index), b.element(index)));
                }
                let (left_arity, right_arity) = (a.arity(), b.arity());
                if !Rc::ptr_eq(left_arity, right_arity) {
                    if left_arity.width() != right_arity.width() {
                        return Ok(false);
                    }
                    for index in 0..left_arity.width() {
                        pending.push((
                            left_arity.feature_at(index),
                            right_arity.feature_at(index),
                        ));
                    }
                    pending.push((left_arity.label(), right_arity.label()));
                }
            }
            (NodeValue::Cons(a), NodeValue::Cons(b)) => {
                pending.push((a.head(), b.head()));
                pending.push((a.tail(), b.tail()));
            }
            (NodeValue::ArityTable(a), NodeValue::ArityTable(b)) => {
                if a.width() != b.width() {
                    return Ok(false);
                }
                for index in 0..a.width() {
                    pending.push((a.feature_at(index), b.feature_at(index)));
                }
                pending.push((a.label(), b.label()));
            }
            // Identity-only values: same-node pairs were skipped above.
            (NodeValue::Name(_), NodeValue::Name(_))
            | (NodeValue::Chunk(_), NodeValue::Chunk(_))
            | (NodeValue::Space(_), NodeValue::Space(_)) => return Ok(false),
            (NodeValue::Ref(_), _) | (_, NodeValue::Ref(_)) => unreachable!("resolved"),
            _ => return Ok(false),
        }
    }

    Ok(true)
}
