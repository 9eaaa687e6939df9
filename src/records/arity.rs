use std::rc::Rc;

use crate::{
    exceptions::raise_type_error,
    graph,
    records::feature::{compare_features, is_feature},
    store::{NodeId, NodeValue, OpResult, Store},
};

/// Shape of a record: a label plus a strictly increasing feature sequence.
///
/// Built once by [`Arity::new`], immutable thereafter, and shared (`Rc`)
/// across every record of the same shape. The feature sequence is sorted at
/// construction and never re-sorted.
#[derive(Debug)]
pub struct Arity {
    label: NodeId,
    features: Vec<NodeId>,
}

impl Arity {
    /// Validates, sorts and freezes a feature sequence.
    ///
    /// Suspends on a transient key; raises a type error on a non-feature
    /// key or a duplicated feature.
    pub fn new(store: &mut Store, label: NodeId, features: Vec<NodeId>) -> OpResult<Rc<Arity>> {
        let mut resolved = Vec::with_capacity(features.len());
        for feature in features {
            let feature = store.resolve(feature);
            match store.value(feature) {
                NodeValue::Var(_) => return Err(store.wait(feature)),
                NodeValue::Failed(exception) => {
                    let exception = *exception;
                    return store.raise(exception);
                }
                _ => {}
            }
            if !is_feature(store, feature) {
                return raise_type_error(store, "feature", feature);
            }
            resolved.push(feature);
        }

        resolved.sort_by(|&a, &b| compare_features(store, a, b));
        for pair in resolved.windows(2) {
            if compare_features(store, pair[0], pair[1]).is_eq() {
                return raise_type_error(store, "distinctFeature", pair[1]);
            }
        }

        Ok(Rc::new(Arity {
            label,
            features: resolved,
        }))
    }

    pub(crate) fn from_parts(label: NodeId, features: Vec<NodeId>) -> Arity {
        Arity { label, features }
    }

    pub fn width(&self) -> usize {
        self.features.len()
    }

    pub fn label(&self) -> NodeId {
        self.label
    }

    pub fn feature_at(&self, index: usize) -> NodeId {
        self.features[index]
    }

    pub fn features(&self) -> &[NodeId] {
        &self.features
    }

    /// Dichotomic search for `key` over the sorted feature sequence,
    /// O(log width).
    ///
    /// Suspends on a transient key; raises a type error on a non-feature.
    pub fn lookup_feature(&self, store: &mut Store, key: NodeId) -> OpResult<Option<usize>> {
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

        let mut lo = 0;
        let mut hi = self.features.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match compare_features(store, key, self.features[mid]) {
                std::cmp::Ordering::Equal => return Ok(Some(mid)),
                std::cmp::Ordering::Less => hi = mid,
                std::cmp::Ordering::Greater => lo = mid + 1,
            }
        }
        Ok(None)
    }
}

/// Structural arity equality: same width, pairwise-equal features, equal
/// label. Shared tables short-circuit on pointer identity.
pub fn arities_equal(store: &mut Store, left: &Rc<Arity>, right: &Rc<Arity>) -> OpResult<bool> {
    if Rc::ptr_eq(left, right) {
        return Ok(true);
    }
    if left.width() != right.width() {
        return Ok(false);
    }
    for index in 0..left.width() {
        if !graph::equals(store, left.feature_at(index), right.feature_at(index))? {
            return Ok(false);
        }
    }
    graph::equals(store, left.label(), right.label())
}
