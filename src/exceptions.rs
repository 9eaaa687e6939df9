//! Exception-value construction.
//!
//! Raised exceptions are ordinary interpreter values: a tuple whose label
//! names the error kind and whose fields carry the offending data. The
//! surrounding VM catches and dispatches them; nothing here aborts the
//! process.

use crate::{
    records::tuple::Tuple,
    store::{Interrupt, NodeId, OpResult, Store},
};

/// Builds the exception value `label(args ...)`.
///
/// With no arguments the exception is the bare atom, matching how
/// zero-field error terms print.
pub fn build_exception(store: &mut Store, label: &str, args: &[NodeId]) -> NodeId {
    let label = store.atom(label);
    if args.is_empty() {
        label
    } else {
        Tuple::build_with(store, label, args)
    }
}

/// Raises `label(args ...)`.
pub fn raise<T>(store: &mut Store, label: &str, args: &[NodeId]) -> OpResult<T> {
    let exception = build_exception(store, label, args);
    Err(Interrupt::Raise(exception))
}

/// Raises `typeError(expected actual)`: `actual` does not match the
/// expected shape or type.
pub fn raise_type_error<T>(store: &mut Store, expected: &str, actual: NodeId) -> OpResult<T> {
    let expected = store.atom(expected);
    raise(store, "typeError", &[expected, actual])
}

/// Raises `illegalArity(expected actual)`: element or argument count
/// mismatch.
pub fn raise_illegal_arity<T>(store: &mut Store, expected: usize, actual: usize) -> OpResult<T> {
    let expected = store.int(expected as i64);
    let actual = store.int(actual as i64);
    raise(store, "illegalArity", &[expected, actual])
}
