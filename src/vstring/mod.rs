//! Virtual strings: reading cons chains and sharp-labeled tuples as
//! character sequences.
//!
//! One walk serves the whole protocol, parameterized by a per-character
//! callback: counting for [`vs_length`], emitting for [`to_string`], a
//! no-op for the [`is_virtual_string`] probe. The probe converts a type
//! violation into `false`; the other paths raise. Suspension propagates on
//! every path.

use crate::{
    exceptions::raise_type_error,
    store::{Interrupt, NodeId, NodeValue, OpResult, Store},
};

/// Character codes are Latin-1 scalars; anything outside `[0, 256)` is a
/// `char` type error on the raising paths and `false` on the probe.
const CODE_LIMIT: i64 = 256;

/// Silent probe: does the value coerce to a character sequence?
pub fn is_virtual_string(store: &mut Store, value: NodeId) -> OpResult<bool> {
    match emit(store, value, &mut |_| {}) {
        Ok(()) => Ok(true),
        Err(Interrupt::Raise(_)) => Ok(false),
        Err(suspend) => Err(suspend),
    }
}

/// Decodes the value into `sink`, raising a type error on any violation.
///
/// Accepted codes are pushed as characters, so the sink holds their UTF-8
/// encoded bytes.
pub fn to_string(store: &mut Store, value: NodeId, sink: &mut String) -> OpResult<()> {
    emit(store, value, &mut |code| sink.push(char::from(code)))
}

/// Character count of the value, raising a type error on any violation.
pub fn vs_length(store: &mut Store, value: NodeId) -> OpResult<i64> {
    let mut length = 0;
    emit(store, value, &mut |_| length += 1)?;
    Ok(length)
}

fn emit(store: &mut Store, value: NodeId, on_code: &mut dyn FnMut(u8)) -> OpResult<()> {
    let value = store.resolve(value);
    match store.value(value) {
        NodeValue::Var(_) => Err(store.wait(value)),
        NodeValue::Failed(exception) => {
            let exception = *exception;
            store.raise(exception)
        }
        // nil is the empty virtual string.
        NodeValue::Atom(text) if &**text == "nil" => Ok(()),
        NodeValue::Cons(_) => each_list_code(store, value, on_code),
        NodeValue::Tuple(tuple) => {
            let sharp = tuple.has_sharp_label(store);
            let elements = tuple.elements().to_vec();
            if !sharp {
                return raise_type_error(store, "virtualString", value);
            }
            // Sharp nesting is expression-bounded, unlike list length, so
            // recursing per element is safe here.
            for element in elements {
                emit(store, element, on_code)?;
            }
            Ok(())
        }
        _ => raise_type_error(store, "virtualString", value),
    }
}

/// Iterative walk over a proper list of character codes.
fn each_list_code(store: &mut Store, list: NodeId, on_code: &mut dyn FnMut(u8)) -> OpResult<()> {
    let mut node = store.resolve(list);
    loop {
        let (head, tail) = match store.value(node) {
            NodeValue::Var(_) => return Err(store.wait(node)),
            NodeValue::Failed(exception) => {
                let exception = *exception;
                return store.raise(exception);
            }
            NodeValue::Atom(text) if &**text == "nil" => return Ok(()),
            NodeValue::Cons(cons) => (cons.head(), cons.tail()),
            _ => return raise_type_error(store, "virtualString", node),
        };

        let head = store.resolve(head);
        match store.value(head) {
            NodeValue::Var(_) => return Err(store.wait(head)),
            NodeValue::Failed(exception) => {
                let exception = *exception;
                return store.raise(exception);
            }
            NodeValue::Int(code) if (0..CODE_LIMIT).contains(code) => {
                let code = *code as u8;
                on_code(code);
            }
            _ => return raise_type_error(store, "char", head),
        }

        node = store.resolve(tail);
    }
}
