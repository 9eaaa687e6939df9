use std::rc::Rc;

use weft::dataflow::wait_or;
use weft::records::{Arity, Cons, Record, Tuple, init_element};
use weft::store::{NodeId, NodeValue, Store};

fn quad_arity(store: &mut Store) -> Rc<Arity> {
    let label = store.atom("quad");
    let features: Vec<NodeId> = (1..=4).map(|i| store.int(i)).collect();
    Arity::new(store, label, features).expect("valid arity")
}

#[test]
fn one_bound_field_returns_its_feature_immediately() {
    let mut store = Store::new();
    let arity = quad_arity(&mut store);
    let record = Record::build(&mut store, arity);
    let value = store.atom("here");
    init_element(&mut store, record, 2, value);

    let before = store.node_count();
    let feature = wait_or(&mut store, record).expect("proceed");
    assert!(matches!(store.resolve_value(feature), NodeValue::Int(3)));
    // record features come from the arity: nothing was allocated
    assert_eq!(store.node_count(), before);
    assert!(store.drain_woken().is_empty());
}

#[test]
fn first_bound_field_wins_left_to_right() {
    let mut store = Store::new();
    let label = store.atom("t");
    let tuple = Tuple::build(&mut store, label, 3);
    let a = store.atom("a");
    init_element(&mut store, tuple, 2, a);
    let b = store.atom("b");
    init_element(&mut store, tuple, 1, b);

    let feature = wait_or(&mut store, tuple).expect("proceed");
    assert!(matches!(store.resolve_value(feature), NodeValue::Int(2)));
}

#[test]
fn all_transient_fields_suspend_then_any_bind_resumes() {
    let mut store = Store::new();
    let label = store.atom("t");
    let tuple = Tuple::build(&mut store, label, 4);

    let control = wait_or(&mut store, tuple)
        .unwrap_err()
        .suspended_on()
        .expect("suspend");
    assert!(store.is_unbound(control));
    assert!(store.drain_woken().is_empty());

    // binding any single field wakes the parked control variable
    let value = store.int(99);
    let slot = weft::records::get_element(&store, tuple, 3);
    store.bind(slot, value);
    assert_eq!(store.drain_woken(), vec![control]);

    let feature = wait_or(&mut store, tuple).expect("proceed");
    assert!(matches!(store.resolve_value(feature), NodeValue::Int(4)));
}

#[test]
fn bound_field_beats_earlier_failed_field() {
    let mut store = Store::new();
    let label = store.atom("t");
    let tuple = Tuple::build(&mut store, label, 3);

    let exception = store.atom("boom");
    let slot = weft::records::get_element(&store, tuple, 0);
    store.fail(slot, exception);
    store.drain_woken();
    let value = store.int(1);
    init_element(&mut store, tuple, 2, value);

    // bound fields are scanned before failed fields, even further right
    let feature = wait_or(&mut store, tuple).expect("proceed");
    assert!(matches!(store.resolve_value(feature), NodeValue::Int(3)));
}

#[test]
fn failed_field_propagates_when_nothing_is_bound() {
    let mut store = Store::new();
    let label = store.atom("t");
    let tuple = Tuple::build(&mut store, label, 2);

    let exception = store.atom("boom");
    let slot = weft::records::get_element(&store, tuple, 1);
    store.fail(slot, exception);
    store.drain_woken();

    let raised = wait_or(&mut store, tuple)
        .unwrap_err()
        .raised()
        .expect("raise");
    assert_eq!(store.resolve(raised), exception);
}

#[test]
fn cons_waits_like_a_two_field_tuple() {
    let mut store = Store::new();
    let cons = Cons::build(&mut store);

    let control = wait_or(&mut store, cons)
        .unwrap_err()
        .suspended_on()
        .expect("suspend");

    let value = store.int(7);
    let slot = weft::records::get_element(&store, cons, 1);
    store.bind(slot, value);
    assert_eq!(store.drain_woken(), vec![control]);

    let feature = wait_or(&mut store, cons).expect("proceed");
    assert!(matches!(store.resolve_value(feature), NodeValue::Int(2)));
}

#[test]
fn wait_or_rejects_non_aggregates_and_suspends_on_transients() {
    let mut store = Store::new();
    let int = store.int(1);
    assert!(wait_or(&mut store, int).unwrap_err().raised().is_some());

    let var = store.fresh_var();
    assert_eq!(
        wait_or(&mut store, var).unwrap_err().suspended_on(),
        Some(var)
    );
}
