use weft::graph::equals;
use weft::records::{Cons, Record, Tuple, init_element};
use weft::records::Arity;
use weft::store::{NodeId, Store};

fn pair(store: &mut Store, label: &str, a: i64, b: i64) -> NodeId {
    let label = store.atom(label);
    let a = store.int(a);
    let b = store.int(b);
    Tuple::build_with(store, label, &[a, b])
}

#[test]
fn equality_is_reflexive_and_symmetric() {
    let mut store = Store::new();
    let left = pair(&mut store, "p", 1, 2);
    let right = pair(&mut store, "p", 1, 2);

    assert_eq!(equals(&store, left, left), Ok(true));
    assert_eq!(equals(&store, left, right), Ok(true));
    assert_eq!(equals(&store, right, left), Ok(true));
}

#[test]
fn tuples_differ_on_label_width_or_elements() {
    let mut store = Store::new();
    let base = pair(&mut store, "p", 1, 2);

    let other_label = pair(&mut store, "q", 1, 2);
    assert_eq!(equals(&store, base, other_label), Ok(false));

    let other_element = pair(&mut store, "p", 1, 3);
    assert_eq!(equals(&store, base, other_element), Ok(false));

    let label = store.atom("p");
    let one = store.int(1);
    let wider = Tuple::build_with(&mut store, label, &[one]);
    assert_eq!(equals(&store, base, wider), Ok(false));
}

#[test]
fn width_mismatch_short_circuits_before_elements() {
    let mut store = Store::new();
    // Elements are still transient: inspecting any of them would suspend,
    // so a false result proves the width check ran first.
    let label = store.atom("p");
    let two_wide = Tuple::build(&mut store, label, 2);
    let label = store.atom("p");
    let three_wide = Tuple::build(&mut store, label, 3);

    assert_eq!(equals(&store, two_wide, three_wide), Ok(false));
}

#[test]
fn equality_terminates_on_cyclic_graphs() {
    let mut store = Store::new();
    let label = store.atom("loop");
    let left = Tuple::build(&mut store, label, 1);
    init_element(&mut store, left, 0, left);

    let label = store.atom("loop");
    let right = Tuple::build(&mut store, label, 1);
    init_element(&mut store, right, 0, right);

    assert_eq!(equals(&store, left, right), Ok(true));
    assert_eq!(equals(&store, right, left), Ok(true));
}

#[test]
fn cyclic_graphs_with_different_spines_are_unequal() {
    let mut store = Store::new();
    let label = store.atom("loop");
    let left = Tuple::build(&mut store, label, 1);
    init_element(&mut store, left, 0, left);

    // same self-referential shape, different label
    let other = store.atom("other");
    let right = Tuple::build(&mut store, other, 1);
    init_element(&mut store, right, 0, right);

    assert_eq!(equals(&store, left, right), Ok(false));
}

#[test]
fn records_compare_arity_and_elements() {
    let mut store = Store::new();

    let build = |store: &mut Store, value: i64| {
        let label = store.atom("point");
        let x = store.atom("x");
        let arity = Arity::new(store, label, vec![x]).unwrap();
        let v = store.int(value);
        Record::build_with(store, arity, &[v]).unwrap()
    };

    let left = build(&mut store, 5);
    let right = build(&mut store, 5);
    let different = build(&mut store, 6);

    assert_eq!(equals(&store, left, right), Ok(true));
    assert_eq!(equals(&store, left, different), Ok(false));
}

#[test]
fn cons_chains_compare_pairwise() {
    let mut store = Store::new();
    let one = store.int(1);
    let two = store.int(2);
    let nil = store.atoms.nil;
    let inner = Cons::build_with(&mut store, two, nil);
    let left = Cons::build_with(&mut store, one, inner);

    let one = store.int(1);
    let two = store.int(2);
    let nil = store.atoms.nil;
    let inner = Cons::build_with(&mut store, two, nil);
    let right = Cons::build_with(&mut store, one, inner);

    assert_eq!(equals(&store, left, right), Ok(true));
}

#[test]
fn equality_suspends_on_transient_operand() {
    let mut store = Store::new();
    let bound = pair(&mut store, "p", 1, 2);
    let label = store.atom("p");
    let partial = Tuple::build(&mut store, label, 2);
    let first = store.int(1);
    init_element(&mut store, partial, 0, first);

    let result = equals(&store, bound, partial);
    assert!(result.unwrap_err().suspended_on().is_some());
}

#[test]
fn chunks_and_names_compare_by_identity() {
    let mut store = Store::new();
    let value = store.int(1);
    let left = weft::records::Chunk::build(&mut store, value);
    let right = weft::records::Chunk::build(&mut store, value);

    assert_eq!(equals(&store, left, left), Ok(true));
    assert_eq!(equals(&store, left, right), Ok(false));

    let n1 = store.fresh_name();
    let n2 = store.fresh_name();
    assert_eq!(equals(&store, n1, n1), Ok(true));
    assert_eq!(equals(&store, n1, n2), Ok(false));
}
