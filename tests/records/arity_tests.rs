use std::rc::Rc;

use weft::records::{Arity, Record, arities_equal, lookup_feature};
use weft::store::{NodeId, Store};

fn sharp_arity_123(store: &mut Store) -> Rc<Arity> {
    let label = store.atoms.sharp;
    let one = store.int(1);
    let two = store.int(2);
    let three = store.int(3);
    Arity::new(store, label, vec![one, two, three]).expect("valid arity")
}

#[test]
fn every_feature_is_found_at_its_index() {
    let mut store = Store::new();
    let arity = sharp_arity_123(&mut store);

    for index in 0..arity.width() {
        let key = arity.feature_at(index);
        assert_eq!(arity.lookup_feature(&mut store, key), Ok(Some(index)));
    }

    let absent = store.int(5);
    assert_eq!(arity.lookup_feature(&mut store, absent), Ok(None));
    let absent = store.atom("k");
    assert_eq!(arity.lookup_feature(&mut store, absent), Ok(None));
}

#[test]
fn record_agrees_with_its_arity_for_every_key() {
    let mut store = Store::new();
    let arity = sharp_arity_123(&mut store);
    let a = store.atom("a");
    let b = store.atom("b");
    let c = store.atom("c");
    let record = Record::build_with(&mut store, arity.clone(), &[a, b, c]).unwrap();

    assert_eq!(weft::records::width(&mut store, record), Ok(3));
    assert_eq!(arity.width(), 3);

    let keys: Vec<NodeId> = (0..3).map(|i| arity.feature_at(i)).collect();
    let expected = [a, b, c];
    for (index, &key) in keys.iter().enumerate() {
        let by_arity = arity.lookup_feature(&mut store, key).unwrap();
        let by_record = lookup_feature(&mut store, record, key).unwrap();
        assert_eq!(by_arity, Some(index));
        assert_eq!(
            store.resolve(by_record.expect("present feature")),
            expected[index]
        );
    }
}

#[test]
fn scenario_lookup_feature_two_and_five() {
    let mut store = Store::new();
    let arity = sharp_arity_123(&mut store);
    let a = store.atom("a");
    let b = store.atom("b");
    let c = store.atom("c");
    let record = Record::build_with(&mut store, arity, &[a, b, c]).unwrap();

    let two = store.int(2);
    let hit = lookup_feature(&mut store, record, two).unwrap();
    assert_eq!(store.resolve(hit.expect("feature 2")), b);

    let five = store.int(5);
    assert_eq!(lookup_feature(&mut store, record, five), Ok(None));
}

#[test]
fn wrong_element_count_raises_illegal_arity() {
    let mut store = Store::new();
    let arity = sharp_arity_123(&mut store);
    let a = store.atom("a");
    let result = Record::build_with(&mut store, arity, &[a]);

    let exception = result.unwrap_err().raised().expect("raise");
    let label = store.atom("illegalArity");
    assert_eq!(
        weft::records::test_label(&mut store, exception, label),
        Ok(true)
    );
}

#[test]
fn structural_equality_of_separately_built_arities() {
    let mut store = Store::new();
    let left = sharp_arity_123(&mut store);
    let right = sharp_arity_123(&mut store);
    assert!(!Rc::ptr_eq(&left, &right));
    assert_eq!(arities_equal(&mut store, &left, &right), Ok(true));
}
