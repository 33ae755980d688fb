/// Property tests for document key invariants.
use std::collections::HashSet;

use bson_types::{Document, TypesError, Value};
use proptest::prelude::*;

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_$][a-zA-Z0-9_.]{0,12}").unwrap()
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        "[a-z]{0,8}".prop_map(Value::String),
        Just(Value::Null),
    ]
}

proptest! {
    #[test]
    fn insertion_order_is_kept(pairs in prop::collection::vec((arb_key(), arb_scalar()), 0..16)) {
        let mut seen = HashSet::new();
        let unique: Vec<_> = pairs.into_iter().filter(|(k, _)| seen.insert(k.clone())).collect();

        let doc = Document::from_pairs(unique.clone()).unwrap();
        let keys: Vec<&str> = doc.keys().collect();
        let expected: Vec<&str> = unique.iter().map(|(k, _)| k.as_str()).collect();
        prop_assert_eq!(keys, expected);
        prop_assert_eq!(doc.into_entries(), unique);
    }

    #[test]
    fn repeated_key_always_fails(key in arb_key(), a in arb_scalar(), b in arb_scalar()) {
        let err = Document::make(vec![key.clone().into(), a, key.clone().into(), b]).unwrap_err();
        prop_assert_eq!(err, TypesError::DuplicateKey(key));
    }
}
