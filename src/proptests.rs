use std::collections::HashMap;

use proptest::prelude::*;
use proptest_derive::Arbitrary;

use crate::{AutoContext, HamtMap};

/// Model implementation using HashMap for comparison.
#[derive(Default)]
struct Model {
    map: HashMap<String, u64>,
}

impl Model {
    fn insert(&mut self, key: String, value: u64) -> Option<u64> {
        self.map.insert(key, value)
    }

    fn get(&self, key: &str) -> Option<&u64> {
        self.map.get(key)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// Actions to test against both implementations.
#[derive(Arbitrary, Debug, Clone)]
enum Action {
    Insert(KeyValue),
    Get(Key),
    GetOrPut(KeyValue),
}

/// Wrapper for key generation with custom strategy.
#[derive(Debug, Clone)]
struct Key(String);

/// Wrapper for key-value pair.
#[derive(Debug, Clone)]
struct KeyValue {
    key: Key,
    value: u64,
}

impl Arbitrary for Key {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            // Empty key
            Just(Key(String::new())),
            // Tiny alphabet, high reuse across actions
            "[ab]{1,3}".prop_map(Key),
            // Word-like keys
            "[a-z]{1,8}".prop_map(Key),
            // Longer keys with a shared prefix
            "[a-z]{1,6}".prop_map(|s| Key(format!("prefix/{s}"))),
        ]
        .boxed()
    }
}

impl Arbitrary for KeyValue {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<Key>(), any::<u64>())
            .prop_map(|(key, value)| KeyValue { key, value })
            .boxed()
    }
}

/// Test harness that executes actions on both HamtMap and Model.
#[derive(Default)]
struct Test {
    map: HamtMap<String, u64, AutoContext>,
    model: Model,
}

impl Test {
    fn execute(&mut self, action: Action) {
        match action {
            Action::Insert(kv) => {
                let key = kv.key.0;
                let map_result = self.map.insert(key.clone(), kv.value).unwrap();
                let model_result = self.model.insert(key.clone(), kv.value);
                assert_eq!(
                    map_result, model_result,
                    "Insert mismatch: key={:?}, map_result={:?}, model_result={:?}",
                    key, map_result, model_result
                );
            }
            Action::Get(key) => {
                let map_result = self.map.get(&key.0);
                let model_result = self.model.get(&key.0);
                assert_eq!(
                    map_result, model_result,
                    "Get mismatch: key={:?}, map_result={:?}, model_result={:?}",
                    key.0, map_result, model_result
                );
            }
            Action::GetOrPut(kv) => {
                let key = kv.key.0;
                let existed = self.model.contains_key(&key);
                let slot = self.map.get_or_put(key.clone()).unwrap();
                assert_eq!(
                    slot.found_existing, existed,
                    "GetOrPut mismatch: key={:?}, found_existing={}, model contains={}",
                    key, slot.found_existing, existed
                );
                if !slot.found_existing {
                    *slot.value = kv.value;
                    self.model.insert(key, kv.value);
                }
            }
        }
        // Always verify len matches
        assert_eq!(
            self.map.len(),
            self.model.len(),
            "Length mismatch after action: map={}, model={}",
            self.map.len(),
            self.model.len()
        );
    }

    fn check_full_agreement(&self) {
        for (key, value) in &self.model.map {
            assert_eq!(self.map.get(key), Some(value), "Final mismatch: key={key:?}");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn proptest_vs_hashmap(actions in prop::collection::vec(any::<Action>(), 1..64)) {
        let mut test = Test::default();
        for action in actions {
            test.execute(action);
        }
        test.check_full_agreement();
    }
}
