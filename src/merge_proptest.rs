//! Property-based tests for the deep dictionary merge.
//!
//! These tests use proptest to generate random JSON mappings and verify that
//! the merge invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::merge::deep_merge;
    use proptest::prelude::*;
    use serde_json::{Map, Value};

    /// Arbitrary JSON values with limited depth: scalars at the leaves,
    /// objects in the interior.
    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-z]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect()))
        })
    }

    fn arb_map() -> impl Strategy<Value = Map<String, Value>> {
        prop::collection::btree_map("[a-z]{1,4}", arb_value(), 0..4)
            .prop_map(|entries| entries.into_iter().collect())
    }

    proptest! {
        /// Property: re-applying the same overlay does not change the result
        #[test]
        fn merge_is_idempotent(base in arb_map(), overlay in arb_map()) {
            let mut once = base.clone();
            deep_merge(&mut once, &overlay);
            let mut twice = once.clone();
            deep_merge(&mut twice, &overlay);
            prop_assert_eq!(once, twice);
        }

        /// Property: every key present only in the overlay ends up with the
        /// overlay's value
        #[test]
        fn overlay_only_keys_take_overlay_value(base in arb_map(), overlay in arb_map()) {
            let mut merged = base.clone();
            deep_merge(&mut merged, &overlay);
            for (key, value) in &overlay {
                if !base.contains_key(key) {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }
        }

        /// Property: merging never deletes a key from the base
        #[test]
        fn merge_never_deletes_keys(base in arb_map(), overlay in arb_map()) {
            let mut merged = base.clone();
            deep_merge(&mut merged, &overlay);
            for key in base.keys() {
                prop_assert!(merged.contains_key(key));
            }
        }

        /// Property: non-object overlay values replace the base value outright
        #[test]
        fn scalar_overlay_values_replace(base in arb_map(), overlay in arb_map()) {
            let mut merged = base.clone();
            deep_merge(&mut merged, &overlay);
            for (key, value) in &overlay {
                if !value.is_object() || !base.get(key).is_some_and(Value::is_object) {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }
        }
    }
}
