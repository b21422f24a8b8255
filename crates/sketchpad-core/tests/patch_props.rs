//! Property tests for the patch engine over arbitrary JSON value trees.

use proptest::prelude::*;
use serde_json::Value;
use sketchpad_core::Patch;

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn diff_then_apply_reaches_after(a in json_value(), b in json_value()) {
        let patch = Patch::diff(&a, &b);
        prop_assert_eq!(patch.applied_to(&a), b);
    }

    #[test]
    fn invert_restores_before(a in json_value(), b in json_value()) {
        let patch = Patch::diff(&a, &b);
        let inverse = patch.invert(&a);
        prop_assert_eq!(inverse.applied_to(&patch.applied_to(&a)), a);
    }

    #[test]
    fn diff_of_equal_values_is_empty(a in json_value()) {
        prop_assert!(Patch::diff(&a, &a).is_empty());
    }

    #[test]
    fn compose_matches_sequential_application(
        a in json_value(),
        b in json_value(),
        c in json_value(),
    ) {
        let first = Patch::diff(&a, &b);
        let second = Patch::diff(&b, &c);
        let merged = first.compose(second);
        prop_assert_eq!(merged.applied_to(&a), c);
    }
}
