use proptest::prelude::*;
use serde_json::{Value, json};
use sol003_messages::{MessageDocument, PropertyValue};

/// Mapping keys that are never read back as indices and never contain `.`.
pub fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,5}"
}

pub fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| json!(i)),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

pub fn arb_property_value() -> impl Strategy<Value = PropertyValue> {
    arb_leaf().prop_map(|v| PropertyValue::from_json("", v).unwrap())
}

/// Nested values without empty containers, so flattening loses nothing.
pub fn arb_node(depth: u32) -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(depth, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 1..4)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
        ]
    })
}

pub fn arb_document() -> impl Strategy<Value = MessageDocument> {
    prop::collection::vec((arb_key(), arb_node(3)), 0..5)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// Dotted paths of mapping keys only.
pub fn arb_key_path() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_key(), 1..5).prop_map(|keys| keys.join("."))
}
