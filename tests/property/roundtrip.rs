use super::strategies::*;
use proptest::prelude::*;
use sol003_messages::primitives::flatten_document;
use sol003_messages::serialize::serialize;
use sol003_messages::{MessageDocument, materialize};

fn rebuild<'a>(
    properties: impl Iterator<Item = (&'a str, &'a sol003_messages::PropertyValue)>,
) -> MessageDocument {
    let mut document = MessageDocument::new();
    for (key, value) in properties {
        materialize(&mut document, key, value).unwrap();
    }
    document
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn flatten_then_materialize_rebuilds(document in arb_document()) {
        let properties = flatten_document(&document);
        prop_assert_eq!(rebuild(properties.iter()), document);
    }

    #[test]
    fn materialize_order_does_not_matter(document in arb_document()) {
        let properties = flatten_document(&document);
        let forward = rebuild(properties.iter());
        let backward = rebuild(properties.iter().collect::<Vec<_>>().into_iter().rev());
        // map equality ignores key order
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn serialized_message_parses_back(document in arb_document()) {
        let text = serialize(&document).unwrap();
        let parsed: MessageDocument = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(parsed, document);
    }
}
