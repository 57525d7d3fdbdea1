use super::strategies::*;
use proptest::prelude::*;
use serde_json::Value;
use sol003_messages::primitives::{MAX_SEQUENCE_INDEX, PathSegment, parse_path};
use sol003_messages::{ErrorKind, MessageDocument, materialize};

fn is_mapping_tree(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.values().all(is_mapping_tree),
        Value::Array(_) => false,
        _ => true,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn parse_path_never_panics(path in "[a-z0-9.]{0,24}") {
        let _ = parse_path(&path);
    }

    #[test]
    fn parse_path_keeps_every_segment(path in arb_key_path()) {
        let segments = parse_path(&path).unwrap();
        prop_assert_eq!(segments.len(), path.split('.').count());
        prop_assert!(segments.iter().all(|s| matches!(s, PathSegment::Key(_))));
    }

    #[test]
    fn materialize_is_idempotent(
        document in arb_document(),
        path in arb_key_path(),
        value in arb_property_value(),
    ) {
        let mut once = document.clone();
        let first = materialize(&mut once, &path, &value);
        let mut twice = once.clone();
        let second = materialize(&mut twice, &path, &value);
        prop_assert_eq!(first.is_ok(), second.is_ok());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn key_only_paths_build_mappings(
        paths in prop::collection::vec(arb_key_path(), 1..8),
        value in arb_property_value(),
    ) {
        let mut document = MessageDocument::new();
        for path in &paths {
            // later paths may collide with earlier leaves; those just fail
            let _ = materialize(&mut document, path, &value);
        }
        prop_assert!(is_mapping_tree(&Value::Object(document)));
    }

    #[test]
    fn index_extends_sequence_with_nulls(
        key in arb_key(),
        index in 0usize..64,
        leaf in arb_key(),
        value in arb_property_value(),
    ) {
        let mut document = MessageDocument::new();
        materialize(&mut document, &format!("{key}.{index}.{leaf}"), &value).unwrap();

        let items = document[&key].as_array().unwrap();
        prop_assert_eq!(items.len(), index + 1);
        prop_assert!(items[..index].iter().all(Value::is_null));
        prop_assert_eq!(&items[index][&leaf], &value.to_json());
    }

    #[test]
    fn failed_materialize_leaves_document_untouched(
        document in arb_document(),
        path in "[a-z0-9]{1,3}(\\.[a-z0-9]{1,3}){0,3}",
        value in arb_property_value(),
    ) {
        let mut target = document.clone();
        if let Err(e) = materialize(&mut target, &path, &value) {
            prop_assert!(matches!(
                e.kind(),
                ErrorKind::StructuralConflict | ErrorKind::MalformedPath
            ));
            prop_assert_eq!(target, document);
        }
    }

    #[test]
    fn index_limit_is_enforced(key in arb_key(), excess in 1usize..1000) {
        let mut document = MessageDocument::new();
        let path = format!("{key}.{}", MAX_SEQUENCE_INDEX + excess);
        let err = materialize(&mut document, &path, &"x".into()).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::MalformedPath);
        prop_assert!(document.is_empty());
    }
}
