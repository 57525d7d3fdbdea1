use super::strategies::*;
use proptest::prelude::*;
use sol003_messages::{MessageDocument, PropertySet, copy_if_present};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn copies_exactly_the_non_null_value(
        field in arb_key(),
        value in arb_property_value(),
        other in arb_key(),
    ) {
        let mut properties = PropertySet::new();
        properties.insert(field.clone(), value.clone());

        let mut document = MessageDocument::new();
        copy_if_present(&properties, &mut document, &field);

        if value.is_null() {
            prop_assert!(document.is_empty());
        } else {
            prop_assert_eq!(document.len(), 1);
            prop_assert_eq!(&document[&field], &value.to_json());
        }

        if other != field {
            let mut untouched = MessageDocument::new();
            copy_if_present(&properties, &mut untouched, &other);
            prop_assert!(untouched.is_empty());
        }
    }

    #[test]
    fn copy_does_not_interpret_dots(path in arb_key_path()) {
        let properties: PropertySet = [(path.clone(), "v")].into_iter().collect();
        let mut document = MessageDocument::new();
        copy_if_present(&properties, &mut document, &path);
        prop_assert_eq!(document.keys().collect::<Vec<_>>(), vec![&path]);
    }
}
