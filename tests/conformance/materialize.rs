use super::common::{load_suite, report};
use sol003_messages::{ErrorKind, MessageDocument, PropertyValue, materialize};
use serde_json::Value;

#[derive(Debug, serde::Deserialize)]
struct MaterializeCase {
    id: String,
    name: String,
    initial: MessageDocument,
    path: String,
    value: Value,
    #[serde(default)]
    expected: Option<MessageDocument>,
    #[serde(default)]
    error: Option<ErrorKind>,
}

#[test]
fn materialize_suite() {
    let cases: Vec<MaterializeCase> = load_suite("materialize.yaml");
    assert!(!cases.is_empty());

    let mut passed = 0;
    let mut failed = 0;

    for case in &cases {
        let value = PropertyValue::from_json(&case.path, case.value.clone())
            .unwrap_or_else(|e| panic!("{}: bad fixture value: {e}", case.id));
        let mut document = case.initial.clone();
        let result = materialize(&mut document, &case.path, &value);

        let ok = match (&result, &case.expected, case.error) {
            (Ok(()), Some(expected), None) => document == *expected,
            (Err(e), None, Some(kind)) => {
                // a failed call must not touch the document
                e.kind() == kind && document == case.initial && e.subject() == Some(case.path.as_str())
            }
            _ => false,
        };

        if ok {
            passed += 1;
        } else {
            failed += 1;
            eprintln!(
                "FAIL {}: {}\n  path: {}\n  result: {:?}\n  document: {}",
                case.id,
                case.name,
                case.path,
                result,
                Value::Object(document)
            );
        }
    }

    report("materialize", passed, failed);
}
