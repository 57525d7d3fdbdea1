use super::common::{load_suite, report};
use sol003_messages::{
    ErrorKind, ExecutionRequest, LifecycleOperation, MessageGenerator, PropertySet,
};

#[derive(Debug, serde::Deserialize)]
struct GenerateCase {
    id: String,
    name: String,
    operation: LifecycleOperation,
    #[serde(default)]
    lifecycle_name: Option<String>,
    properties: PropertySet,
    /// Exact compact JSON, so key order is checked too.
    #[serde(default)]
    expected: Option<String>,
    #[serde(default)]
    error: Option<ErrorKind>,
}

#[test]
fn generate_suite() {
    let cases: Vec<GenerateCase> = load_suite("generate.yaml");
    assert!(!cases.is_empty());

    let generator = MessageGenerator::default();
    let mut passed = 0;
    let mut failed = 0;

    for case in &cases {
        let request = ExecutionRequest {
            lifecycle_name: case.lifecycle_name.clone(),
            properties: case.properties.clone(),
            system_properties: PropertySet::new(),
        };
        let result = generator.generate(case.operation, &request);

        let ok = match (&result, &case.expected, case.error) {
            (Ok(message), Some(expected), None) => message == expected,
            (Err(e), None, Some(kind)) => e.kind() == kind,
            _ => false,
        };

        if ok {
            passed += 1;
        } else {
            failed += 1;
            eprintln!(
                "FAIL {}: {}\n  expected: {:?} / {:?}\n  actual:   {:?}",
                case.id, case.name, case.expected, case.error, result
            );
        }
    }

    report("generate", passed, failed);
}
