use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub fn fixtures_dir() -> PathBuf {
    std::env::var("SOL003_FIXTURES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// Loads a YAML suite from the fixtures directory.
pub fn load_suite<T: DeserializeOwned>(name: &str) -> Vec<T> {
    let path = fixtures_dir().join(name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_saphyr::from_str(&content)
        .unwrap_or_else(|e| panic!("cannot parse {}: {e}", path.display()))
}

/// Prints a summary and fails the test if any case failed.
pub fn report(suite: &str, passed: usize, failed: usize) {
    eprintln!("{suite}: {passed} passed, {failed} failed");
    assert_eq!(failed, 0, "{failed} {suite} case(s) failed");
}
