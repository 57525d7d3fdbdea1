#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sol003_messages::{MessageDocument, PropertyValue, materialize};

#[derive(Debug, Arbitrary)]
enum Leaf {
    Text(String),
    Int(i64),
    Bool(bool),
    Null,
}

impl From<Leaf> for PropertyValue {
    fn from(leaf: Leaf) -> Self {
        match leaf {
            Leaf::Text(s) => s.into(),
            Leaf::Int(i) => i.into(),
            Leaf::Bool(b) => b.into(),
            Leaf::Null => PropertyValue::Null,
        }
    }
}

fuzz_target!(|assignments: Vec<(String, Leaf)>| {
    let mut document = MessageDocument::new();
    for (path, leaf) in assignments {
        let before = document.clone();
        if materialize(&mut document, &path, &leaf.into()).is_err() {
            assert_eq!(document, before, "failed materialize mutated the document");
        }
    }
});
