#![no_main]

use libfuzzer_sys::fuzz_target;
use sol003_messages::parse::parse_execution_request;
use sol003_messages::{LifecycleOperation, MessageGenerator};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, body)) = data.split_first() else {
        return;
    };
    let Ok(request) = parse_execution_request(&String::from_utf8_lossy(body)) else {
        return;
    };

    let operation = LifecycleOperation::ALL[selector as usize % LifecycleOperation::ALL.len()];
    let generator = MessageGenerator::default();
    if let Ok(message) = generator.generate(operation, &request) {
        let parsed: serde_json::Value =
            serde_json::from_str(&message).expect("generated message is valid JSON");
        assert!(parsed.is_object());
    }
});
