#![no_main]

use libfuzzer_sys::fuzz_target;
use sol003_messages::parse::parse_registry;
use sol003_messages::validate::validate_registry;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data)
        && let Ok(registry) = parse_registry(input)
    {
        assert!(validate_registry(&registry).is_valid());
    }
});
