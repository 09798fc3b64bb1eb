#![no_main]

use libfuzzer_sys::fuzz_target;
use sigcodec_spec::{canonical_spec_hash, validate_spec, TransmitSpec};

fuzz_target!(|data: &[u8]| {
    let Ok(spec) = serde_json::from_slice::<TransmitSpec>(data) else {
        return;
    };

    let result = validate_spec(&spec);
    assert_eq!(result.is_ok(), result.errors.is_empty());

    if let Ok(json) = spec.to_json() {
        let reparsed = TransmitSpec::from_json(&json).expect("serialized spec must parse");
        if let (Ok(a), Ok(b)) = (canonical_spec_hash(&spec), canonical_spec_hash(&reparsed)) {
            assert_eq!(a, b);
        }
    }
});
