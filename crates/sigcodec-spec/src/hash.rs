//! Canonical hashing of transmit specs.
//!
//! Two specs that differ only in key order or whitespace hash identically:
//! the spec is serialized to JSON, canonicalized per RFC 8785 (JCS), and the
//! canonical bytes are hashed with BLAKE3.

use crate::error::SpecError;
use crate::spec::TransmitSpec;

/// Computes the canonical BLAKE3 hash of a spec.
///
/// ```text
/// spec_hash = hex(BLAKE3(JCS(spec_json)))
/// ```
///
/// # Example
/// ```
/// use sigcodec_spec::{InputSource, LineEncoding, Scheme, TransmitSpec};
/// use sigcodec_spec::hash::canonical_spec_hash;
///
/// let spec = TransmitSpec::builder(
///     "hash-demo",
///     Scheme::line_code(LineEncoding::Manchester),
///     InputSource::Bits { bits: vec![1, 0, 1] },
/// )
/// .build();
///
/// let hash = canonical_spec_hash(&spec).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_spec_hash(spec: &TransmitSpec) -> Result<String, SpecError> {
    let value = spec.to_value()?;
    canonical_value_hash(&value)
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> Result<String, SpecError> {
    let canonical = canonicalize_json(value)?;
    Ok(blake3::hash(canonical.as_bytes()).to_hex().to_string())
}

/// Hashes raw bytes (e.g. a spec file as read from disk).
pub fn source_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
///
/// Object keys are sorted, tokens carry no whitespace, and numbers use the
/// shortest form that round-trips.
pub fn canonicalize_json(value: &serde_json::Value) -> Result<String, SpecError> {
    let mut out = String::new();
    write_canonical(value, &mut out)?;
    Ok(out)
}

fn write_canonical(value: &serde_json::Value, out: &mut String) -> Result<(), SpecError> {
    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => out.push_str(&format_jcs_number(n)?),
        serde_json::Value::String(s) => write_jcs_string(s, out),
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_jcs_string(key, out);
                out.push(':');
                write_canonical(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn format_jcs_number(n: &serde_json::Number) -> Result<String, SpecError> {
    if let Some(i) = n.as_i64() {
        return Ok(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.to_string());
    }
    let f = n
        .as_f64()
        .ok_or_else(|| SpecError::Canonicalization(format!("unrepresentable number {}", n)))?;
    if !f.is_finite() {
        return Err(SpecError::Canonicalization(format!(
            "non-finite number {}",
            f
        )));
    }
    if f == 0.0 {
        return Ok("0".to_string());
    }
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return Ok(format!("{}", f as i64));
    }
    // `Display` for f64 is the shortest round-trip decimal and never uses an exponent.
    Ok(format!("{}", f))
}

fn write_jcs_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSource;
    use crate::scheme::Scheme;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_canonicalize_sorts_keys() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"b": 1, "a": {"z": true, "y": null}, "c": [3, "x"]}"#)
                .unwrap();
        assert_eq!(
            canonicalize_json(&value).unwrap(),
            r#"{"a":{"y":null,"z":true},"b":1,"c":[3,"x"]}"#
        );
    }

    #[test]
    fn test_canonicalize_numbers() {
        let value = serde_json::json!([1.0, 0.5, -0.0, 1.5e3, 0.1]);
        assert_eq!(canonicalize_json(&value).unwrap(), "[1,0.5,0,1500,0.1]");
    }

    #[test]
    fn test_canonicalize_escapes() {
        let value = serde_json::json!("tab\there \"quoted\" \u{01}");
        assert_eq!(
            canonicalize_json(&value).unwrap(),
            r#""tab\there \"quoted\" \u0001""#
        );
    }

    #[test]
    fn test_spec_hash_ignores_key_order() {
        let a = r#"{"spec_version":1,"transmit_id":"dm-demo",
            "scheme":{"type":"dm","delta":0.1},
            "input":{"kind":"samples","values":[0.0,0.5],"sample_rate":10.0}}"#;
        let b = r#"{"input":{"sample_rate":10.0,"values":[0.0,0.5],"kind":"samples"},
            "scheme":{"delta":0.1,"type":"dm"},"transmit_id":"dm-demo","spec_version":1}"#;

        let spec_a = TransmitSpec::from_json(a).unwrap();
        let spec_b = TransmitSpec::from_json(b).unwrap();
        assert_eq!(
            canonical_spec_hash(&spec_a).unwrap(),
            canonical_spec_hash(&spec_b).unwrap()
        );
    }

    #[test]
    fn test_spec_hash_changes_with_params() {
        let input = InputSource::Samples {
            values: vec![0.0, 0.5],
            sample_rate: 10.0,
        };
        let a = TransmitSpec::builder("dm-demo", Scheme::Dm { delta: 0.1 }, input.clone()).build();
        let b = TransmitSpec::builder("dm-demo", Scheme::Dm { delta: 0.2 }, input).build();

        let hash_a = canonical_spec_hash(&a).unwrap();
        assert_eq!(hash_a.len(), 64);
        assert!(hash_a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash_a, canonical_spec_hash(&b).unwrap());
    }

    #[test]
    fn test_source_hash() {
        assert_eq!(source_hash(b"abc"), source_hash(b"abc"));
        assert_ne!(source_hash(b"abc"), source_hash(b"abd"));
    }
}
