//! Scheme metadata registry.
//!
//! Display metadata for every scheme the engine implements, keyed by the
//! same identifier `Scheme::id()` returns. Consumers use it to label schemes
//! and decide which views apply (e.g. violation markers only for schemes
//! with `detects_violations`).

use serde::Serialize;

use crate::scheme::SchemeFamily;

/// Metadata for one scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemeInfo {
    /// Registry identifier.
    pub id: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Engine family.
    pub family: SchemeFamily,
    /// One-line description of the encoding rule.
    pub description: &'static str,
    /// Encoded output is twice the input length.
    pub doubles_length: bool,
    /// Scheme exposes bipolar violation detection.
    pub detects_violations: bool,
    /// Round trip is an approximation rather than an exact inverse.
    pub lossy: bool,
    /// Bits carried per transmitted symbol.
    pub bits_per_symbol: usize,
}

const fn line(
    id: &'static str,
    display_name: &'static str,
    description: &'static str,
    doubles_length: bool,
    detects_violations: bool,
) -> SchemeInfo {
    SchemeInfo {
        id,
        display_name,
        family: SchemeFamily::LineCoding,
        description,
        doubles_length,
        detects_violations,
        lossy: false,
        bits_per_symbol: 1,
    }
}

const fn modulation(
    id: &'static str,
    display_name: &'static str,
    family: SchemeFamily,
    description: &'static str,
    lossy: bool,
    bits_per_symbol: usize,
) -> SchemeInfo {
    SchemeInfo {
        id,
        display_name,
        family,
        description,
        doubles_length: false,
        detects_violations: false,
        lossy,
        bits_per_symbol,
    }
}

/// Every registered scheme, grouped by family.
pub static ALL_SCHEMES: &[SchemeInfo] = &[
    line(
        "nrz_l",
        "NRZ-L",
        "Bit 0 is a high level, bit 1 is a low level.",
        false,
        false,
    ),
    line(
        "nrz_i",
        "NRZ-I",
        "A 1 inverts the current level, a 0 holds it.",
        false,
        false,
    ),
    line(
        "bipolar_ami",
        "Bipolar AMI",
        "A 0 is no line signal, each 1 alternates between positive and negative pulses.",
        false,
        true,
    ),
    line(
        "pseudoternary",
        "Pseudoternary",
        "A 1 is no line signal, each 0 alternates between positive and negative pulses.",
        false,
        true,
    ),
    line(
        "manchester",
        "Manchester",
        "Each bit is a mid-bit transition: low-to-high for 1, high-to-low for 0.",
        true,
        false,
    ),
    line(
        "differential_manchester",
        "Differential Manchester",
        "Every bit has a mid-bit transition; a 0 adds a transition at the bit start.",
        true,
        false,
    ),
    line(
        "b8zs",
        "B8ZS",
        "AMI with every run of eight zeros replaced by a 000VB0VB violation pattern.",
        false,
        true,
    ),
    line(
        "hdb3",
        "HDB3",
        "AMI with every run of four zeros replaced by 000V or B00V.",
        false,
        true,
    ),
    modulation(
        "pcm",
        "PCM",
        SchemeFamily::AnalogToDigital,
        "Uniform quantization of each sample into one of 2^n levels.",
        true,
        1,
    ),
    modulation(
        "dm",
        "Delta Modulation",
        SchemeFamily::AnalogToDigital,
        "One bit per sample: whether the signal is above a running staircase.",
        true,
        1,
    ),
    modulation(
        "ask",
        "ASK",
        SchemeFamily::DigitalToAnalog,
        "Each bit selects one of two carrier amplitudes.",
        false,
        1,
    ),
    modulation(
        "bfsk",
        "BFSK",
        SchemeFamily::DigitalToAnalog,
        "Each bit selects one of two carrier frequencies.",
        false,
        1,
    ),
    modulation(
        "bpsk",
        "BPSK",
        SchemeFamily::DigitalToAnalog,
        "Each bit selects carrier phase 0 or pi.",
        false,
        1,
    ),
    modulation(
        "mfsk",
        "MFSK",
        SchemeFamily::DigitalToAnalog,
        "Each bit pair selects one of four carrier frequencies.",
        false,
        2,
    ),
    modulation(
        "qpsk",
        "QPSK",
        SchemeFamily::DigitalToAnalog,
        "Each bit pair selects one of four carrier phases.",
        false,
        2,
    ),
    modulation(
        "am",
        "AM",
        SchemeFamily::AnalogToAnalog,
        "The message scales the carrier envelope.",
        true,
        1,
    ),
    modulation(
        "fm",
        "FM",
        SchemeFamily::AnalogToAnalog,
        "The message shifts the instantaneous carrier frequency.",
        true,
        1,
    ),
    modulation(
        "pm",
        "PM",
        SchemeFamily::AnalogToAnalog,
        "The message shifts the carrier phase.",
        true,
        1,
    ),
];

/// Returns every registered scheme.
pub fn all() -> &'static [SchemeInfo] {
    ALL_SCHEMES
}

/// Looks up a scheme by identifier.
pub fn by_id(id: &str) -> Option<&'static SchemeInfo> {
    ALL_SCHEMES.iter().find(|info| info.id == id)
}

/// Returns the schemes of one family, in registry order.
pub fn by_family(family: SchemeFamily) -> impl Iterator<Item = &'static SchemeInfo> {
    ALL_SCHEMES.iter().filter(move |info| info.family == family)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::{LineEncoding, Scheme};
    use std::collections::HashSet;

    #[test]
    fn test_registry_ids_unique() {
        let ids: HashSet<&str> = all().iter().map(|info| info.id).collect();
        assert_eq!(ids.len(), all().len());
        assert_eq!(all().len(), 18);
    }

    #[test]
    fn test_every_line_encoding_registered() {
        for encoding in LineEncoding::all() {
            let scheme = Scheme::line_code(*encoding);
            let info = by_id(scheme.id()).unwrap();
            assert_eq!(info.family, scheme.family());
            assert!(!info.lossy);
        }
    }

    #[test]
    fn test_family_flags() {
        let doubled: Vec<&str> = all()
            .iter()
            .filter(|info| info.doubles_length)
            .map(|info| info.id)
            .collect();
        assert_eq!(doubled, vec!["manchester", "differential_manchester"]);

        let violations: Vec<&str> = all()
            .iter()
            .filter(|info| info.detects_violations)
            .map(|info| info.id)
            .collect();
        assert_eq!(violations, vec!["bipolar_ami", "pseudoternary", "b8zs", "hdb3"]);

        assert_eq!(by_id("qpsk").map(|info| info.bits_per_symbol), Some(2));
        assert!(by_id("pcm").unwrap().lossy);
        assert!(by_id("nrz").is_none());
    }

    #[test]
    fn test_by_family() {
        assert_eq!(by_family(SchemeFamily::LineCoding).count(), 8);
        assert_eq!(by_family(SchemeFamily::AnalogToDigital).count(), 2);
        assert_eq!(by_family(SchemeFamily::DigitalToAnalog).count(), 5);
        assert_eq!(by_family(SchemeFamily::AnalogToAnalog).count(), 3);
    }

    #[test]
    fn test_info_serializes() {
        let json = serde_json::to_value(by_id("hdb3").unwrap()).unwrap();
        assert_eq!(json["family"], "line_coding");
        assert_eq!(json["detects_violations"], true);
    }
}
