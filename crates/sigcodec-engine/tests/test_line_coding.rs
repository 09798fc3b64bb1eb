//! Line coding integration tests.

use pretty_assertions::assert_eq;
use sigcodec_engine::line::{
    B8zs, BipolarAmi, DifferentialManchester, Hdb3, Manchester, NrzI, NrzL, Pseudoternary,
};
use sigcodec_engine::rng::random_bits;
use sigcodec_engine::{violation_positions, LineCodec, LineEncoder, ViolationDetector};
use sigcodec_spec::{LineEncoding, SignalLevel};

use SignalLevel::{High as H, Low as L, NoLine as Z};

fn sample_inputs() -> Vec<Vec<u8>> {
    let mut inputs = vec![
        vec![0],
        vec![1],
        vec![0; 4],
        vec![0; 8],
        vec![0; 33],
        vec![1; 9],
        vec![1, 1, 0, 1, 0, 0, 1],
        vec![1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    ];
    for seed in 0..16 {
        inputs.push(random_bits(97, seed));
    }
    inputs
}

#[test]
fn test_roundtrip_exact_for_all_encoders() {
    for encoding in LineEncoding::all() {
        let codec = LineCodec::new(*encoding);
        for bits in sample_inputs() {
            let encoded = codec.encode(&bits).unwrap();
            assert_eq!(
                codec.decode(&encoded).unwrap(),
                bits,
                "{} failed to round trip",
                encoding
            );
        }
    }
}

#[test]
fn test_encoded_lengths() {
    for encoding in LineEncoding::all() {
        let codec = LineCodec::new(*encoding);
        let factor = match encoding {
            LineEncoding::Manchester | LineEncoding::DifferentialManchester => 2,
            _ => 1,
        };
        for bits in sample_inputs() {
            let encoded = codec.encode(&bits).unwrap();
            assert_eq!(encoded.len(), bits.len() * factor, "{}", encoding);
        }
    }
}

#[test]
fn test_nrz_l_scenario() {
    let bits = [1, 1, 0, 1, 0, 0, 1];
    let encoded = NrzL.encode(&bits).unwrap();
    assert_eq!(encoded, vec![L, L, H, L, H, H, L]);
    assert_eq!(NrzL.decode(&encoded).unwrap(), bits.to_vec());
}

#[test]
fn test_level_alphabets() {
    let bits = random_bits(200, 99);
    let no_zero_level: [&dyn LineEncoder; 4] = [&NrzL, &NrzI, &Manchester, &DifferentialManchester];
    for encoder in no_zero_level {
        assert!(!encoder.encode(&bits).unwrap().contains(&Z));
    }
}

#[test]
fn test_plain_bipolar_never_violates() {
    for bits in sample_inputs() {
        assert!(!BipolarAmi.has_violations(&BipolarAmi.encode(&bits).unwrap()));
        assert!(!Pseudoternary.has_violations(&Pseudoternary.encode(&bits).unwrap()));
    }
}

#[test]
fn test_forced_violation_detected() {
    assert!(BipolarAmi.has_violations(&[H, Z, Z, H]));
    assert!(Pseudoternary.has_violations(&[L, L]));
    assert!(!BipolarAmi.has_violations(&[H, Z, L, Z, H, L]));
}

#[test]
fn test_substitution_codes_mark_zero_runs() {
    let mut bits = vec![1];
    bits.extend([0; 8]);
    bits.push(1);

    let b8zs = B8zs.encode(&bits).unwrap();
    assert!(B8zs.has_violations(&b8zs));
    assert_eq!(violation_positions(&b8zs).len(), 2);

    let hdb3 = Hdb3.encode(&bits).unwrap();
    assert!(Hdb3.has_violations(&hdb3));
    // Two four-zero groups: 000V then B00V.
    assert_eq!(violation_positions(&hdb3).len(), 2);
}

#[test]
fn test_substitution_without_long_runs_matches_ami() {
    let bits = [1, 0, 1, 1, 0, 0, 1, 0, 0, 0, 1];
    let ami = BipolarAmi.encode(&bits).unwrap();
    assert_eq!(Hdb3.encode(&bits).unwrap(), ami);
    assert_eq!(B8zs.encode(&bits).unwrap(), ami);
}

#[test]
fn test_hdb3_never_leaves_four_zero_levels() {
    for bits in sample_inputs() {
        let encoded = Hdb3.encode(&bits).unwrap();
        let longest = encoded
            .split(|s| s.is_pulse())
            .map(|run| run.len())
            .max()
            .unwrap_or(0);
        assert!(longest <= 3, "run of {} no_line levels", longest);
    }
}

#[test]
fn test_b8zs_never_leaves_eight_zero_levels() {
    for bits in sample_inputs() {
        let encoded = B8zs.encode(&bits).unwrap();
        let longest = encoded
            .split(|s| s.is_pulse())
            .map(|run| run.len())
            .max()
            .unwrap_or(0);
        assert!(longest < 8, "run of {} no_line levels", longest);
    }
}

#[test]
fn test_decoders_reject_bad_signals() {
    assert!(NrzL.decode(&[H, Z]).is_err());
    assert!(NrzI.decode(&[Z]).is_err());
    assert!(Manchester.decode(&[H]).is_err());
    assert!(DifferentialManchester.decode(&[H, L, H]).is_err());
    for encoding in LineEncoding::all() {
        assert!(LineCodec::new(*encoding).decode(&[]).is_err());
        assert!(LineCodec::new(*encoding).encode(&[0, 1, 2]).is_err());
    }
}
