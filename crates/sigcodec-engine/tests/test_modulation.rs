//! Codec and modulator integration tests.

use std::f64::consts::{FRAC_PI_2, PI};

use pretty_assertions::assert_eq;
use sigcodec_engine::rng::random_bits;
use sigcodec_engine::signal::time_grid;
use sigcodec_engine::{
    Am, AnalogCodec, AnalogModulator, Ask, Bfsk, Bpsk, DigitalModulator, Dm, EngineError, Fm,
    Mfsk, Pcm, Pm, Qpsk,
};

fn sine(freq: f64, amplitude: f64, t: &[f64]) -> Vec<f64> {
    t.iter()
        .map(|t| amplitude * (2.0 * PI * freq * t).sin())
        .collect()
}

fn max_abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn rms_error(a: &[f64], b: &[f64]) -> f64 {
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
    (sum / a.len() as f64).sqrt()
}

fn correlation(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        cov += (x - mean_a) * (y - mean_b);
        var_a += (x - mean_a).powi(2);
        var_b += (y - mean_b).powi(2);
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}

#[test]
fn test_pcm_quantization_bound() {
    for n_bits in [1, 3, 8, 16] {
        let pcm = Pcm::new(n_bits, -2.5, 1.5).unwrap();
        let samples: Vec<f64> = (0..1000).map(|i| -2.5 + 4.0 * i as f64 / 1000.0).collect();
        let decoded = pcm.decode(&pcm.encode(&samples).unwrap()).unwrap();
        for (s, d) in samples.iter().zip(&decoded) {
            assert!(
                (s - d).abs() <= pcm.step() / 2.0 + 1e-9,
                "n_bits {}: {} -> {}",
                n_bits,
                s,
                d
            );
        }
    }
}

#[test]
fn test_pcm_scenario_and_clamp() {
    let pcm = Pcm::new(2, -1.0, 1.0).unwrap();
    assert_eq!(pcm.encode(&[0.6]).unwrap(), vec![3]);
    assert_eq!(pcm.decode(&[3]).unwrap(), vec![0.75]);
    assert_eq!(pcm.encode(&[1.0 + 100.0]).unwrap(), vec![3]);

    let pcm16 = Pcm::new(16, -1.0, 1.0).unwrap();
    assert_eq!(pcm16.encode(&[101.0]).unwrap(), vec![65_535]);
}

#[test]
fn test_dm_steps_are_delta() {
    let dm = Dm::new(0.1).unwrap();
    let t = time_grid(1_000.0, 500);
    let samples = sine(5.0, 1.0, &t);
    let bits = dm.encode(&samples).unwrap();
    assert_eq!(bits.len(), samples.len());
    let decoded = dm.decode(&bits).unwrap();
    assert!((decoded[0].abs() - 0.1).abs() < 1e-12);
    for pair in decoded.windows(2) {
        assert!(((pair[1] - pair[0]).abs() - 0.1).abs() < 1e-9);
    }
}

#[test]
fn test_dm_tracks_slow_signal() {
    // Max slope 2*pi*2*1 / 1000 = 0.0126 per sample, well under delta.
    let dm = Dm::new(0.05).unwrap();
    let t = time_grid(1_000.0, 1_000);
    let samples = sine(2.0, 1.0, &t);
    let decoded = dm.decode(&dm.encode(&samples).unwrap()).unwrap();
    assert!(max_abs_error(&samples, &decoded) <= 0.1 + 1e-9);
}

#[test]
fn test_binary_modulators_roundtrip() {
    let modulators: Vec<Box<dyn DigitalModulator>> = vec![
        Box::new(Ask::new(1_000.0, 1.0, 0.0).unwrap()),
        Box::new(Bfsk::new(1_000.0, 2_000.0, 1.0).unwrap()),
        Box::new(Bpsk::new(1_000.0, 1.0).unwrap()),
    ];
    for seed in 0..8 {
        let bits = random_bits(64, seed);
        for m in &modulators {
            let symbols = m.modulate(&bits).unwrap();
            assert_eq!(symbols.len(), bits.len());
            assert_eq!(m.demodulate(&symbols).unwrap(), bits);
        }
    }
}

#[test]
fn test_four_ary_modulators_symmetry() {
    let modulators: Vec<Box<dyn DigitalModulator>> = vec![
        Box::new(Mfsk::new([1_000.0, 2_000.0, 3_000.0, 4_000.0], 1.0).unwrap()),
        Box::new(Qpsk::new(1_000.0, 1.0).unwrap()),
    ];
    for m in &modulators {
        assert_eq!(m.bits_per_symbol(), 2);
        for pair in [[0u8, 0], [0, 1], [1, 0], [1, 1]] {
            let symbols = m.modulate(&pair).unwrap();
            assert_eq!(m.demodulate(&symbols).unwrap(), pair.to_vec());
        }
        let odd = random_bits(31, 4);
        let symbols = m.modulate(&odd).unwrap();
        assert_eq!(symbols.len(), 16);
        let decoded = m.demodulate(&symbols).unwrap();
        assert_eq!(&decoded[..31], odd.as_slice());
        assert_eq!(decoded[31], 0);
    }
}

#[test]
fn test_fm_recovers_message() {
    let fs = 16_384.0;
    let t = time_grid(fs, 4_096);
    let message = sine(4.0, 1.0, &t);
    let fm = Fm::new(1_024.0, 1.0, 100.0).unwrap();
    let modulated = fm.modulate(&message, &t).unwrap();
    let recovered = fm.demodulate(&modulated, &t).unwrap();
    assert_eq!(recovered.len(), message.len());
    let err = max_abs_error(&message[1_024..3_072], &recovered[1_024..3_072]);
    assert!(err < 0.05, "max error {}", err);
}

#[test]
fn test_pm_recovers_message() {
    let fs = 16_384.0;
    let t = time_grid(fs, 4_096);
    let message = sine(4.0, 0.5, &t);
    let pm = Pm::new(1_024.0, 2.0, FRAC_PI_2).unwrap();
    let modulated = pm.modulate(&message, &t).unwrap();
    let recovered = pm.demodulate(&modulated, &t).unwrap();
    let err = max_abs_error(&message[1_024..3_072], &recovered[1_024..3_072]);
    assert!(err < 0.05, "max error {}", err);
}

#[test]
fn test_am_recovers_message_within_bound() {
    let fs = 50_000.0;
    let t = time_grid(fs, 10_000);
    let message = sine(10.0, 0.5, &t);
    let am = Am::new(1_000.0, 1.0, 1.0).unwrap();
    let modulated = am.modulate(&message, &t).unwrap();
    let recovered = am.demodulate(&modulated, &t).unwrap();
    assert_eq!(recovered.len(), message.len());
    let rms = rms_error(&message, &recovered);
    assert!(rms < 0.75, "rms error {}", rms);
    let r = correlation(&message, &recovered);
    assert!(r > 0.3, "correlation {}", r);
}

#[test]
fn test_analog_modulators_validate_arrays() {
    let modulators: Vec<Box<dyn AnalogModulator>> = vec![
        Box::new(Am::new(1_000.0, 1.0, 1.0).unwrap()),
        Box::new(Fm::new(1_000.0, 1.0, 100.0).unwrap()),
        Box::new(Pm::new(1_000.0, 1.0, 1.0).unwrap()),
    ];
    for m in &modulators {
        assert!(matches!(
            m.modulate(&[0.0, 0.1], &[0.0]),
            Err(EngineError::LengthMismatch { .. })
        ));
        assert!(matches!(
            m.modulate(&[], &[]),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(matches!(
            m.demodulate(&[0.0], &[0.0, 1.0]),
            Err(EngineError::LengthMismatch { .. })
        ));
    }
}
