//! Numeric utilities for analog demodulation.
//!
//! FFT-based Hilbert transform, phase unwrapping, cumulative integration,
//! finite differences and a centered moving average.

use std::f64::consts::PI;

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Analytic signal `real + i*imag`, where `imag` is the Hilbert transform of `real`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticSignal {
    /// The original signal.
    pub real: Vec<f64>,
    /// Hilbert transform of the signal.
    pub imag: Vec<f64>,
}

impl AnalyticSignal {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.real.len()
    }

    /// Returns true if the signal has no samples.
    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    /// Instantaneous phase `atan2(imag, real)` in (-pi, pi].
    pub fn instantaneous_phase(&self) -> Vec<f64> {
        self.real
            .iter()
            .zip(self.imag.iter())
            .map(|(re, im)| im.atan2(*re))
            .collect()
    }

    /// Instantaneous amplitude `|real + i*imag|`.
    pub fn envelope(&self) -> Vec<f64> {
        self.real
            .iter()
            .zip(self.imag.iter())
            .map(|(re, im)| re.hypot(*im))
            .collect()
    }
}

/// Computes the analytic signal of `signal`.
///
/// The signal is zero-padded to the next power of two, every positive
/// frequency bin is multiplied by `-i` and every negative one by `+i` (DC and
/// Nyquist are zeroed), and the inverse transform is truncated back to the
/// input length.
pub fn hilbert(signal: &[f64]) -> AnalyticSignal {
    let n = signal.len();
    if n == 0 {
        return AnalyticSignal {
            real: Vec::new(),
            imag: Vec::new(),
        };
    }

    let size = n.next_power_of_two();
    let mut spectrum: Vec<Complex<f64>> = signal
        .iter()
        .map(|&s| Complex::new(s, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(size)
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(size);
    fft.process(&mut spectrum);

    let half = size / 2;
    let minus_i = Complex::new(0.0, -1.0);
    let plus_i = Complex::new(0.0, 1.0);
    for (k, bin) in spectrum.iter_mut().enumerate() {
        if k == 0 || (size % 2 == 0 && k == half) {
            *bin = Complex::new(0.0, 0.0);
        } else if k < half || (size % 2 == 1 && k == half) {
            *bin *= minus_i;
        } else {
            *bin *= plus_i;
        }
    }

    let ifft = planner.plan_fft_inverse(size);
    ifft.process(&mut spectrum);

    // rustfft does not normalize the inverse transform.
    let scale = 1.0 / size as f64;
    let imag = spectrum.iter().take(n).map(|c| c.re * scale).collect();

    AnalyticSignal {
        real: signal.to_vec(),
        imag,
    }
}

/// Removes 2*pi jumps from a wrapped phase sequence.
///
/// A running offset is decreased by 2*pi whenever the sample-to-sample delta
/// exceeds pi and increased by 2*pi whenever it is below -pi.
pub fn unwrap_phase(phase: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(phase.len());
    let mut offset = 0.0;
    for (i, &p) in phase.iter().enumerate() {
        if i > 0 {
            let delta = p - phase[i - 1];
            if delta > PI {
                offset -= 2.0 * PI;
            } else if delta < -PI {
                offset += 2.0 * PI;
            }
        }
        out.push(p + offset);
    }
    out
}

/// Cumulative sum scaled by `dt` (rectangle rule).
pub fn integrate(values: &[f64], dt: f64) -> Vec<f64> {
    let mut acc = 0.0;
    values
        .iter()
        .map(|v| {
            acc += v;
            acc * dt
        })
        .collect()
}

/// Backward difference divided by `dt`, same length as the input.
///
/// The first output repeats the first difference. A single sample has
/// derivative 0.
pub fn differentiate(values: &[f64], dt: f64) -> Vec<f64> {
    match values.len() {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let diffs: Vec<f64> = values.windows(2).map(|w| (w[1] - w[0]) / dt).collect();
            std::iter::once(diffs[0]).chain(diffs).collect()
        }
    }
}

/// Centered moving average with zero-padded edges, same length as the input.
///
/// Output `i` averages inputs `hi + 1 - window ..= hi` with
/// `hi = i + (window - 1) / 2`; samples outside the input count as zero.
/// A window of 0 or 1 returns the input unchanged.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    if window <= 1 || n == 0 {
        return values.to_vec();
    }

    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0);
    for v in values {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + v);
    }

    let reach = (window - 1) / 2;
    (0..n)
        .map(|i| {
            let hi = (i + reach).min(n - 1);
            let lo = (i + reach + 1).saturating_sub(window);
            (prefix[hi + 1] - prefix[lo]) / window as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_close(a: &[f64], b: &[f64], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            assert!((x - y).abs() < tol, "index {}: {} vs {}", i, x, y);
        }
    }

    #[test]
    fn test_hilbert_of_cosine_is_sine() {
        let n = 64;
        let w = 2.0 * PI * 4.0 / n as f64;
        let cosine: Vec<f64> = (0..n).map(|k| (w * k as f64).cos()).collect();
        let sine: Vec<f64> = (0..n).map(|k| (w * k as f64).sin()).collect();

        let analytic = hilbert(&cosine);
        assert_eq!(analytic.real, cosine);
        assert_close(&analytic.imag, &sine, 1e-10);
        assert_close(&analytic.envelope(), &vec![1.0; n], 1e-10);
    }

    #[test]
    fn test_hilbert_phase_tracks_carrier() {
        let n = 128;
        let w = 2.0 * PI * 8.0 / n as f64;
        let carrier: Vec<f64> = (0..n).map(|k| (w * k as f64).cos()).collect();
        let phase = unwrap_phase(&hilbert(&carrier).instantaneous_phase());
        let expected: Vec<f64> = (0..n).map(|k| w * k as f64).collect();
        assert_close(&phase, &expected, 1e-9);
    }

    #[test]
    fn test_hilbert_zero_dc_and_edge_cases() {
        let analytic = hilbert(&[2.0; 8]);
        assert_close(&analytic.imag, &[0.0; 8], 1e-12);

        assert!(hilbert(&[]).is_empty());
        let single = hilbert(&[3.0]);
        assert_eq!(single.len(), 1);
        assert_eq!(single.imag, vec![0.0]);
    }

    #[test]
    fn test_hilbert_pads_non_power_of_two() {
        let signal: Vec<f64> = (0..100).map(|k| (k as f64 * 0.3).sin()).collect();
        let analytic = hilbert(&signal);
        assert_eq!(analytic.real.len(), 100);
        assert_eq!(analytic.imag.len(), 100);
    }

    #[test]
    fn test_unwrap_phase() {
        let wrapped = vec![3.0, -3.0, -2.5, 3.1, 0.0];
        let unwrapped = unwrap_phase(&wrapped);
        let expected = vec![
            3.0,
            -3.0 + 2.0 * PI,
            -2.5 + 2.0 * PI,
            3.1,
            0.0,
        ];
        assert_close(&unwrapped, &expected, 1e-12);
    }

    #[test]
    fn test_integrate() {
        assert_eq!(integrate(&[1.0, 2.0, 3.0], 0.5), vec![0.5, 1.5, 3.0]);
        assert_eq!(integrate(&[], 0.5), Vec::<f64>::new());
    }

    #[test]
    fn test_differentiate() {
        assert_eq!(
            differentiate(&[0.0, 1.0, 3.0, 6.0], 0.5),
            vec![2.0, 2.0, 4.0, 6.0]
        );
        assert_eq!(differentiate(&[4.0], 0.1), vec![0.0]);
        assert_eq!(differentiate(&[], 0.1), Vec::<f64>::new());
    }

    #[test]
    fn test_moving_average_odd_window() {
        let out = moving_average(&[3.0, 6.0, 9.0, 12.0], 3);
        assert_close(&out, &[3.0, 6.0, 9.0, 7.0], 1e-12);
    }

    #[test]
    fn test_moving_average_even_window() {
        // numpy.convolve([1, 2, 3, 4], [0.5, 0.5], mode="same") == [0.5, 1.5, 2.5, 3.5]
        let out = moving_average(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_close(&out, &[0.5, 1.5, 2.5, 3.5], 1e-12);
    }

    #[test]
    fn test_moving_average_window_one() {
        assert_eq!(moving_average(&[1.0, 5.0], 1), vec![1.0, 5.0]);
    }
}
