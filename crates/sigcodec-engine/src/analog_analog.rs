//! Analog-to-analog modulators: AM, FM and PM.
//!
//! Modulators take the message samples together with their sample times.
//! FM and PM demodulation recover the instantaneous phase from the analytic
//! signal; AM demodulation rectifies and smooths the envelope.

use std::f64::consts::PI;

use tracing::trace;

use crate::error::{EngineError, EngineResult};
use crate::numeric::{differentiate, hilbert, integrate, moving_average, unwrap_phase};

/// Common trait for continuous-domain modulators.
pub trait AnalogModulator {
    /// Modulates `message` sampled at times `t`.
    ///
    /// Fails with `LengthMismatch` if the arrays differ in length and with
    /// `InvalidInput` if they are empty or hold non-finite values.
    fn modulate(&self, message: &[f64], t: &[f64]) -> EngineResult<Vec<f64>>;

    /// Recovers the message from a modulated signal sampled at times `t`.
    fn demodulate(&self, modulated: &[f64], t: &[f64]) -> EngineResult<Vec<f64>>;
}

fn check_signal(signal: &[f64], t: &[f64]) -> EngineResult<()> {
    if signal.len() != t.len() {
        return Err(EngineError::length_mismatch(t.len(), signal.len()));
    }
    if t.is_empty() {
        return Err(EngineError::invalid_input("signal is empty"));
    }
    if let Some(v) = signal.iter().chain(t.iter()).find(|v| !v.is_finite()) {
        return Err(EngineError::invalid_input(format!(
            "signal values and times must be finite, got {}",
            v
        )));
    }
    Ok(())
}

fn check_carrier(carrier_freq: f64, carrier_amplitude: f64) -> EngineResult<()> {
    if !(carrier_freq.is_finite() && carrier_freq > 0.0) {
        return Err(EngineError::invalid_param(
            "carrier_freq",
            format!("must be positive, got {}", carrier_freq),
        ));
    }
    if !(carrier_amplitude.is_finite() && carrier_amplitude > 0.0) {
        return Err(EngineError::invalid_param(
            "carrier_amplitude",
            format!("must be positive, got {}", carrier_amplitude),
        ));
    }
    Ok(())
}

fn check_sensitivity(name: &str, value: f64) -> EngineResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(EngineError::invalid_param(
            name,
            format!("must be positive, got {}", value),
        ));
    }
    Ok(())
}

/// Sample spacing taken from the first two times, or 1 for a single sample.
fn sample_spacing(t: &[f64]) -> f64 {
    if t.len() > 1 {
        t[1] - t[0]
    } else {
        1.0
    }
}

/// Unwrapped instantaneous phase of a real passband signal.
fn unwrapped_phase(signal: &[f64]) -> Vec<f64> {
    unwrap_phase(&hilbert(signal).instantaneous_phase())
}

/// Amplitude modulation `Ac * (1 + ka * m(t)) * cos(2*pi*fc*t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Am {
    pub carrier_freq: f64,
    pub carrier_amplitude: f64,
    pub ka: f64,
}

impl Am {
    pub fn new(carrier_freq: f64, carrier_amplitude: f64, ka: f64) -> EngineResult<Self> {
        check_carrier(carrier_freq, carrier_amplitude)?;
        check_sensitivity("ka", ka)?;
        Ok(Self {
            carrier_freq,
            carrier_amplitude,
            ka,
        })
    }

    /// Odd smoothing window for envelope recovery.
    ///
    /// `max(3, floor(n / (10 * fc * duration)))`, bumped to odd and capped
    /// at `n`. A non-positive duration gives 3.
    pub fn smoothing_window(&self, t: &[f64]) -> usize {
        let n = t.len();
        let duration = match (t.first(), t.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        };
        let mut window = if duration > 0.0 {
            let estimate = (n as f64 / (10.0 * self.carrier_freq * duration)).floor();
            (estimate as usize).max(3)
        } else {
            3
        };
        if window % 2 == 0 {
            window += 1;
        }
        window.min(n)
    }
}

impl AnalogModulator for Am {
    fn modulate(&self, message: &[f64], t: &[f64]) -> EngineResult<Vec<f64>> {
        check_signal(message, t)?;
        Ok(message
            .iter()
            .zip(t)
            .map(|(m, t)| {
                self.carrier_amplitude
                    * (1.0 + self.ka * m)
                    * (2.0 * PI * self.carrier_freq * t).cos()
            })
            .collect())
    }

    /// Inverts the envelope formula on the rectified signal, then smooths it
    /// with a centered moving average.
    fn demodulate(&self, modulated: &[f64], t: &[f64]) -> EngineResult<Vec<f64>> {
        check_signal(modulated, t)?;
        let raw: Vec<f64> = modulated
            .iter()
            .map(|s| (s.abs() / self.carrier_amplitude - 1.0) / self.ka)
            .collect();
        let window = self.smoothing_window(t);
        trace!(window, samples = raw.len(), "am envelope smoothing");
        Ok(moving_average(&raw, window))
    }
}

/// Frequency modulation `Ac * cos(2*pi*fc*t + 2*pi*kf * integral(m))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fm {
    pub carrier_freq: f64,
    pub carrier_amplitude: f64,
    pub kf: f64,
}

impl Fm {
    pub fn new(carrier_freq: f64, carrier_amplitude: f64, kf: f64) -> EngineResult<Self> {
        check_carrier(carrier_freq, carrier_amplitude)?;
        check_sensitivity("kf", kf)?;
        Ok(Self {
            carrier_freq,
            carrier_amplitude,
            kf,
        })
    }
}

impl AnalogModulator for Fm {
    fn modulate(&self, message: &[f64], t: &[f64]) -> EngineResult<Vec<f64>> {
        check_signal(message, t)?;
        let integral = integrate(message, sample_spacing(t));
        Ok(t.iter()
            .zip(integral)
            .map(|(t, area)| {
                self.carrier_amplitude
                    * (2.0 * PI * self.carrier_freq * t + 2.0 * PI * self.kf * area).cos()
            })
            .collect())
    }

    /// Differentiates the unwrapped phase to get the instantaneous frequency,
    /// then removes the carrier and scales by `1 / kf`.
    fn demodulate(&self, modulated: &[f64], t: &[f64]) -> EngineResult<Vec<f64>> {
        check_signal(modulated, t)?;
        let phase = unwrapped_phase(modulated);
        Ok(differentiate(&phase, sample_spacing(t))
            .into_iter()
            .map(|w| (w / (2.0 * PI) - self.carrier_freq) / self.kf)
            .collect())
    }
}

/// Phase modulation `Ac * cos(2*pi*fc*t + kp * m(t))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pm {
    pub carrier_freq: f64,
    pub carrier_amplitude: f64,
    pub kp: f64,
}

impl Pm {
    pub fn new(carrier_freq: f64, carrier_amplitude: f64, kp: f64) -> EngineResult<Self> {
        check_carrier(carrier_freq, carrier_amplitude)?;
        check_sensitivity("kp", kp)?;
        Ok(Self {
            carrier_freq,
            carrier_amplitude,
            kp,
        })
    }
}

impl AnalogModulator for Pm {
    fn modulate(&self, message: &[f64], t: &[f64]) -> EngineResult<Vec<f64>> {
        check_signal(message, t)?;
        Ok(message
            .iter()
            .zip(t)
            .map(|(m, t)| {
                self.carrier_amplitude * (2.0 * PI * self.carrier_freq * t + self.kp * m).cos()
            })
            .collect())
    }

    fn demodulate(&self, modulated: &[f64], t: &[f64]) -> EngineResult<Vec<f64>> {
        check_signal(modulated, t)?;
        let phase = unwrapped_phase(modulated);
        Ok(phase
            .iter()
            .zip(t)
            .map(|(p, t)| (p - 2.0 * PI * self.carrier_freq * t) / self.kp)
            .collect())
    }
}
