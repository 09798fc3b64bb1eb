//! Signal generators: sinusoids, their superposition, and sampled signals.

use std::f64::consts::PI;

use sigcodec_spec::SinusoidParams;

use crate::error::{EngineError, EngineResult};

/// A sinusoid `A*sin(2*pi*f*t + phase) + D`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sinusoid {
    params: SinusoidParams,
}

impl Sinusoid {
    /// Creates a sinusoid, rejecting non-finite fields and negative frequency.
    pub fn new(params: SinusoidParams) -> EngineResult<Self> {
        let fields = [
            ("amplitude", params.amplitude),
            ("frequency", params.frequency),
            ("phase", params.phase),
            ("offset", params.offset),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(EngineError::invalid_param(
                    name,
                    format!("must be finite, got {}", value),
                ));
            }
        }
        if params.frequency < 0.0 {
            return Err(EngineError::invalid_param(
                "frequency",
                format!("must be non-negative, got {}", params.frequency),
            ));
        }
        Ok(Self { params })
    }

    /// Returns the sinusoid's parameters.
    pub fn params(&self) -> &SinusoidParams {
        &self.params
    }

    /// Evaluates the sinusoid at time `t` (seconds).
    pub fn evaluate(&self, t: f64) -> f64 {
        let p = &self.params;
        p.amplitude * (2.0 * PI * p.frequency * t + p.phase).sin() + p.offset
    }

    /// Largest value reached.
    pub fn max_value(&self) -> f64 {
        self.params.max_value()
    }

    /// Smallest value reached.
    pub fn min_value(&self) -> f64 {
        self.params.min_value()
    }
}

/// A non-empty sum of sinusoids.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSignal {
    components: Vec<Sinusoid>,
}

impl CompositeSignal {
    /// Creates a composite signal. Fails on an empty component list.
    pub fn new(components: Vec<Sinusoid>) -> EngineResult<Self> {
        if components.is_empty() {
            return Err(EngineError::invalid_input(
                "composite signal needs at least one sinusoid",
            ));
        }
        Ok(Self { components })
    }

    /// Builds a composite signal from spec parameters.
    pub fn from_params(params: &[SinusoidParams]) -> EngineResult<Self> {
        let components = params
            .iter()
            .map(|p| Sinusoid::new(*p))
            .collect::<EngineResult<Vec<_>>>()?;
        Self::new(components)
    }

    /// Component sinusoids in order.
    pub fn components(&self) -> &[Sinusoid] {
        &self.components
    }

    /// Evaluates the sum of all components at `t`.
    pub fn evaluate(&self, t: f64) -> f64 {
        self.components.iter().map(|s| s.evaluate(t)).sum()
    }

    /// Highest component frequency.
    pub fn max_frequency(&self) -> f64 {
        self.components
            .iter()
            .map(|s| s.params.frequency)
            .fold(0.0, f64::max)
    }

    /// Nyquist rate: twice the highest component frequency.
    pub fn min_sampling_rate(&self) -> f64 {
        2.0 * self.max_frequency()
    }

    /// Bounds `(min, max)` the sum can reach.
    pub fn amplitude_range(&self) -> (f64, f64) {
        let min = self.components.iter().map(|s| s.min_value()).sum();
        let max = self.components.iter().map(|s| s.max_value()).sum();
        (min, max)
    }

    /// Samples the signal at `t_i = i / sample_rate` over `[0, duration)`.
    pub fn sample(&self, sample_rate: f64, duration: f64) -> EngineResult<AnalogSignal> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(EngineError::invalid_param(
                "sample_rate",
                format!("must be positive, got {}", sample_rate),
            ));
        }
        if !(duration.is_finite() && duration > 0.0) {
            return Err(EngineError::invalid_param(
                "duration",
                format!("must be positive, got {}", duration),
            ));
        }
        let times = time_grid(sample_rate, sigcodec_spec::sample_count(sample_rate, duration));
        let values = times.iter().map(|&t| self.evaluate(t)).collect();
        AnalogSignal::new(times, values)
    }
}

/// Uniform time grid `t_i = i / sample_rate` for `i < n`.
pub fn time_grid(sample_rate: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 / sample_rate).collect()
}

/// Samples paired with strictly increasing times.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogSignal {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl AnalogSignal {
    /// Creates a sampled signal.
    ///
    /// Fails with `LengthMismatch` when the arrays differ in length and with
    /// `InvalidInput` when times are not strictly increasing or values are
    /// not finite.
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> EngineResult<Self> {
        if times.len() != values.len() {
            return Err(EngineError::length_mismatch(times.len(), values.len()));
        }
        if let Some(i) = times.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(EngineError::invalid_input(format!(
                "times must be strictly increasing, violated at index {}",
                i + 1
            )));
        }
        if let Some(v) = values.iter().find(|v| !v.is_finite()) {
            return Err(EngineError::invalid_input(format!(
                "sample values must be finite, got {}",
                v
            )));
        }
        Ok(Self { times, values })
    }

    /// Builds a signal from values on a uniform grid.
    pub fn uniform(values: Vec<f64>, sample_rate: f64) -> EngineResult<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(EngineError::invalid_param(
                "sample_rate",
                format!("must be positive, got {}", sample_rate),
            ));
        }
        Self::new(time_grid(sample_rate, values.len()), values)
    }

    /// Sample times in seconds.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Sample values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Splits into `(times, values)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.times, self.values)
    }
}
