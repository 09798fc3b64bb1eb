//! Budget limits for transmissions.
//!
//! Budgets bound how much data a single spec may push through the engine so
//! that malformed or oversized specs fail at validation instead of during
//! the round trip.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size limits for one transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmitBudget {
    /// Profile name.
    pub name: String,
    /// Maximum number of input bits.
    pub max_bits: usize,
    /// Maximum number of analog samples.
    pub max_samples: usize,
}

impl Default for TransmitBudget {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            max_bits: Self::DEFAULT_MAX_BITS,
            max_samples: Self::DEFAULT_MAX_SAMPLES,
        }
    }
}

impl TransmitBudget {
    /// Default maximum number of input bits.
    pub const DEFAULT_MAX_BITS: usize = 65_536;

    /// Default maximum number of analog samples.
    pub const DEFAULT_MAX_SAMPLES: usize = 1_048_576;

    /// Creates a new profile with default limits.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns the strict profile for interactive use.
    pub fn strict() -> Self {
        Self {
            name: "strict".to_string(),
            max_bits: 4_096,
            max_samples: 65_536,
        }
    }

    /// Looks up a profile by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "strict" => Some(Self::strict()),
            _ => None,
        }
    }

    /// Checks a bit count against this budget.
    pub fn check_bits(&self, count: usize) -> Result<(), BudgetError> {
        if count > self.max_bits {
            return Err(BudgetError::new(
                BudgetCategory::Bits,
                "bit_count",
                count.to_string(),
                self.max_bits.to_string(),
            ));
        }
        Ok(())
    }

    /// Checks a sample count against this budget.
    pub fn check_samples(&self, count: usize) -> Result<(), BudgetError> {
        if count > self.max_samples {
            return Err(BudgetError::new(
                BudgetCategory::Samples,
                "sample_count",
                count.to_string(),
                self.max_samples.to_string(),
            ));
        }
        Ok(())
    }
}

/// Error type for budget validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetError {
    /// Which budget category was exceeded.
    pub category: BudgetCategory,
    /// Limit name that was exceeded.
    pub limit: String,
    /// The actual value that exceeded the limit.
    pub actual: String,
    /// The maximum allowed value.
    pub maximum: String,
}

impl fmt::Display for BudgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} budget exceeded: {} is {}, maximum is {}",
            self.category, self.limit, self.actual, self.maximum
        )
    }
}

impl std::error::Error for BudgetError {}

impl BudgetError {
    /// Creates a new budget error.
    pub fn new(
        category: BudgetCategory,
        limit: impl Into<String>,
        actual: impl Into<String>,
        maximum: impl Into<String>,
    ) -> Self {
        Self {
            category,
            limit: limit.into(),
            actual: actual.into(),
            maximum: maximum.into(),
        }
    }
}

/// Budget category for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetCategory {
    Bits,
    Samples,
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits => write!(f, "bits"),
            Self::Samples => write!(f, "samples"),
        }
    }
}
