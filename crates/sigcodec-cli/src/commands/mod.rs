//! CLI command implementations

pub mod json_output;
pub mod list;
pub mod transmit;
pub mod validate;

use anyhow::Result;
use sigcodec_spec::TransmitBudget;

/// Resolves a `--budget` argument, defaulting when none was given.
pub(crate) fn resolve_budget(budget_name: Option<&str>) -> Result<TransmitBudget> {
    match budget_name {
        Some(name) => TransmitBudget::by_name(name).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown budget profile: {} (expected default or strict)",
                name
            )
        }),
        None => Ok(TransmitBudget::default()),
    }
}
