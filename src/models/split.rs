//! Data-split ranges and placeholder tokens
//!
//! When a specification declares data splitting, range-dependent statements
//! are emitted with two placeholder tokens that are substituted once per
//! [`DataSplitRange`]. The tokens are a wire-level contract: external
//! callers parse and substitute them themselves in some deployments, so
//! they must never change.

use serde::{Deserialize, Serialize};

/// Lower-bound token substituted into range-dependent statements.
pub const DATA_SPLIT_LOWER_BOUND_PLACEHOLDER: &str = "{DATA_SPLIT_LOWER_BOUND_PLACEHOLDER}";
/// Upper-bound token substituted into range-dependent statements.
pub const DATA_SPLIT_UPPER_BOUND_PLACEHOLDER: &str = "{DATA_SPLIT_UPPER_BOUND_PLACEHOLDER}";
/// Partition column enumerating version ranks under all-versions versioning.
pub const DATA_SPLIT_COLUMN: &str = "data_split";

/// One bounded sub-range of an oversized staging batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataSplitRange {
    pub lower_bound: u64,
    pub upper_bound: u64,
}

impl DataSplitRange {
    pub fn new(lower_bound: u64, upper_bound: u64) -> Self {
        Self {
            lower_bound,
            upper_bound,
        }
    }

    /// Substitute this range's bounds for the placeholder tokens in `sql`.
    pub fn substitute(&self, sql: &str) -> String {
        sql.replace(
            DATA_SPLIT_LOWER_BOUND_PLACEHOLDER,
            &self.lower_bound.to_string(),
        )
        .replace(
            DATA_SPLIT_UPPER_BOUND_PLACEHOLDER,
            &self.upper_bound.to_string(),
        )
    }
}
