/// Summary report produced by the aggregator
///
/// The report is plain data. Maps are `BTreeMap`s and the fields are declared
/// alphabetically so that serialized output has sorted keys at every level.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tally of error codes and residual tokens for one log file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Residual tokens and the `UNKNOWN` failure bucket, with counts
    pub etc: BTreeMap<String, u64>,

    /// Status message, only set for degenerate or all-pass logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Error code to occurrence count
    pub top_errors: BTreeMap<String, u64>,
}

impl Report {
    /// Total number of failure tokens that carried an error code
    pub fn total_failures(&self) -> u64 {
        self.top_errors.values().sum()
    }

    /// Error codes ordered by count (highest first), ties broken by code
    pub fn ranked_errors(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<_> = self
            .top_errors
            .iter()
            .map(|(code, count)| (code.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}
