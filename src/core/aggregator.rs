/// Aggregation of classified tokens into a report
///
/// This file contains the Aggregator, which classifies every token of a log,
/// tallies error codes and residual tokens, and decides the status message.

use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::classifier::{classify, Classification, UNKNOWN_LABEL};
use crate::core::report::Report;

/// Status messages attached to a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// The log contained no tokens at all
    pub no_logs: String,
    /// Every pass/fail token was a pass
    pub all_pass: String,
    /// No token was a pass or fail signal
    pub no_pass_or_fail: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            no_logs: "no logs included".to_string(),
            all_pass: "all PASS".to_string(),
            no_pass_or_fail: "no pass or fail information present in the logs".to_string(),
        }
    }
}

/// What has been seen while walking the tokens
#[derive(Debug, Default, Clone, Copy)]
struct Seen {
    pass_or_fail: bool,
    fail: bool,
    pass: bool,
}

/// Classifies tokens and builds reports
pub struct Aggregator<'m> {
    messages: &'m Messages,
}

impl<'m> Aggregator<'m> {
    /// Create a new Aggregator using the given status messages
    pub fn new(messages: &'m Messages) -> Self {
        Self { messages }
    }

    /// Build a report from a token sequence
    ///
    /// # Arguments
    ///
    /// * `tokens` - Tokens produced by the tokenizer
    ///
    /// # Returns
    ///
    /// The report for these tokens. Never fails, the empty sequence included.
    pub fn aggregate<S: AsRef<str>>(&self, tokens: &[S]) -> Report {
        debug!("Aggregating {} tokens", tokens.len());

        if tokens.is_empty() {
            info!("Log contains no tokens");
            return Report {
                message: Some(self.messages.no_logs.clone()),
                ..Report::default()
            };
        }

        let mut top_errors = BTreeMap::new();
        let mut etc = BTreeMap::new();
        let mut seen = Seen::default();

        for token in tokens {
            let classification = classify(token.as_ref());
            seen.pass_or_fail |= classification.is_signal();

            match classification {
                Classification::Pass => seen.pass = true,
                Classification::TopError(code) => {
                    seen.fail = true;
                    increment(&mut top_errors, code);
                }
                Classification::Unknown => {
                    seen.fail = true;
                    increment(&mut etc, UNKNOWN_LABEL.to_string());
                }
                Classification::Other(original) => {
                    increment(&mut etc, original.to_string());
                }
            }
        }

        let message = self.message_for(seen);

        info!(
            "Aggregated {} tokens: {} error codes, {} residual labels",
            tokens.len(),
            top_errors.len(),
            etc.len()
        );

        Report {
            etc,
            message,
            top_errors,
        }
    }

    /// Pick the status message for what was seen, if any
    fn message_for(&self, seen: Seen) -> Option<String> {
        if seen.pass_or_fail && !seen.fail && seen.pass {
            Some(self.messages.all_pass.clone())
        } else if !seen.pass_or_fail {
            Some(self.messages.no_pass_or_fail.clone())
        } else {
            None
        }
    }
}

/// Add one to the count for `key`, inserting it at zero first if absent
fn increment(counts: &mut BTreeMap<String, u64>, key: String) {
    *counts.entry(key).or_insert(0) += 1;
}

/// Build a report with the default status messages
pub fn aggregate<S: AsRef<str>>(tokens: &[S]) -> Report {
    Aggregator::new(&Messages::default()).aggregate(tokens)
}
