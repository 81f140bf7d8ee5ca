/// Core module for log analysis
///
/// This module contains the tokenizer, the token classifier, and the aggregator
/// that turns classified tokens into a summary report.

pub mod aggregator;
pub mod classifier;
pub mod report;
pub mod tokenizer;
