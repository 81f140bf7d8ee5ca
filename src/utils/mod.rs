/// Utility modules for the log analyzer
///
/// This module contains utility functions for reading log files and for
/// formatting and exporting reports.

pub mod file_utils;
pub mod output_formatter;
