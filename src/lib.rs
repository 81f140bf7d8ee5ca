/// Top Errors - a test log analyzer
///
/// This library reads logs made of `PASS`, `FAIL_<code>` and other tokens,
/// tallies the failure codes, and produces a summary report.

// Re-export core modules
pub mod core;
pub mod utils;

// Re-export main types for convenience
pub use crate::core::aggregator::{aggregate, Aggregator, Messages};
pub use crate::core::classifier::{classify, Classification};
pub use crate::core::report::Report;
pub use crate::core::tokenizer::tokenize;
pub use crate::utils::file_utils::LogFileError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Analyze log text and return the report
///
/// This is a convenience function for simple use cases.
pub fn analyze_text(text: &str) -> Report {
    aggregate(&tokenize(text))
}

/// Analyze a single log file and return the report
///
/// # Arguments
///
/// * `file_path` - Path to the log file
///
/// # Returns
///
/// The report for the file, or an error when the file cannot be read
pub fn analyze_log_file<P: AsRef<std::path::Path>>(file_path: P) -> Result<Report, LogFileError> {
    let text = utils::file_utils::read_log_text(file_path.as_ref())?;
    Ok(analyze_text(&text))
}

/// Library configuration
pub mod config {
    use std::path::Path;

    use log::{error, info};
    use serde::{Deserialize, Serialize};

    use crate::core::aggregator::Messages;

    /// Settings read from a JSON configuration file
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AnalyzerConfig {
        /// Status messages attached to reports
        pub messages: Messages,
    }

    /// Load configuration from file if provided
    ///
    /// A missing or malformed file is logged and the defaults are used.
    pub fn load_config(config_path: Option<&Path>) -> AnalyzerConfig {
        let Some(path) = config_path else {
            return AnalyzerConfig::default();
        };

        if !path.exists() {
            error!("Configuration file not found: {}", path.display());
            return AnalyzerConfig::default();
        }

        let config_str = match std::fs::read_to_string(path) {
            Ok(config_str) => config_str,
            Err(e) => {
                error!("Failed to read configuration file {}: {}", path.display(), e);
                return AnalyzerConfig::default();
            }
        };

        match serde_json::from_str(&config_str) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                error!("Invalid JSON in configuration file: {}", e);
                AnalyzerConfig::default()
            }
        }
    }
}

/// Command-line application functionality
pub mod app {
    use std::path::Path;

    use log::info;

    use crate::config::AnalyzerConfig;
    use crate::core::aggregator::Aggregator;
    use crate::core::report::Report;
    use crate::core::tokenizer::tokenize;
    use crate::utils::file_utils::{self, LogFileError};

    /// Run the analyzer on one log file
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path to the log file
    /// * `config` - Configuration options
    ///
    /// # Returns
    ///
    /// The report for the file
    pub fn run_analyzer(file_path: &Path, config: &AnalyzerConfig) -> Result<Report, LogFileError> {
        let text = file_utils::read_log_text(file_path)?;

        if let Ok(metadata) = file_utils::get_file_metadata(file_path) {
            for (key, value) in &metadata {
                info!("{}: {}", key, value);
            }
        }

        let tokens = tokenize(&text);
        info!("Extracted {} tokens from {}", tokens.len(), file_path.display());

        Ok(Aggregator::new(&config.messages).aggregate(&tokens))
    }
}
