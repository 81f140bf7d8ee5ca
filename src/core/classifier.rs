/// Token classification
///
/// Every token is one of four outcomes: a pass, a failure with an error code,
/// a failure whose code cannot be read, or something else entirely.

/// Label used in the residual tally for failures without a usable code
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// Outcome of classifying a single token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<'a> {
    /// `PASS` in any case
    Pass,
    /// `FAIL_<code>` with a non-empty code; holds the lower-cased code
    TopError(String),
    /// Starts with `FAIL` but carries no usable code
    Unknown,
    /// Anything else; holds the token text as written
    Other(&'a str),
}

impl Classification<'_> {
    /// Whether this outcome says something about pass or fail
    pub fn is_signal(&self) -> bool {
        !matches!(self, Classification::Other(_))
    }
}

/// Classify a token.
///
/// Matching of `PASS` and the `FAIL` prefix ignores case. The code after the
/// first underscore is trimmed and lower-cased; residual tokens keep their case.
///
/// # Arguments
///
/// * `token` - The token to classify
///
/// # Returns
///
/// The classification of the token
pub fn classify(token: &str) -> Classification<'_> {
    let token = token.trim();
    if token.is_empty() {
        return Classification::Other(token);
    }

    let upper = token.to_uppercase();

    if upper == "PASS" {
        return Classification::Pass;
    }

    if upper.starts_with("FAIL") {
        if let Some((_, code)) = token.split_once('_') {
            let code = code.trim();
            if !code.is_empty() {
                return Classification::TopError(code.to_lowercase());
            }
        }
        return Classification::Unknown;
    }

    Classification::Other(token)
}
