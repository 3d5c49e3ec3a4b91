use thiserror::Error;

/// The source text is not valid Python.
///
/// Malformed input is an expected, frequent case: the miner runs over
/// thousands of scraped snippets. The error is a value, never a panic,
/// and parsing the same input twice yields equal errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("python syntax error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure of the fragment-repair path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The repair loop hit its attempt cap without producing parseable
    /// text. A safety bound against pathological input, not a tunable.
    #[error("gave up repairing fragment after {attempts} parse attempts")]
    Exhausted { attempts: usize },
    /// Every repaired candidate still failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
