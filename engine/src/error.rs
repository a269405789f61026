//! Error types for the NetGrid engine.

use thiserror::Error;

/// All possible errors from the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid watermark {input:?}: {source}")]
    InvalidWatermark {
        input: String,
        source: chrono::ParseError,
    },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Watermark;

    #[test]
    fn error_display() {
        let err = Watermark::parse("12/10/2025").unwrap_err();
        let Error::InvalidWatermark { input, .. } = &err;
        assert_eq!(input, "12/10/2025");
        assert!(err.to_string().starts_with("invalid watermark"));
    }
}
