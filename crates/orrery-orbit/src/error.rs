//! Orbit computation errors.

/// Errors produced while interpreting dates or orbital parameters.
#[derive(Debug, thiserror::Error)]
pub enum OrbitError {
    /// The date string was neither `YYYY-MM-DD` nor an RFC 3339 date-time.
    #[error("invalid date {input:?}: expected YYYY-MM-DD or RFC 3339")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// The scale factor must be finite and positive.
    #[error("invalid scale factor {0}")]
    InvalidScale(f64),
}
