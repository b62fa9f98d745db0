use thiserror::Error;

/// A payload that could not be turned into (or out of) the entity model.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A known field had the wrong shape, or a required one was missing.
    ///
    /// `path` is the dotted location of the failing field (e.g.
    /// `result[0].message.date`), `.` when the failure is at the root.
    #[error("invalid payload at `{path}`: {message}")]
    Field { path: String, message: String },

    /// The envelope said `ok: true` but carried no `result`.
    #[error("response envelope has no result")]
    MissingResult,

    /// Update ids in a batch were not strictly ascending.
    #[error("update ids not strictly increasing: {previous} followed by {next}")]
    NonMonotonic { previous: i64, next: i64 },

    /// An entity could not be encoded back to JSON.
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
