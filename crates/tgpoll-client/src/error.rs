use tgpoll_core::error::DecodeError;
use thiserror::Error;

/// Why a single `getUpdates` cycle failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure: connect, DNS, timeout, body read.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx status or an envelope with `ok: false`.
    #[error("service rejected request ({code}): {description}")]
    ServiceRejected {
        code: i64,
        description: String,
        /// Seconds the service asked us to wait, if any.
        retry_after: Option<u64>,
    },

    /// The envelope or one of its updates did not decode.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// How the poller treats a service rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionClass {
    /// Retrying will not help: bad token, bad request, conflicting poller.
    Fatal,
    /// Rate limited or temporarily unavailable.
    Transient,
}

/// Classify a rejection by its error code.
///
/// 429 and 5xx are transient. Every other 4xx is fatal. Codes outside the
/// HTTP error range (0 when the service omits one) are treated as transient.
pub fn classify_rejection(code: i64) -> RejectionClass {
    match code {
        429 => RejectionClass::Transient,
        400..=499 => RejectionClass::Fatal,
        _ => RejectionClass::Transient,
    }
}

impl FetchError {
    /// `Some` only for `ServiceRejected`.
    pub fn rejection_class(&self) -> Option<RejectionClass> {
        match self {
            Self::ServiceRejected { code, .. } => Some(classify_rejection(*code)),
            _ => None,
        }
    }
}

/// Why the polling loop stopped with an error.
#[derive(Debug, Error)]
pub enum PollError {
    /// The service rejected polling in a way retrying cannot fix.
    #[error("service rejected polling ({code}): {description}")]
    Rejected { code: i64, description: String },

    /// A batch failed to decode and the decode policy is `stop`.
    #[error("undecodable batch at offset {offset}: {source}")]
    Decode {
        offset: i64,
        #[source]
        source: DecodeError,
    },

    /// The spawned polling task panicked or was aborted.
    #[error("poller task failed: {0}")]
    Task(String),
}
