use crate::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;
use tgpoll_core::entities::{Update, UpdateKind};

/// Parameters of one long-poll request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollRequest {
    /// Updates with a lower id are acknowledged and will not be sent again.
    pub offset: i64,
    /// How long the service may hold the request open.
    pub timeout: Duration,
    pub limit: Option<u32>,
    pub allowed_updates: Option<Vec<UpdateKind>>,
}

/// Something that can answer a long-poll request with a batch of updates.
///
/// `HttpFetcher` talks to the Bot API; tests script their own.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// One request/response cycle. Returns updates in ascending id order.
    async fn fetch(&self, request: &PollRequest) -> Result<Vec<Update>, FetchError>;
}
