//! `getUpdates` over HTTP.
//!
//! Docs: <https://core.telegram.org/bots/api#getupdates>

mod types;

#[cfg(test)]
mod tests;

use crate::error::FetchError;
use crate::source::{PollRequest, UpdateSource};
use async_trait::async_trait;
use std::time::Duration;
use tgpoll_core::codec;
use tgpoll_core::config::BotSettings;
use tgpoll_core::entities::Update;
use tgpoll_core::error::DecodeError;
use tracing::{debug, warn};
use types::{GetUpdatesBody, TgResponse};

/// Extra time on top of the long-poll timeout before the HTTP request
/// itself is abandoned.
const REQUEST_GRACE: Duration = Duration::from_secs(5);

/// Longest slice of a non-JSON error body kept in a rejection description.
const MAX_ERROR_BODY: usize = 200;

/// Fetches updates from the Bot API with `reqwest`.
pub struct HttpFetcher {
    client: reqwest::Client,
    /// `{api_base}/bot{token}`. Never logged.
    base_url: String,
}

impl HttpFetcher {
    pub fn new(api_base: &str, token: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_base, token)
    }

    /// Reuse an existing client (connection pool, proxy settings).
    pub fn with_client(client: reqwest::Client, api_base: &str, token: &str) -> Self {
        let base_url = format!("{}/bot{token}", api_base.trim_end_matches('/'));
        Self { client, base_url }
    }

    pub fn from_settings(bot: &BotSettings) -> Self {
        Self::new(&bot.api_base, &bot.token)
    }
}

/// Client-side deadline for one long poll: the server-side wait plus grace.
pub(crate) fn request_timeout(poll: Duration) -> Duration {
    poll.saturating_add(REQUEST_GRACE)
}

#[async_trait]
impl UpdateSource for HttpFetcher {
    async fn fetch(&self, request: &PollRequest) -> Result<Vec<Update>, FetchError> {
        let url = format!("{}/getUpdates", self.base_url);
        let body = GetUpdatesBody::from(request);
        debug!(
            "telegram: getUpdates offset={} timeout={}s",
            body.offset, body.timeout
        );

        let resp = self
            .client
            .post(&url)
            .timeout(request_timeout(request.timeout))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                FetchError::Transport(format!("getUpdates request failed: {}", e.without_url()))
            })?;

        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(|e| {
            FetchError::Transport(format!("getUpdates body read failed: {}", e.without_url()))
        })?;

        parse_updates_response(status, &text)
    }
}

/// Turn an HTTP status and body into a batch of updates or a classified error.
pub(crate) fn parse_updates_response(status: u16, body: &str) -> Result<Vec<Update>, FetchError> {
    let success = (200..300).contains(&status);

    match codec::decode::<TgResponse<Vec<Update>>>(body) {
        Ok(envelope) if envelope.ok && success => {
            let updates = envelope.result.ok_or(DecodeError::MissingResult)?;
            check_ascending(&updates)?;
            Ok(updates)
        }
        Ok(envelope) => {
            let params = envelope.parameters;
            if let Some(chat_id) = params.as_ref().and_then(|p| p.migrate_to_chat_id) {
                warn!("telegram: chat migrated to {chat_id}");
            }
            let fallback = if success { 0 } else { i64::from(status) };
            Err(FetchError::ServiceRejected {
                code: envelope.error_code.unwrap_or(fallback),
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("HTTP {status}")),
                retry_after: params.and_then(|p| p.retry_after),
            })
        }
        Err(_) if !success => Err(FetchError::ServiceRejected {
            code: i64::from(status),
            description: body.chars().take(MAX_ERROR_BODY).collect(),
            retry_after: None,
        }),
        Err(e) => Err(FetchError::Decode(e)),
    }
}

/// The service promises ascending ids; a batch that breaks that is rejected.
fn check_ascending(updates: &[Update]) -> Result<(), DecodeError> {
    for pair in updates.windows(2) {
        let (previous, next) = (pair[0].update_id, pair[1].update_id);
        if next <= previous {
            return Err(DecodeError::NonMonotonic { previous, next });
        }
    }
    Ok(())
}
