//! Bot API request and envelope types.

use crate::source::PollRequest;
use serde::{Deserialize, Serialize};
use tgpoll_core::entities::UpdateKind;

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Option<TgResponseParameters>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponseParameters {
    #[serde(default)]
    pub retry_after: Option<u64>,
    /// The group was upgraded to a supergroup with this id.
    #[serde(default)]
    pub migrate_to_chat_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetUpdatesBody<'a> {
    pub offset: i64,
    pub timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<&'a [UpdateKind]>,
}

impl<'a> From<&'a PollRequest> for GetUpdatesBody<'a> {
    fn from(req: &'a PollRequest) -> Self {
        Self {
            offset: req.offset,
            timeout: req.timeout.as_secs(),
            limit: req.limit,
            allowed_updates: req.allowed_updates.as_deref(),
        }
    }
}
