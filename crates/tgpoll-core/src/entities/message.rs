use super::chat::Chat;
use super::user::User;
use crate::markup::ReplyMarkup;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message in a chat, channel post, or an edit of either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique within `chat`, not globally.
    pub message_id: i64,
    /// Absent for channel posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    /// Set when the sender is a channel or the chat itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_chat: Option<Chat>,
    /// Unix seconds. Kept as i64 so dates past 2038-01-19 survive.
    pub date: i64,
    pub chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via_bot: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl Message {
    /// A message with only the required fields set.
    pub fn new(message_id: i64, chat: Chat, date: i64) -> Self {
        Self {
            message_id,
            from: None,
            sender_chat: None,
            date,
            chat,
            edit_date: None,
            reply_to_message: None,
            via_bot: None,
            author_signature: None,
            text: None,
            entities: None,
            caption: None,
            reply_markup: None,
        }
    }

    /// `date` as a UTC timestamp, `None` if it is outside chrono's range.
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }

    /// Text if present, otherwise the media caption.
    pub fn text_or_caption(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }

    /// Bot commands (`/start`, `/help@mybot`) found in `entities`, in order.
    pub fn commands(&self) -> Vec<&str> {
        let (Some(text), Some(entities)) = (self.text.as_deref(), self.entities.as_ref()) else {
            return Vec::new();
        };
        entities
            .iter()
            .filter(|e| e.entity_type == "bot_command")
            .filter_map(|e| e.slice(text))
            .collect()
    }
}

/// A special span in a message text: command, mention, URL, formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Offset in UTF-16 code units.
    pub offset: i64,
    /// Length in UTF-16 code units.
    pub length: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl MessageEntity {
    /// The substring of `text` covered by this entity.
    ///
    /// Offsets are UTF-16 based, so they are mapped back onto char
    /// boundaries. Returns `None` when the span falls outside `text`.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start_units = usize::try_from(self.offset).ok()?;
        let end_units = start_units.checked_add(usize::try_from(self.length).ok()?)?;

        let mut units = 0usize;
        let mut start = None;
        let mut end = None;
        for (idx, ch) in text.char_indices() {
            if units == start_units {
                start = Some(idx);
            }
            if units == end_units {
                end = Some(idx);
                break;
            }
            units += ch.len_utf16();
        }
        if units == start_units && start.is_none() {
            start = Some(text.len());
        }
        if units == end_units && end.is_none() {
            end = Some(text.len());
        }
        text.get(start?..end?)
    }
}
