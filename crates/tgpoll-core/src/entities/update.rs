use super::chat::ChatMemberUpdated;
use super::message::Message;
use super::queries::{CallbackQuery, ChosenInlineResult, InlineQuery};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The payload kinds an update can carry.
///
/// The wire names double as `allowed_updates` filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    CallbackQuery,
    InlineQuery,
    ChosenInlineResult,
    MyChatMember,
    ChatMember,
}

impl UpdateKind {
    /// All kinds, in the order `Update::kind` checks them.
    pub const ALL: [UpdateKind; 9] = [
        UpdateKind::Message,
        UpdateKind::EditedMessage,
        UpdateKind::ChannelPost,
        UpdateKind::EditedChannelPost,
        UpdateKind::CallbackQuery,
        UpdateKind::InlineQuery,
        UpdateKind::ChosenInlineResult,
        UpdateKind::MyChatMember,
        UpdateKind::ChatMember,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::EditedMessage => "edited_message",
            Self::ChannelPost => "channel_post",
            Self::EditedChannelPost => "edited_channel_post",
            Self::CallbackQuery => "callback_query",
            Self::InlineQuery => "inline_query",
            Self::ChosenInlineResult => "chosen_inline_result",
            Self::MyChatMember => "my_chat_member",
            Self::ChatMember => "chat_member",
        }
    }
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown update kind '{s}'"))
    }
}

/// One event delivered by `getUpdates`.
///
/// At most one payload field is populated. Payload kinds this client does
/// not model decode to an update with every payload `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_channel_post: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_query: Option<InlineQuery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_inline_result: Option<ChosenInlineResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_chat_member: Option<ChatMemberUpdated>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_member: Option<ChatMemberUpdated>,
}

impl Update {
    /// An update with no payload.
    pub fn new(update_id: i64) -> Self {
        Self {
            update_id,
            message: None,
            edited_message: None,
            channel_post: None,
            edited_channel_post: None,
            callback_query: None,
            inline_query: None,
            chosen_inline_result: None,
            my_chat_member: None,
            chat_member: None,
        }
    }

    pub fn has_message(&self) -> bool {
        self.message.is_some()
    }

    pub fn has_edited_message(&self) -> bool {
        self.edited_message.is_some()
    }

    pub fn has_channel_post(&self) -> bool {
        self.channel_post.is_some()
    }

    pub fn has_edited_channel_post(&self) -> bool {
        self.edited_channel_post.is_some()
    }

    pub fn has_callback_query(&self) -> bool {
        self.callback_query.is_some()
    }

    pub fn has(&self, kind: UpdateKind) -> bool {
        match kind {
            UpdateKind::Message => self.message.is_some(),
            UpdateKind::EditedMessage => self.edited_message.is_some(),
            UpdateKind::ChannelPost => self.channel_post.is_some(),
            UpdateKind::EditedChannelPost => self.edited_channel_post.is_some(),
            UpdateKind::CallbackQuery => self.callback_query.is_some(),
            UpdateKind::InlineQuery => self.inline_query.is_some(),
            UpdateKind::ChosenInlineResult => self.chosen_inline_result.is_some(),
            UpdateKind::MyChatMember => self.my_chat_member.is_some(),
            UpdateKind::ChatMember => self.chat_member.is_some(),
        }
    }

    /// The first populated payload kind, in `UpdateKind::ALL` order.
    pub fn kind(&self) -> Option<UpdateKind> {
        UpdateKind::ALL.into_iter().find(|k| self.has(*k))
    }

    /// The message-like payload, whichever of the four message kinds it is.
    pub fn any_message(&self) -> Option<&Message> {
        self.message
            .as_ref()
            .or(self.edited_message.as_ref())
            .or(self.channel_post.as_ref())
            .or(self.edited_channel_post.as_ref())
    }
}
