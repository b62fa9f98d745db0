use super::user::User;
use serde::{Deserialize, Serialize};

/// Chat type: "private", "group", "supergroup", or "channel".
///
/// Values the client does not know are kept verbatim so they encode back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
    Other(String),
}

impl ChatType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Private => "private",
            Self::Group => "group",
            Self::Supergroup => "supergroup",
            Self::Channel => "channel",
            Self::Other(s) => s,
        }
    }

    /// Group or supergroup.
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group | Self::Supergroup)
    }
}

impl From<String> for ChatType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "private" => Self::Private,
            "group" => Self::Group,
            "supergroup" => Self::Supergroup,
            "channel" => Self::Channel,
            _ => Self::Other(s),
        }
    }
}

impl From<ChatType> for String {
    fn from(t: ChatType) -> Self {
        match t {
            ChatType::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// A private chat, group, supergroup, or channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    /// Supergroup and channel ids are large negative numbers.
    pub id: i64,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_forum: Option<bool>,
}

impl Chat {
    pub fn new(id: i64, chat_type: ChatType) -> Self {
        Self {
            id,
            chat_type,
            title: None,
            username: None,
            first_name: None,
            last_name: None,
            is_forum: None,
        }
    }
}

/// A member's status in a chat, as carried by member-update events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMember {
    /// "creator", "administrator", "member", "restricted", "left" or "kicked".
    pub status: String,
    pub user: User,
}

/// A change in a chat member's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
    pub from: User,
    pub date: i64,
    pub old_chat_member: ChatMember,
    pub new_chat_member: ChatMember,
}
