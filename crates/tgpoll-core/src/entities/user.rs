use serde::{Deserialize, Serialize};

/// A Telegram user or bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// IETF language tag of the user's client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
}

impl User {
    /// A user with only the required fields set.
    pub fn new(id: i64, is_bot: bool) -> Self {
        Self {
            id,
            is_bot,
            first_name: None,
            last_name: None,
            username: None,
            language_code: None,
            is_premium: None,
        }
    }

    /// Best human-readable name: `@username`, then "first last", then the id.
    pub fn display_name(&self) -> String {
        if let Some(ref un) = self.username {
            return format!("@{un}");
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.id.to_string(),
        }
    }
}
