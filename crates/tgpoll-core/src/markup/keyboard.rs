use super::inline::WebAppInfo;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A custom reply keyboard shown in place of the user's keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardReplyMarkup {
    /// Rows of buttons, top to bottom.
    pub keyboard: Vec<Vec<KeyboardButton>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_persistent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resize_keyboard: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_keyboard: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_field_placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selective: Option<bool>,
}

impl KeyboardReplyMarkup {
    pub fn new(keyboard: Vec<Vec<KeyboardButton>>) -> Self {
        Self {
            keyboard,
            is_persistent: None,
            resize_keyboard: None,
            one_time_keyboard: None,
            input_field_placeholder: None,
            selective: None,
        }
    }

    /// Grid of plain text buttons, resized to fit.
    pub fn from_labels<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keyboard = rows
            .into_iter()
            .map(|row| row.into_iter().map(|label| KeyboardButton::text(label)).collect())
            .collect();
        Self {
            resize_keyboard: Some(true),
            ..Self::new(keyboard)
        }
    }
}

/// One button of a reply keyboard.
///
/// The wire format also allows a bare string for plain text buttons; that
/// form decodes to a button with only `text` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_contact: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_location: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_poll: Option<KeyboardButtonPollType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_app: Option<WebAppInfo>,
}

impl KeyboardButton {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            request_contact: None,
            request_location: None,
            request_poll: None,
            web_app: None,
        }
    }
}

#[derive(Deserialize)]
struct KeyboardButtonFields {
    text: String,
    #[serde(default)]
    request_contact: Option<bool>,
    #[serde(default)]
    request_location: Option<bool>,
    #[serde(default)]
    request_poll: Option<KeyboardButtonPollType>,
    #[serde(default)]
    web_app: Option<WebAppInfo>,
}

impl<'de> Deserialize<'de> for KeyboardButton {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Self::text(text)),
            value @ Value::Object(_) => {
                let f: KeyboardButtonFields = super::nested::<_, D::Error>(None, value)?;
                Ok(Self {
                    text: f.text,
                    request_contact: f.request_contact,
                    request_location: f.request_location,
                    request_poll: f.request_poll,
                    web_app: f.web_app,
                })
            }
            _ => Err(de::Error::custom(
                "keyboard button must be a string or an object",
            )),
        }
    }
}

/// Poll type a keyboard button asks the user to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardButtonPollType {
    /// "quiz", "regular", or absent for any.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub poll_type: Option<String>,
}

/// Asks the client to remove the custom keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboardRemove {
    /// Always `true` when produced by this client.
    pub remove_keyboard: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selective: Option<bool>,
}

impl ReplyKeyboardRemove {
    pub fn new() -> Self {
        Self {
            remove_keyboard: true,
            selective: None,
        }
    }
}

impl Default for ReplyKeyboardRemove {
    fn default() -> Self {
        Self::new()
    }
}

/// Asks the client to open a reply interface to the bot's message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceReply {
    /// Always `true` when produced by this client.
    pub force_reply: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_field_placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selective: Option<bool>,
}

impl ForceReply {
    pub fn new() -> Self {
        Self {
            force_reply: true,
            input_field_placeholder: None,
            selective: None,
        }
    }
}

impl Default for ForceReply {
    fn default() -> Self {
        Self::new()
    }
}
