use super::{first_present, nested};
use serde::de;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// An inline keyboard attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    /// Rows of buttons, top to bottom.
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn from_rows(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }

    /// Every button, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &InlineKeyboardButton> {
        self.inline_keyboard.iter().flatten()
    }
}

impl From<InlineKeyboardButton> for InlineKeyboardMarkup {
    fn from(button: InlineKeyboardButton) -> Self {
        Self {
            inline_keyboard: vec![vec![button]],
        }
    }
}

/// One button of an inline keyboard: a label plus exactly one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub action: InlineButtonAction,
}

/// What pressing an inline button does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineButtonAction {
    /// Sends a callback query carrying this data (1-64 bytes).
    CallbackData(String),
    Url(String),
    WebApp(WebAppInfo),
    LoginUrl(LoginUrl),
    SwitchInlineQuery(String),
    SwitchInlineQueryCurrentChat(String),
    CallbackGame(CallbackGame),
    Pay(bool),
}

impl InlineButtonAction {
    /// Action keys in decode priority order.
    pub const PRIORITY: [&'static str; 8] = [
        "callback_data",
        "url",
        "web_app",
        "login_url",
        "switch_inline_query",
        "switch_inline_query_current_chat",
        "callback_game",
        "pay",
    ];

    /// The wire key that carries this action.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CallbackData(_) => "callback_data",
            Self::Url(_) => "url",
            Self::WebApp(_) => "web_app",
            Self::LoginUrl(_) => "login_url",
            Self::SwitchInlineQuery(_) => "switch_inline_query",
            Self::SwitchInlineQueryCurrentChat(_) => "switch_inline_query_current_chat",
            Self::CallbackGame(_) => "callback_game",
            Self::Pay(_) => "pay",
        }
    }

    fn decode<E: de::Error>(key: &str, value: Value) -> Result<Self, E> {
        let action = match key {
            "callback_data" => Self::CallbackData(nested::<_, E>(Some(key), value)?),
            "url" => Self::Url(nested::<_, E>(Some(key), value)?),
            "web_app" => Self::WebApp(nested::<_, E>(Some(key), value)?),
            "login_url" => Self::LoginUrl(nested::<_, E>(Some(key), value)?),
            "switch_inline_query" => Self::SwitchInlineQuery(nested::<_, E>(Some(key), value)?),
            "switch_inline_query_current_chat" => {
                Self::SwitchInlineQueryCurrentChat(nested::<_, E>(Some(key), value)?)
            }
            "callback_game" => Self::CallbackGame(nested::<_, E>(Some(key), value)?),
            "pay" => Self::Pay(nested::<_, E>(Some(key), value)?),
            other => return Err(E::custom(format!("unknown button action `{other}`"))),
        };
        Ok(action)
    }
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, action: InlineButtonAction) -> Self {
        Self {
            text: text.into(),
            action,
        }
    }

    pub fn callback_data(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(text, InlineButtonAction::CallbackData(data.into()))
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text, InlineButtonAction::Url(url.into()))
    }

    pub fn web_app(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text, InlineButtonAction::WebApp(WebAppInfo { url: url.into() }))
    }

    pub fn switch_inline_query(text: impl Into<String>, query: impl Into<String>) -> Self {
        Self::new(text, InlineButtonAction::SwitchInlineQuery(query.into()))
    }

    pub fn pay(text: impl Into<String>) -> Self {
        Self::new(text, InlineButtonAction::Pay(true))
    }

    /// Callback data, if this is a callback button.
    pub fn data(&self) -> Option<&str> {
        match &self.action {
            InlineButtonAction::CallbackData(d) => Some(d),
            _ => None,
        }
    }
}

impl Serialize for InlineKeyboardButton {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("text", &self.text)?;
        let key = self.action.key();
        match &self.action {
            InlineButtonAction::CallbackData(v)
            | InlineButtonAction::Url(v)
            | InlineButtonAction::SwitchInlineQuery(v)
            | InlineButtonAction::SwitchInlineQueryCurrentChat(v) => {
                map.serialize_entry(key, v)?
            }
            InlineButtonAction::WebApp(v) => map.serialize_entry(key, v)?,
            InlineButtonAction::LoginUrl(v) => map.serialize_entry(key, v)?,
            InlineButtonAction::CallbackGame(v) => map.serialize_entry(key, v)?,
            InlineButtonAction::Pay(v) => map.serialize_entry(key, v)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for InlineKeyboardButton {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        let text = match map.remove("text") {
            Some(value) => nested::<String, D::Error>(Some("text"), value)?,
            None => return Err(de::Error::missing_field("text")),
        };
        let key = first_present(&map, &InlineButtonAction::PRIORITY).ok_or_else(|| {
            <D::Error as de::Error>::custom(format!(
                "inline button `{text}` has no action field"
            ))
        })?;
        let value = map.remove(key).unwrap_or(Value::Null);
        let action = InlineButtonAction::decode::<D::Error>(key, value)?;
        Ok(Self { text, action })
    }
}

/// A Web App launched by a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAppInfo {
    pub url: String,
}

/// Seamless login via Telegram Login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_write_access: Option<bool>,
}

/// Placeholder: the game to launch is named by the message, not the button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackGame {}
