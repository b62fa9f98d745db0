//! Reply markup and inline button codec.
//!
//! The wire format carries no type tag: the active variant is whichever
//! known key is present. Decoding first reads the raw object, picks the
//! variant by a fixed priority order, then decodes that variant's struct.
//! When several variant keys are present the first in priority order wins.

mod inline;
mod keyboard;

#[cfg(test)]
mod tests;

pub use inline::{
    CallbackGame, InlineButtonAction, InlineKeyboardButton, InlineKeyboardMarkup, LoginUrl,
    WebAppInfo,
};
pub use keyboard::{
    ForceReply, KeyboardButton, KeyboardButtonPollType, KeyboardReplyMarkup, ReplyKeyboardRemove,
};

use crate::codec;
use crate::error::DecodeError;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Markup attached to a message: a custom keyboard, an inline keyboard,
/// or a directive to remove the keyboard or force a reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard(KeyboardReplyMarkup),
    InlineKeyboard(InlineKeyboardMarkup),
    RemoveKeyboard(ReplyKeyboardRemove),
    ForceReply(ForceReply),
}

impl ReplyMarkup {
    /// Variant keys in decode priority order.
    pub const PRIORITY: [&'static str; 4] =
        ["keyboard", "inline_keyboard", "remove_keyboard", "force_reply"];

    /// The wire key that identifies this variant.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Keyboard(_) => "keyboard",
            Self::InlineKeyboard(_) => "inline_keyboard",
            Self::RemoveKeyboard(_) => "remove_keyboard",
            Self::ForceReply(_) => "force_reply",
        }
    }

    pub fn as_inline_keyboard(&self) -> Option<&InlineKeyboardMarkup> {
        match self {
            Self::InlineKeyboard(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_keyboard(&self) -> Option<&KeyboardReplyMarkup> {
        match self {
            Self::Keyboard(m) => Some(m),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ReplyMarkup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let key = first_present(&map, &Self::PRIORITY).ok_or_else(|| {
            <D::Error as de::Error>::custom(
                "reply markup has none of `keyboard`, `inline_keyboard`, \
                 `remove_keyboard`, `force_reply`",
            )
        })?;
        let value = Value::Object(map);
        let markup = match key {
            "keyboard" => Self::Keyboard(nested::<_, D::Error>(None, value)?),
            "inline_keyboard" => Self::InlineKeyboard(nested::<_, D::Error>(None, value)?),
            "remove_keyboard" => Self::RemoveKeyboard(nested::<_, D::Error>(None, value)?),
            _ => Self::ForceReply(nested::<_, D::Error>(None, value)?),
        };
        Ok(markup)
    }
}

impl From<KeyboardReplyMarkup> for ReplyMarkup {
    fn from(m: KeyboardReplyMarkup) -> Self {
        Self::Keyboard(m)
    }
}

impl From<InlineKeyboardMarkup> for ReplyMarkup {
    fn from(m: InlineKeyboardMarkup) -> Self {
        Self::InlineKeyboard(m)
    }
}

impl From<ReplyKeyboardRemove> for ReplyMarkup {
    fn from(m: ReplyKeyboardRemove) -> Self {
        Self::RemoveKeyboard(m)
    }
}

impl From<ForceReply> for ReplyMarkup {
    fn from(m: ForceReply) -> Self {
        Self::ForceReply(m)
    }
}

/// First key of `order` present in `map`.
pub(crate) fn first_present(map: &Map<String, Value>, order: &[&'static str]) -> Option<&'static str> {
    order.iter().copied().find(|k| map.contains_key(*k))
}

/// Decode a sub-value, folding the inner field path into the error message.
pub(crate) fn nested<T, E>(key: Option<&str>, value: Value) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    codec::decode_value(value).map_err(|e| match e {
        DecodeError::Field { path, message } => {
            let location = match (key, path.as_str()) {
                (Some(k), ".") => k.to_string(),
                (Some(k), p) if p.starts_with('[') => format!("{k}{p}"),
                (Some(k), p) => format!("{k}.{p}"),
                (None, p) => p.to_string(),
            };
            E::custom(format!("`{location}`: {message}"))
        }
        other => E::custom(other),
    })
}
