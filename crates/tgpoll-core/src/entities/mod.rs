//! Typed Bot API entities.
//!
//! Every wire-optional field is an `Option` and is skipped on encode when
//! absent. Unknown fields are ignored on decode. Entities are plain values:
//! nothing mutates them after decode.

mod chat;
mod message;
mod queries;
mod update;
mod user;


pub use chat::{Chat, ChatMember, ChatMemberUpdated, ChatType};
pub use message::{Message, MessageEntity};
pub use queries::{CallbackQuery, ChosenInlineResult, InlineQuery};
pub use update::{Update, UpdateKind};
pub use user::User;
