//! # tgpoll-core
//!
//! Update and entity model, reply-markup codec, configuration, and error
//! types shared by the tgpoll crates.

pub mod codec;
pub mod config;
pub mod entities;
pub mod error;
pub mod markup;
