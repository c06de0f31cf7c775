//! # chatwork-client
//!
//! Chatwork REST API v2 client plus the message-markup helpers the bot needs:
//! reply formatting, reply-reference parsing, `[To:…]` stripping, and the
//! emoticon catalog used for spam scoring.

pub mod client;
pub mod emoticons;
pub mod error;
pub mod markup;
pub mod types;

pub use client::{ChatworkClient, API_BASE};
pub use emoticons::{count_emojis, EMOTICONS};
pub use error::{ClientError, Result};
pub use markup::{
    contains_toall, parse_reply_refs, reply_to, starts_with_bot_markup, strip_to_tags, ReplyRef,
};
pub use types::{is_admin, Role, RoleAssignment, RoomMember, RoomSummary};
