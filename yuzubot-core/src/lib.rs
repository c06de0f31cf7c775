//! # yuzubot-core
//!
//! Core types and traits for the Chatwork bot: [`MessageEvent`] and friends,
//! the [`Handler`]/[`Middleware`] traits, the [`HandlerChain`] dispatcher,
//! the error taxonomy, and tracing initialization. Transport-agnostic; used
//! by the yuzubot binary and its helper crates.

pub mod chain;
pub mod error;
pub mod logger;
pub mod types;

pub use chain::HandlerChain;
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{Handler, HandlerResponse, MessageEvent, Middleware, Room, Sender};
