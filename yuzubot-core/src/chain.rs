//! # Handler chain
//!
//! Ordered dispatch for inbound messages: middleware run first and may abort
//! the whole chain; handlers then run in registration order and the first
//! `Stop` or `Reply` short-circuits. A chain that falls all the way through
//! returns `Continue`, which the runner treats as "ordinary message".

use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::types::{Handler, HandlerResponse, MessageEvent, Middleware};

/// Ordered middleware + handlers. Registration order is priority order.
#[derive(Clone, Default)]
pub struct HandlerChain {
    middleware: Vec<Arc<dyn Middleware>>,
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            middleware: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Appends a middleware. Middleware run before any handler.
    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Appends a handler. Handlers run in the order they were added.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Runs the event through the chain. Returns the first `Stop`/`Reply`,
    /// `Stop` if a middleware aborted, or `Continue` if nothing matched.
    #[instrument(skip(self, event), fields(room_id = event.room.room_id, account_id = event.sender.account_id))]
    pub async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        for mw in &self.middleware {
            let mw_name = std::any::type_name_of_val(mw.as_ref());
            if !mw.before(event).await? {
                info!(middleware = %mw_name, "chain aborted by middleware");
                return Ok(HandlerResponse::Stop);
            }
        }

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(event).await?;
            debug!(handler = %handler_name, response = ?response, "handler ran");

            match response {
                HandlerResponse::Continue => continue,
                consumed => {
                    info!(handler = %handler_name, "event consumed");
                    return Ok(consumed);
                }
            }
        }

        Ok(HandlerResponse::Continue)
    }
}
