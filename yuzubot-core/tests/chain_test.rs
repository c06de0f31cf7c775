//! Integration tests for [`yuzubot_core::HandlerChain`].
//!
//! Covers: middleware aborting the chain, handler priority order with
//! short-circuit on the first Reply, and the Continue fall-through result
//! for an ordinary message.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use yuzubot_core::{
    Handler, HandlerChain, HandlerResponse, MessageEvent, Middleware, Room, Sender,
};

fn test_event(body: &str) -> MessageEvent {
    MessageEvent {
        message_id: "1830000000000000".to_string(),
        sender: Sender { account_id: 123 },
        room: Room { room_id: 456 },
        body: body.to_string(),
        received_at: Utc::now(),
    }
}

struct CountingHandler {
    calls: Arc<AtomicUsize>,
    response: HandlerResponse,
}

#[async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _event: &MessageEvent) -> yuzubot_core::Result<HandlerResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

struct BlockingMiddleware;

#[async_trait]
impl Middleware for BlockingMiddleware {
    async fn before(&self, _event: &MessageEvent) -> yuzubot_core::Result<bool> {
        Ok(false)
    }
}

#[tokio::test]
async fn middleware_abort_stops_chain_before_handlers() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_middleware(Arc::new(BlockingMiddleware))
        .add_handler(Arc::new(CountingHandler {
            calls: calls.clone(),
            response: HandlerResponse::Reply("never".to_string()),
        }));

    let result = chain.handle(&test_event("/test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn first_reply_short_circuits_later_handlers() {
    let first_calls = Arc::new(AtomicUsize::new(0));
    let second_calls = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(CountingHandler {
            calls: first_calls.clone(),
            response: HandlerResponse::Reply("first wins".to_string()),
        }))
        .add_handler(Arc::new(CountingHandler {
            calls: second_calls.clone(),
            response: HandlerResponse::Reply("unreachable".to_string()),
        }));

    let result = chain.handle(&test_event("/test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("first wins".to_string()));
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn handlers_run_in_registration_order() {
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));

    struct OrderHandler {
        name: &'static str,
        order: Arc<std::sync::Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Handler for OrderHandler {
        async fn handle(&self, _event: &MessageEvent) -> yuzubot_core::Result<HandlerResponse> {
            self.order.lock().unwrap().push(self.name);
            Ok(HandlerResponse::Continue)
        }
    }

    let chain = HandlerChain::new()
        .add_handler(Arc::new(OrderHandler {
            name: "first",
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second",
            order: order.clone(),
        }));

    chain.handle(&test_event("hello")).await.unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
}

#[tokio::test]
async fn fallen_through_chain_reports_continue() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new().add_handler(Arc::new(CountingHandler {
        calls: calls.clone(),
        response: HandlerResponse::Continue,
    }));

    let result = chain.handle(&test_event("ordinary message")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn stop_consumes_without_reply() {
    let chain = HandlerChain::new().add_handler(Arc::new(CountingHandler {
        calls: Arc::new(AtomicUsize::new(0)),
        response: HandlerResponse::Stop,
    }));

    let result = chain.handle(&test_event("[info]notice[/info]")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
}
