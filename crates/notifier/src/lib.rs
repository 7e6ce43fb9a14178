//! Outbound message delivery.
//!
//! The watcher only needs "send this text to that chat"; [`Messenger`] is that
//! seam, and [`telegram::TelegramNotifier`] is the production implementation.

pub mod telegram;

use std::future::Future;

use review_common::error::AppError;

pub use telegram::TelegramNotifier;

/// Something that can deliver a text message to a destination.
pub trait Messenger: Send + Sync {
    /// Deliver `text` to `chat_id`. Only success or failure is reported back.
    fn send(&self, chat_id: &str, text: &str) -> impl Future<Output = Result<(), AppError>> + Send;
}
