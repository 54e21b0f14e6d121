//! Notification Dispatcher
//!
//! Order confirmation delivery. Dispatch is best-effort: callers turn a
//! [`NotifyError`] into a response warning instead of failing the request.

mod ses;
mod template;

pub use ses::SesNotifier;
pub use template::{RenderedMessage, render_order_confirmation};

use async_trait::async_trait;
use shared::models::Order;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to build message: {0}")]
    Build(String),
    #[error("Failed to send message: {0}")]
    Send(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_order_confirmation(&self, to: &str, order: &Order) -> Result<(), NotifyError>;
}

/// Writes the rendered confirmation to the log instead of sending it
///
/// Used when no sender address is configured.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    store_name: String,
    currency: String,
}

impl LogNotifier {
    pub fn new(store_name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            store_name: store_name.into(),
            currency: currency.into(),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_order_confirmation(&self, to: &str, order: &Order) -> Result<(), NotifyError> {
        let message = render_order_confirmation(order, &self.store_name, &self.currency);
        tracing::info!(
            to,
            order_number = order.order_number,
            subject = %message.subject,
            "Order confirmation (log only)\n{}",
            message.text
        );
        Ok(())
    }
}
