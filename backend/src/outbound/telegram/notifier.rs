//! Telegram-backed admin notifier.
//!
//! Fans order announcements out to every configured admin chat. Delivery is
//! best effort per recipient: individual failures are logged and only a
//! total failure is reported to the caller.

use std::fmt::Write;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::client::{TelegramClient, TelegramError};
use crate::domain::Order;
use crate::domain::ports::{AdminNotifier, NotifierError};

/// Notifier that broadcasts to a fixed list of admin chat ids.
pub struct TelegramNotifier {
    client: TelegramClient,
    chat_ids: Vec<i64>,
}

impl TelegramNotifier {
    /// Build a notifier over an existing client and recipient list.
    ///
    /// An empty recipient list is valid and turns every dispatch into a
    /// logged no-op.
    pub fn new(client: TelegramClient, chat_ids: Vec<i64>) -> Self {
        Self { client, chat_ids }
    }

    async fn broadcast(&self, text: &str) -> Result<(), NotifierError> {
        if self.chat_ids.is_empty() {
            debug!("no admin chats configured; dropping notification");
            return Ok(());
        }

        let mut delivered = 0_usize;
        for chat_id in &self.chat_ids {
            match self.client.send_message(*chat_id, text, None).await {
                Ok(()) => delivered += 1,
                Err(error) => {
                    warn!(chat_id, error = %error, "notification delivery failed");
                }
            }
        }

        if delivered == 0 {
            return Err(NotifierError::transport(format!(
                "all {} admin deliveries failed",
                self.chat_ids.len()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AdminNotifier for TelegramNotifier {
    async fn order_received(&self, order: &Order) -> Result<(), NotifierError> {
        self.broadcast(&format_order_message(order)).await
    }

    async fn send_text(&self, text: &str) -> Result<(), NotifierError> {
        self.broadcast(text).await
    }
}

impl From<TelegramError> for NotifierError {
    fn from(error: TelegramError) -> Self {
        match error {
            TelegramError::Rejected { message } => Self::rejected(message),
            other => Self::transport(other.to_string()),
        }
    }
}

/// Render the Markdown announcement sent to admin chats for a new order.
fn format_order_message(order: &Order) -> String {
    let mut message = format!(
        "🛒 *New Order Received*\n\n*Order ID:* `{id}`\n*Status:* {status}\n\n",
        id = order.id,
        status = order.status,
    );
    let _ = write!(
        message,
        "*Customer Information:*\n👤 Name: {name}\n📧 Email: {email}\n📱 Phone: {phone}\n📍 Address: {address}\n\n*Items:*\n",
        name = order.customer.name,
        email = order.customer.email,
        phone = order.customer.phone,
        address = order.customer.address,
    );
    for (index, line) in order.items.iter().enumerate() {
        let _ = write!(
            message,
            "{position}. Product ID: `{product_id}`\n   Quantity: {quantity}\n   Price: ${price:.2}\n",
            position = index + 1,
            product_id = line.product_id,
            quantity = line.quantity,
            price = line.price,
        );
    }
    let _ = write!(message, "\n*Total Amount:* ${total:.2}", total = order.total);
    message
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{Customer, OrderId, OrderLine, OrderStatus, ProductId};

    fn order() -> Order {
        let created = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("valid timestamp");
        Order {
            id: OrderId::new("64b0c8f1a2d3e4f5a6b7c8d9").expect("valid order id"),
            customer: Customer {
                name: "Dina Fawzy".to_owned(),
                email: "dina@example.com".to_owned(),
                phone: "01234567890".to_owned(),
                address: "12 Nile St, Cairo".to_owned(),
            },
            items: vec![
                OrderLine {
                    product_id: ProductId::new("64b0c8f1a2d3e4f5a6b7c8d1").expect("valid product id"),
                    quantity: 2,
                    price: 100.0,
                },
                OrderLine {
                    product_id: ProductId::new("64b0c8f1a2d3e4f5a6b7c8d2").expect("valid product id"),
                    quantity: 1,
                    price: 50.0,
                },
            ],
            total: 250.0,
            status: OrderStatus::Pending,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn order_message_opens_with_header_and_order_identity() {
        let message = format_order_message(&order());

        assert!(message.starts_with("🛒 *New Order Received*\n\n"));
        assert!(message.contains("*Order ID:* `64b0c8f1a2d3e4f5a6b7c8d9`\n*Status:* pending\n"));
    }

    #[test]
    fn order_message_lists_customer_items_and_total() {
        let message = format_order_message(&order());

        assert!(message.contains(
            "*Customer Information:*\n👤 Name: Dina Fawzy\n📧 Email: dina@example.com\n📱 Phone: 01234567890\n📍 Address: 12 Nile St, Cairo\n"
        ));
        assert!(message.contains(
            "1. Product ID: `64b0c8f1a2d3e4f5a6b7c8d1`\n   Quantity: 2\n   Price: $100.00\n"
        ));
        assert!(message.contains(
            "2. Product ID: `64b0c8f1a2d3e4f5a6b7c8d2`\n   Quantity: 1\n   Price: $50.00\n"
        ));
        assert!(message.ends_with("\n*Total Amount:* $250.00"));
    }

    #[test]
    fn rejections_keep_their_category_when_folded() {
        let error = NotifierError::from(TelegramError::Rejected {
            message: "sendMessage: blocked by user".to_owned(),
        });
        assert!(matches!(error, NotifierError::Rejected { .. }));
    }
}
