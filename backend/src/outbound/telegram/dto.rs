//! Wire types for the slice of the Telegram Bot API this backend uses.
//!
//! Incoming types decode `getUpdates` payloads; outgoing types serialize
//! inline keyboards. Unknown fields are ignored so Bot API additions do not
//! break polling.

use serde::{Deserialize, Serialize};

use crate::inbound::console::Keyboard;

/// One long-poll result entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonically increasing update cursor.
    pub update_id: i64,
    /// Present when the update carries a chat message.
    #[serde(default)]
    pub message: Option<Message>,
    /// Present when the update carries an inline-button press.
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// A chat message, incoming or previously sent by the bot.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message identifier, unique within its chat.
    pub message_id: i64,
    /// Sender; absent for channel posts.
    #[serde(default)]
    pub from: Option<User>,
    /// Chat the message belongs to.
    pub chat: Chat,
    /// Text content; absent for media-only messages.
    #[serde(default)]
    pub text: Option<String>,
}

/// The chat a message belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Chat identifier, also the destination for replies.
    pub id: i64,
}

/// A Telegram account.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Numeric account identifier.
    pub id: i64,
    /// Public handle; not every account has one.
    #[serde(default)]
    pub username: Option<String>,
}

/// An inline-button press on a message the bot sent.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    /// Identifier used to acknowledge the press.
    pub id: String,
    /// Account that pressed the button.
    pub from: User,
    /// Message the pressed button was attached to.
    #[serde(default)]
    pub message: Option<Message>,
    /// Payload of the pressed button.
    #[serde(default)]
    pub data: Option<String>,
}

/// Inline keyboard attached to an outgoing message.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    /// Button rows, top to bottom.
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// One button of an inline keyboard.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    /// Label shown to the user.
    pub text: String,
    /// Payload echoed back in the callback query.
    pub callback_data: String,
}

impl InlineKeyboardMarkup {
    /// Build the wire keyboard from the console's transport-neutral rows.
    pub(super) fn from_rows(rows: Keyboard) -> Self {
        let inline_keyboard = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|button| InlineKeyboardButton {
                        text: button.label,
                        callback_data: button.data,
                    })
                    .collect()
            })
            .collect();
        Self { inline_keyboard }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::console::Button;

    #[test]
    fn update_decodes_message_entries() {
        let payload = serde_json::json!({
            "update_id": 712,
            "message": {
                "message_id": 44,
                "from": {"id": 9, "username": "storekeeper"},
                "chat": {"id": -100},
                "text": "/products"
            }
        });

        let update: Update = serde_json::from_value(payload).expect("decode update");
        assert_eq!(update.update_id, 712);
        let message = update.message.expect("message present");
        assert_eq!(message.chat.id, -100);
        assert_eq!(message.text.as_deref(), Some("/products"));
        assert!(update.callback_query.is_none());
    }

    #[test]
    fn update_decodes_callback_entries_without_optional_fields() {
        let payload = serde_json::json!({
            "update_id": 713,
            "callback_query": {
                "id": "cb-1",
                "from": {"id": 9}
            }
        });

        let update: Update = serde_json::from_value(payload).expect("decode update");
        let callback = update.callback_query.expect("callback present");
        assert_eq!(callback.id, "cb-1");
        assert!(callback.from.username.is_none());
        assert!(callback.message.is_none());
        assert!(callback.data.is_none());
    }

    #[test]
    fn keyboard_rows_map_to_wire_markup() {
        let rows = vec![
            vec![Button::new("🟥 Sold Out", "soldout:1"), Button::new("🟩 Available", "available:1")],
            vec![Button::new("🗑 Delete", "delete:1")],
        ];

        let markup = InlineKeyboardMarkup::from_rows(rows);
        let serialized = serde_json::to_value(&markup).expect("serialize markup");
        assert_eq!(
            serialized,
            serde_json::json!({
                "inline_keyboard": [
                    [
                        {"text": "🟥 Sold Out", "callback_data": "soldout:1"},
                        {"text": "🟩 Available", "callback_data": "available:1"}
                    ],
                    [
                        {"text": "🗑 Delete", "callback_data": "delete:1"}
                    ]
                ]
            })
        );
    }
}
