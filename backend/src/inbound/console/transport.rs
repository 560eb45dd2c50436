//! Chat transport port for the admin console.
//!
//! The dispatcher renders replies into plain text plus optional inline
//! keyboards and hands them to this trait. The Telegram client implements it
//! in production; tests substitute a mock to observe outgoing traffic.

use async_trait::async_trait;
use thiserror::Error;

/// One inline button: a visible label plus the callback payload returned when
/// the button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Text shown on the button.
    pub label: String,
    /// Payload echoed back in the callback press.
    pub data: String,
}

impl Button {
    /// Build a button from a label and callback payload.
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Inline keyboard attached to a message, as rows of buttons.
pub type Keyboard = Vec<Vec<Button>>;

/// Failure raised by the chat transport.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The transport could not reach the chat service.
    #[error("chat transport failed: {message}")]
    Transport {
        /// Human-readable failure detail.
        message: String,
    },
    /// The chat service received the request but refused it.
    #[error("chat service rejected the request: {message}")]
    Rejected {
        /// Human-readable rejection detail.
        message: String,
    },
}

impl TransportError {
    /// Build a [`TransportError::Transport`] from any printable message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`TransportError::Rejected`] from any printable message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Outbound side of the console: sends and edits chat messages.
///
/// Texts are Markdown; `keyboard` rows become inline buttons under the
/// message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConsoleTransport: Send + Sync {
    /// Send a new message to a chat.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), TransportError>;

    /// Replace the text and keyboard of a previously sent message.
    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), TransportError>;

    /// Acknowledge a callback press so the client stops its progress spinner.
    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError>;
}
