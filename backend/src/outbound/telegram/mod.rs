//! Telegram Bot API adapters.
//!
//! [`TelegramClient`] speaks the wire protocol; [`TelegramNotifier`] fans
//! order announcements out to admin chats. The console dispatcher drives the
//! same client through its chat-transport port.

mod client;
mod dto;
mod notifier;

pub use client::{TelegramClient, TelegramError};
pub use dto::{
    CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update, User,
};
pub use notifier::TelegramNotifier;
