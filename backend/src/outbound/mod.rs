//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits for the two infrastructure concerns
//! this backend has:
//!
//! - **persistence**: MongoDB-backed repositories for products, orders, and
//!   reviews
//! - **telegram**: Bot API client, admin notifier, and the console's chat
//!   transport
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
pub mod telegram;
