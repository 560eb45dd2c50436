//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! REST handlers live under [`http`]; the Telegram admin console's
//! transport-agnostic half lives under [`console`].

pub mod console;
pub mod http;
