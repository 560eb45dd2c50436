//! Chat-based admin console.
//!
//! Inbound counterpart of the HTTP API for store administration: slash
//! commands and inline card actions drive the product catalog service. The
//! dispatcher is transport-agnostic; the Telegram client plugs in through
//! [`ConsoleTransport`].

mod actions;
mod dispatcher;
mod render;
mod session;
mod transport;

pub use actions::AdminAction;
pub use dispatcher::{CallbackPress, ConsoleDispatcher, IncomingMessage};
pub use session::{AdminRoster, EditField, PendingEdit, SessionState};
pub use transport::{Button, ConsoleTransport, Keyboard, TransportError};
