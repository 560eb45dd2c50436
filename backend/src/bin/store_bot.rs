//! Admin console worker: long-polls Telegram and drives the product catalog.
//!
//! Runs alongside the HTTP server against the same document store. Poll
//! failures are logged and retried; per-update reply failures never stop the
//! loop.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::domain::ports::ProductCatalog;
use backend::domain::CatalogService;
use backend::inbound::console::{
    AdminRoster, CallbackPress, ConsoleDispatcher, ConsoleTransport, IncomingMessage,
    TransportError,
};
use backend::outbound::persistence::{DocumentStore, MongoProductRepository, StoreConfig};
use backend::outbound::telegram::{TelegramClient, Update};
use backend::server::AppConfig;

/// Pause between polls after a failed `getUpdates` round.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let Some(token) = config.telegram_token.as_deref() else {
        return Err(std::io::Error::other(
            "TELEGRAM_BOT_TOKEN is required for the store bot",
        ));
    };

    let store = DocumentStore::connect(StoreConfig::new(
        config.mongodb_uri.as_str(),
        config.db_name.as_str(),
    ))
    .await
    .map_err(|e| std::io::Error::other(format!("document store unavailable: {e}")))?;

    let products = Arc::new(MongoProductRepository::new(&store));
    let catalog = Arc::new(CatalogService::new(products));
    let client = Arc::new(TelegramClient::new(token).map_err(std::io::Error::other)?);
    let console = ConsoleDispatcher::new(
        catalog,
        client.clone(),
        AdminRoster::new(config.admin_usernames.clone()),
    );

    info!(
        admins = config.admin_usernames.len(),
        "store bot polling for updates"
    );
    let mut offset = 0_i64;
    loop {
        let updates = match client.get_updates(offset).await {
            Ok(updates) => updates,
            Err(error) => {
                warn!(error = %error, "update poll failed; retrying");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };
        for update in updates {
            offset = offset.max(update.update_id + 1);
            if let Err(error) = dispatch(&console, update).await {
                warn!(error = %error, "console reply failed");
            }
        }
    }
}

/// Hand one update to the console, skipping entries it cannot act on.
///
/// Media-only messages, channel posts without a sender, and callback queries
/// missing their card or payload are dropped.
async fn dispatch<C, T>(
    console: &ConsoleDispatcher<C, T>,
    update: Update,
) -> Result<(), TransportError>
where
    C: ProductCatalog,
    T: ConsoleTransport,
{
    if let Some(message) = update.message {
        let (Some(from), Some(text)) = (message.from, message.text) else {
            debug!(update_id = update.update_id, "skipping non-text message");
            return Ok(());
        };
        return console
            .handle_message(IncomingMessage {
                chat_id: message.chat.id,
                sender_id: from.id,
                username: from.username,
                text,
            })
            .await;
    }

    if let Some(callback) = update.callback_query {
        let (Some(card), Some(data)) = (callback.message, callback.data) else {
            debug!(update_id = update.update_id, "skipping incomplete callback");
            return Ok(());
        };
        return console
            .handle_callback(CallbackPress {
                callback_id: callback.id,
                chat_id: card.chat.id,
                message_id: card.message_id,
                sender_id: callback.from.id,
                username: callback.from.username,
                data,
            })
            .await;
    }

    Ok(())
}
