//! Backend entry-point: wires the REST API over the document store.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::domain::ports::{NoOpAdminNotifier, OrderWorkflow};
use backend::domain::{CatalogService, OrderService, ReviewService};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DocumentStore, MongoOrderRepository, MongoProductRepository, MongoReviewRepository, StoreConfig,
};
use backend::outbound::telegram::{TelegramClient, TelegramNotifier};
use backend::server::{create_server, AppConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let store = DocumentStore::connect(StoreConfig::new(
        config.mongodb_uri.as_str(),
        config.db_name.as_str(),
    ))
    .await
    .map_err(|e| std::io::Error::other(format!("document store unavailable: {e}")))?;

    let products = Arc::new(MongoProductRepository::new(&store));
    let orders = Arc::new(MongoOrderRepository::new(&store));
    let reviews = Arc::new(MongoReviewRepository::new(&store));

    let workflow: Arc<dyn OrderWorkflow> = match config.telegram_token.as_deref() {
        Some(token) => {
            let client = TelegramClient::new(token).map_err(std::io::Error::other)?;
            let notifier = Arc::new(TelegramNotifier::new(client, config.admin_chat_ids.clone()));
            Arc::new(OrderService::new(products.clone(), orders, notifier))
        }
        None => {
            info!("TELEGRAM_BOT_TOKEN not set; order notifications disabled");
            Arc::new(OrderService::new(
                products.clone(),
                orders,
                Arc::new(NoOpAdminNotifier),
            ))
        }
    };

    let catalog = Arc::new(CatalogService::new(products.clone()));
    let review_service = Arc::new(ReviewService::new(reviews, products));

    let state = web::Data::new(HttpState {
        catalog,
        orders: workflow,
        reviews: review_service.clone(),
        reviews_query: review_service,
        admin_key: config.admin_api_key.clone(),
    });

    info!(bind_addr = %config.bind_addr, database = %config.db_name, "starting HTTP server");
    create_server(&config.bind_addr, state)?.await
}
