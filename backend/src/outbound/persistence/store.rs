//! MongoDB client bootstrap for the persistence layer.
//!
//! Connection establishment is verified with a ping so startup fails fast
//! when the store is down, instead of surfacing on the first request.

use mongodb::{Client, Collection, Database, bson::doc};

use crate::domain::ports::StoreError;

use super::mongo_helpers::map_driver_error;

/// Configuration for the document store connection.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    uri: String,
    database: String,
}

impl StoreConfig {
    /// Create a new configuration with the given connection URI and
    /// database name.
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
        }
    }

    /// The target database name.
    pub fn database(&self) -> &str {
        self.database.as_str()
    }
}

/// Handle on the connected store. Cheap to clone; repositories borrow it to
/// obtain their typed collection handles.
#[derive(Clone)]
pub struct DocumentStore {
    database: Database,
}

impl DocumentStore {
    /// Connect to the store and verify the connection with a ping.
    pub async fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|err| map_driver_error(err, "client init"))?;
        let database = client.database(&config.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|err| map_driver_error(err, "ping"))?;
        tracing::info!(database = %config.database, "connected to document store");
        Ok(Self { database })
    }

    /// Obtain a typed handle on a named collection.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }
}
