//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain reaches the document store and the
//! notification transport; driving ports describe what inbound adapters may
//! ask of the domain. Driven ports expose strongly typed errors so adapters
//! map their failures into predictable variants; driving ports speak the
//! domain [`Error`] taxonomy directly.

use async_trait::async_trait;
use thiserror::Error as ThisError;

use super::Error;
use super::order::{Order, OrderDraft, OrderId, OrderRecord, OrderStatus};
use super::product::{Product, ProductDraft, ProductId};
use super::review::{Review, ReviewDraft, ReviewRecord};

/// Failures surfaced by document store adapters.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum StoreError {
    /// The store could not be reached or the connection was lost.
    #[error("document store connection failed: {message}")]
    Connection { message: String },
    /// A query or mutation failed during execution.
    #[error("document store query failed: {message}")]
    Query { message: String },
    /// A stored document could not be decoded into its domain shape.
    #[error("stored document could not be decoded: {message}")]
    Decode { message: String },
}

impl StoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for decode failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            // Adapters log the connection detail; clients get a stable message.
            StoreError::Connection { .. } => {
                Error::unreachable("Database connection not established")
            }
            other => Error::internal(other.to_string()),
        }
    }
}

/// Persistence port for the product collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product and return it with its store-assigned key and
    /// creation timestamps.
    async fn insert(&self, draft: &ProductDraft) -> Result<Product, StoreError>;

    /// Fetch every product, capped at the adapter's listing limit.
    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Fetch one product by key.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// Delete a product. Returns `false` when no document matched.
    async fn delete(&self, id: &ProductId) -> Result<bool, StoreError>;

    /// Overwrite the availability flag. Returns `false` when no document
    /// matched. Field updates do not refresh the updated timestamp.
    async fn set_availability(&self, id: &ProductId, available: bool) -> Result<bool, StoreError>;

    /// Overwrite the price. Returns `false` when no document matched.
    async fn set_price(&self, id: &ProductId, price: f64) -> Result<bool, StoreError>;

    /// Overwrite the description. Returns `false` when no document matched.
    async fn set_description(&self, id: &ProductId, description: &str)
    -> Result<bool, StoreError>;
}

/// Persistence port for the order collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a resolved order and return it with its store-assigned key
    /// and creation timestamps.
    async fn insert(&self, record: &OrderRecord) -> Result<Order, StoreError>;

    /// Fetch one order by key.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, StoreError>;

    /// Overwrite the status and refresh the updated timestamp. Returns
    /// `false` when no document matched.
    async fn set_status(&self, id: &OrderId, status: OrderStatus) -> Result<bool, StoreError>;
}

/// Persistence port for the review collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a resolved review and return it with its store-assigned key
    /// and creation timestamp.
    async fn insert(&self, record: &ReviewRecord) -> Result<Review, StoreError>;

    /// Fetch the most recent reviews across all products, newest first.
    async fn find_recent(&self, limit: i64) -> Result<Vec<Review>, StoreError>;

    /// Fetch the most recent reviews for one product, newest first.
    async fn find_by_product(
        &self,
        id: &ProductId,
        limit: i64,
    ) -> Result<Vec<Review>, StoreError>;
}

/// Failures surfaced by notification adapters.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum NotifierError {
    /// The notification transport could not be reached.
    #[error("notification transport failed: {message}")]
    Transport { message: String },
    /// The transport answered but refused the message.
    #[error("notification was rejected: {message}")]
    Rejected { message: String },
}

impl NotifierError {
    /// Helper for transport-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for rejected messages.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Outbound port for telling the shop's admins that something happened.
///
/// Delivery is best effort everywhere this port is used: callers log
/// failures and carry on.
///
/// # Examples
/// ```
/// use async_trait::async_trait;
/// use backend::domain::ports::{AdminNotifier, NotifierError};
/// use backend::domain::Order;
///
/// struct Silent;
///
/// #[async_trait]
/// impl AdminNotifier for Silent {
///     async fn order_received(&self, _order: &Order) -> Result<(), NotifierError> {
///         Ok(())
///     }
///
///     async fn send_text(&self, _text: &str) -> Result<(), NotifierError> {
///         Ok(())
///     }
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminNotifier: Send + Sync {
    /// Announce a freshly placed order.
    async fn order_received(&self, order: &Order) -> Result<(), NotifierError>;

    /// Send a free-form text to every configured admin.
    async fn send_text(&self, text: &str) -> Result<(), NotifierError>;
}

/// [`AdminNotifier`] used when no notification transport is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAdminNotifier;

#[async_trait]
impl AdminNotifier for NoOpAdminNotifier {
    async fn order_received(&self, order: &Order) -> Result<(), NotifierError> {
        tracing::debug!(order_id = %order.id, "notifications disabled; dropping order announcement");
        Ok(())
    }

    async fn send_text(&self, _text: &str) -> Result<(), NotifierError> {
        tracing::debug!("notifications disabled; dropping text message");
        Ok(())
    }
}

/// Driving port for catalogue management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Create a product and return the persisted entity.
    async fn create(&self, draft: ProductDraft) -> Result<Product, Error>;

    /// List the catalogue.
    async fn list(&self) -> Result<Vec<Product>, Error>;

    /// Fetch one product, failing with `NotFound` when absent.
    async fn get(&self, id: &ProductId) -> Result<Product, Error>;

    /// Delete one product, failing with `NotFound` when absent.
    async fn delete(&self, id: &ProductId) -> Result<(), Error>;

    /// Flip the availability flag of an existing product.
    async fn set_availability(&self, id: &ProductId, available: bool) -> Result<(), Error>;

    /// Replace the price of an existing product.
    async fn set_price(&self, id: &ProductId, price: f64) -> Result<(), Error>;

    /// Replace the description of an existing product.
    async fn set_description(&self, id: &ProductId, description: String) -> Result<(), Error>;
}

/// Driving port for the order lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderWorkflow: Send + Sync {
    /// Run the order creation workflow: resolve references, snapshot
    /// prices, compute the total, persist, then announce best effort.
    async fn place(&self, draft: OrderDraft) -> Result<Order, Error>;

    /// Fetch one order, failing with `NotFound` when absent.
    async fn get(&self, id: &OrderId) -> Result<Order, Error>;

    /// Set the status of an existing order and return the updated order.
    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order, Error>;
}

/// Driving port for accepting reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewsCommand: Send + Sync {
    /// Accept a review after resolving its product reference.
    async fn submit(&self, draft: ReviewDraft) -> Result<Review, Error>;
}

/// Driving port for reading reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewsQuery: Send + Sync {
    /// The most recent reviews across all products, newest first. `None`
    /// falls back to the default page size.
    async fn latest(&self, limit: Option<i64>) -> Result<Vec<Review>, Error>;

    /// Every review for one product, newest first, capped.
    async fn for_product(&self, id: &ProductId) -> Result<Vec<Review>, Error>;
}
