//! MongoDB persistence adapters.
//!
//! Concrete implementations of the domain repository ports backed by the
//! document store, one adapter per collection.
//!
//! - **Thin adapters**: repositories only translate between BSON documents
//!   and domain types. No business logic resides here.
//! - **Internal documents**: the BSON shapes in `documents` never leak to
//!   the domain layer.
//! - **Strongly typed errors**: all driver errors are mapped to the domain
//!   store error variants.

mod documents;
pub(crate) mod mongo_helpers;
mod mongo_order_repository;
mod mongo_product_repository;
mod mongo_review_repository;
mod store;

pub use mongo_order_repository::MongoOrderRepository;
pub use mongo_product_repository::MongoProductRepository;
pub use mongo_review_repository::MongoReviewRepository;
pub use store::{DocumentStore, StoreConfig};
