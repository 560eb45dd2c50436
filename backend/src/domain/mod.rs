//! Core domain model for the storefront.
//!
//! Entities and validated value types live beside the ports (traits) that
//! define the hexagon's edges and the services that implement the driving
//! ports. Nothing in this module knows about HTTP, Telegram, or MongoDB;
//! adapters translate at the boundary.

mod catalog_service;
pub mod error;
mod order;
mod order_service;
pub mod ports;
mod product;
mod review;
mod review_service;
mod validation;

pub use self::catalog_service::CatalogService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::order::{
    Customer, Order, OrderDraft, OrderId, OrderIdError, OrderItemDraft, OrderLine, OrderRecord,
    OrderStatus, ParseOrderStatusError,
};
pub use self::order_service::OrderService;
pub use self::product::{
    Gender, ParseGenderError, Product, ProductDraft, ProductId, ProductIdError,
};
pub use self::review::{Review, ReviewDraft, ReviewRecord};
pub use self::review_service::ReviewService;
pub use self::validation::ValidationError;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Invalid API key"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
