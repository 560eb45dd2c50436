//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (products, orders,
//!   reviews, health)
//! - **Schemas**: Request/response payloads plus the shared error body
//! - **Security**: The `X-ADMIN-KEY` header scheme guarding admin routes
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::health::{HealthStatus, ServiceInfo};
use crate::inbound::http::orders::{
    CreateOrderRequest, CustomerPayload, OrderItemPayload, OrderLinePayload, OrderResponse,
};
use crate::inbound::http::products::{CreateProductRequest, ProductResponse};
use crate::inbound::http::reviews::{CreateReviewRequest, ReviewResponse};

/// Enrich the generated document with the admin header security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "admin_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-ADMIN-KEY",
                "Shared secret required for product management and status updates.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "E-Commerce Backend API",
        description = "HTTP interface for the product catalogue, orders, and reviews."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::update_order_status,
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::reviews::list_reviews,
        crate::inbound::http::reviews::list_product_reviews,
        crate::inbound::http::health::service_info,
        crate::inbound::http::health::health,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CreateProductRequest,
        ProductResponse,
        CreateOrderRequest,
        CustomerPayload,
        OrderItemPayload,
        OrderLinePayload,
        OrderResponse,
        CreateReviewRequest,
        ReviewResponse,
        ServiceInfo,
        HealthStatus,
    )),
    tags(
        (name = "products", description = "Catalogue management and browsing"),
        (name = "orders", description = "Order placement and fulfilment status"),
        (name = "reviews", description = "Product reviews"),
        (name = "health", description = "Liveness and service info")
    )
)]
pub struct ApiDoc;
