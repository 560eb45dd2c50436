//! Liveness and service-info HTTP handlers.
//!
//! Both endpoints are static: neither probes the document store.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Service banner returned from the root path.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub message: String,
    pub docs: String,
}

/// Liveness payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
}

/// Service banner.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = ServiceInfo)),
    tags = ["health"],
    operation_id = "serviceInfo"
)]
#[get("/")]
pub async fn service_info() -> web::Json<ServiceInfo> {
    web::Json(ServiceInfo {
        message: "E-Commerce Backend API".to_owned(),
        docs: "/docs".to_owned(),
    })
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthStatus)),
    tags = ["health"],
    operation_id = "healthCheck"
)]
#[get("/health")]
pub async fn health() -> web::Json<HealthStatus> {
    web::Json(HealthStatus {
        status: "ok".to_owned(),
    })
}
