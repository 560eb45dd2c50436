//! Server construction and route wiring.

mod config;

pub use config::{AppConfig, ConfigError};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{health, service_info};
use crate::inbound::http::orders::{create_order, get_order, update_order_status};
use crate::inbound::http::products::{
    create_product, delete_product, get_product, list_products,
};
use crate::inbound::http::reviews::{create_review, list_product_reviews, list_reviews};
use crate::inbound::http::state::HttpState;
use crate::middleware::RequestLog;

/// Assemble the application with every route and middleware attached.
///
/// Swagger UI is served at `/docs` in debug builds only.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(state)
        .wrap(RequestLog)
        .service(create_product)
        .service(list_products)
        .service(get_product)
        .service(delete_product)
        .service(create_order)
        .service(get_order)
        .service(update_order_status)
        .service(create_review)
        .service(list_reviews)
        .service(list_product_reviews)
        .service(health)
        .service(service_info);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct the HTTP server on the given bind address.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(bind_addr: &str, state: web::Data<HttpState>) -> std::io::Result<Server> {
    let server = HttpServer::new(move || build_app(state.clone()))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
