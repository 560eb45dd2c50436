//! Product catalogue HTTP handlers.
//!
//! ```text
//! POST   /products          (admin)
//! GET    /products
//! GET    /products/{product_id}
//! DELETE /products/{product_id}  (admin)
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, Gender, Product, ProductDraft, ProductId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::admin::AdminAccess;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::invalid_payload_error;

/// Request payload for creating a product.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    /// Defaults to `true` when omitted.
    #[serde(default = "default_available")]
    pub available: bool,
    pub gender: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_available() -> bool {
    true
}

/// Response payload for a catalogue product.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub available: bool,
    pub gender: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            price: value.price,
            available: value.available,
            gender: value.gender.to_string(),
            description: value.description,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

fn invalid_gender_error(value: &str) -> Error {
    Error::invalid_argument("Gender must be one of: men, women").with_details(json!({
        "field": "gender",
        "value": value,
        "code": "invalid_gender",
    }))
}

fn parse_create_request(payload: CreateProductRequest) -> Result<ProductDraft, Error> {
    let gender =
        Gender::from_str(&payload.gender).map_err(|_| invalid_gender_error(&payload.gender))?;
    ProductDraft::new(
        payload.name,
        payload.price,
        payload.available,
        gender,
        payload.description,
    )
    .map_err(invalid_payload_error)
}

fn parse_product_id(raw: &str) -> Result<ProductId, Error> {
    Ok(ProductId::new(raw)?)
}

/// Create a catalogue product.
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Created product", body = ProductResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unreachable", body = Error)
    ),
    security(("admin_key" = [])),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
    payload: web::Json<CreateProductRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_create_request(payload.into_inner())?;
    let product = state.catalog.create(draft).await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// List the catalogue.
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unreachable", body = Error)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ProductResponse>>> {
    let products = state.catalog.list().await?;
    Ok(web::Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// Fetch one product by id.
#[utoipa::path(
    get,
    path = "/products/{product_id}",
    params(("product_id" = String, Path, description = "24-character hex product id")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 400, description = "Malformed product id", body = Error),
        (status = 404, description = "No such product", body = Error),
        (status = 503, description = "Store unreachable", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{product_id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProductResponse>> {
    let id = parse_product_id(&path.into_inner())?;
    let product = state.catalog.get(&id).await?;
    Ok(web::Json(ProductResponse::from(product)))
}

/// Delete one product by id.
#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    params(("product_id" = String, Path, description = "24-character hex product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Malformed product id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such product", body = Error),
        (status = 503, description = "Store unreachable", body = Error)
    ),
    security(("admin_key" = [])),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{product_id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_product_id(&path.into_inner())?;
    state.catalog.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockProductCatalog;
    use crate::inbound::http::admin::ADMIN_KEY_HEADER;
    use crate::inbound::http::test_utils::{TEST_ADMIN_KEY, state_with_catalog};

    const DRESS_ID: &str = "64b0c8f1a2d3e4f5a6b7c8d1";

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(DRESS_ID).expect("fixture id"),
            name: "Summer Dress".to_owned(),
            price: 250.0,
            available: true,
            gender: Gender::Women,
            description: Some("Light cotton".to_owned()),
            created_at: Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 7, 2, 9, 0, 0).unwrap(),
        }
    }

    fn create_payload() -> serde_json::Value {
        json!({
            "name": "Summer Dress",
            "price": 250.0,
            "available": true,
            "gender": "women",
            "description": "Light cotton",
        })
    }

    fn test_app(
        catalog: MockProductCatalog,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state_with_catalog(catalog))
            .service(create_product)
            .service(list_products)
            .service(get_product)
            .service(delete_product)
    }

    #[std::prelude::v1::test]
    fn omitted_availability_defaults_to_true() {
        let payload: CreateProductRequest = serde_json::from_value(json!({
            "name": "Plain Tee",
            "price": 99.0,
            "gender": "men",
        }))
        .expect("payload parses");
        assert!(payload.available);
        assert_eq!(payload.description, None);
    }

    #[std::prelude::v1::test]
    fn unknown_genders_are_rejected_with_details() {
        let payload = CreateProductRequest {
            name: "Plain Tee".to_owned(),
            price: 99.0,
            available: true,
            gender: "kids".to_owned(),
            description: None,
        };

        let error = parse_create_request(payload).expect_err("must reject");

        assert_eq!(error.code(), ErrorCode::InvalidArgument);
        assert_eq!(error.message(), "Gender must be one of: men, women");
        let details = error.details().expect("details present");
        assert_eq!(details["code"], "invalid_gender");
        assert_eq!(details["value"], "kids");
    }

    #[std::prelude::v1::test]
    fn draft_validation_failures_carry_the_field() {
        let payload = CreateProductRequest {
            name: "  ".to_owned(),
            price: 99.0,
            available: true,
            gender: "men".to_owned(),
            description: None,
        };

        let error = parse_create_request(payload).expect_err("must reject");

        assert_eq!(error.code(), ErrorCode::InvalidArgument);
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "name");
        assert_eq!(details["code"], "empty_field");
    }

    #[actix_web::test]
    async fn creating_a_product_returns_201_with_the_persisted_entity() {
        let mut catalog = MockProductCatalog::new();
        catalog
            .expect_create()
            .withf(|draft: &ProductDraft| {
                draft.name() == "Summer Dress"
                    && (draft.price() - 250.0).abs() < f64::EPSILON
                    && draft.available()
                    && draft.gender() == Gender::Women
            })
            .returning(|_| Ok(sample_product()));

        let app = test::init_service(test_app(catalog)).await;
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/products")
                .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
                .set_json(create_payload())
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["id"], DRESS_ID);
        assert_eq!(body["name"], "Summer Dress");
        assert_eq!(body["gender"], "women");
        assert_eq!(body["available"], true);
    }

    #[actix_web::test]
    async fn creating_a_product_requires_the_admin_key() {
        let app = test::init_service(test_app(MockProductCatalog::new())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/products")
                .set_json(create_payload())
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["message"], "Invalid or missing admin API key");
    }

    #[actix_web::test]
    async fn listing_returns_every_product() {
        let mut catalog = MockProductCatalog::new();
        catalog
            .expect_list()
            .returning(|| Ok(vec![sample_product()]));

        let app = test::init_service(test_app(catalog)).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/products").to_request()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["id"], DRESS_ID);
        assert_eq!(body[0]["created_at"], "2024-07-01T09:00:00+00:00");
    }

    #[actix_web::test]
    async fn fetching_with_a_malformed_id_is_a_400() {
        let app = test::init_service(test_app(MockProductCatalog::new())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/products/junk").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_reference");
        assert_eq!(body["message"], "Invalid product ID format: junk");
    }

    #[actix_web::test]
    async fn fetching_an_unknown_id_is_a_404() {
        let mut catalog = MockProductCatalog::new();
        catalog
            .expect_get()
            .with(eq(ProductId::new(DRESS_ID).expect("fixture id")))
            .returning(|id| Err(Error::not_found(format!("Product not found: {id}"))));

        let app = test::init_service(test_app(catalog)).await;
        let response = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/products/{DRESS_ID}"))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn deleting_a_product_returns_204_with_no_body() {
        let mut catalog = MockProductCatalog::new();
        catalog
            .expect_delete()
            .with(eq(ProductId::new(DRESS_ID).expect("fixture id")))
            .returning(|_| Ok(()));

        let app = test::init_service(test_app(catalog)).await;
        let response = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/products/{DRESS_ID}"))
                .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let body = test::read_body(response).await;
        assert!(body.is_empty());
    }
}
