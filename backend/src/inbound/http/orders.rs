//! Order HTTP handlers.
//!
//! ```text
//! POST  /orders
//! GET   /orders/{order_id}
//! PATCH /orders/{order_id}/status?new_status=...  (admin)
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Customer, Error, Order, OrderDraft, OrderId, OrderItemDraft, OrderStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::admin::AdminAccess;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::invalid_payload_error;

/// Customer contact details on the wire.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CustomerPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<Customer> for CustomerPayload {
    fn from(value: Customer) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            address: value.address,
        }
    }
}

/// One requested line item in an order submission.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct OrderItemPayload {
    pub product_id: String,
    pub quantity: u32,
}

/// Request payload for placing an order.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer: CustomerPayload,
    pub items: Vec<OrderItemPayload>,
}

/// One persisted order line with its snapshotted unit price.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLinePayload {
    pub product_id: String,
    pub quantity: u32,
    pub price: f64,
}

/// Response payload for an order.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: String,
    pub customer: CustomerPayload,
    pub items: Vec<OrderLinePayload>,
    pub total: f64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        Self {
            id: value.id.to_string(),
            customer: CustomerPayload::from(value.customer),
            items: value
                .items
                .into_iter()
                .map(|line| OrderLinePayload {
                    product_id: line.product_id.to_string(),
                    quantity: line.quantity,
                    price: line.price,
                })
                .collect(),
            total: value.total,
            status: value.status.to_string(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Query string for the status update endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateQuery {
    pub new_status: String,
}

fn parse_create_request(payload: CreateOrderRequest) -> Result<OrderDraft, Error> {
    let customer = Customer {
        name: payload.customer.name,
        email: payload.customer.email,
        phone: payload.customer.phone,
        address: payload.customer.address,
    };
    let items = payload
        .items
        .into_iter()
        .map(|item| OrderItemDraft {
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect();
    OrderDraft::new(customer, items).map_err(invalid_payload_error)
}

fn parse_order_id(raw: &str) -> Result<OrderId, Error> {
    Ok(OrderId::new(raw)?)
}

fn parse_status(raw: &str) -> Result<OrderStatus, Error> {
    Ok(raw.parse::<OrderStatus>()?)
}

/// Place an order.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Placed order with its server-computed total", body = OrderResponse),
        (status = 400, description = "Invalid request or unsellable product", body = Error),
        (status = 404, description = "A referenced product does not exist", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Store unreachable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders")]
pub async fn create_order(
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrderRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_create_request(payload.into_inner())?;
    let order = state.orders.place(draft).await?;
    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// Fetch one order by id.
#[utoipa::path(
    get,
    path = "/orders/{order_id}",
    params(("order_id" = String, Path, description = "24-character hex order id")),
    responses(
        (status = 200, description = "The order", body = OrderResponse),
        (status = 400, description = "Malformed order id", body = Error),
        (status = 404, description = "No such order", body = Error),
        (status = 503, description = "Store unreachable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/orders/{order_id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<OrderResponse>> {
    let id = parse_order_id(&path.into_inner())?;
    let order = state.orders.get(&id).await?;
    Ok(web::Json(OrderResponse::from(order)))
}

/// Set the status of an order.
#[utoipa::path(
    patch,
    path = "/orders/{order_id}/status",
    params(
        ("order_id" = String, Path, description = "24-character hex order id"),
        ("new_status" = String, Query, description = "One of: pending, confirmed, shipped, delivered, cancelled")
    ),
    responses(
        (status = 200, description = "The updated order", body = OrderResponse),
        (status = 400, description = "Malformed order id or unrecognised status", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such order", body = Error),
        (status = 503, description = "Store unreachable", body = Error)
    ),
    security(("admin_key" = [])),
    tags = ["orders"],
    operation_id = "updateOrderStatus"
)]
#[patch("/orders/{order_id}/status")]
pub async fn update_order_status(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
    path: web::Path<String>,
    query: web::Query<StatusUpdateQuery>,
) -> ApiResult<web::Json<OrderResponse>> {
    let id = parse_order_id(&path.into_inner())?;
    let status = parse_status(&query.into_inner().new_status)?;
    let order = state.orders.update_status(&id, status).await?;
    Ok(web::Json(OrderResponse::from(order)))
}
