//! Review HTTP handlers.
//!
//! ```text
//! POST /reviews
//! GET  /reviews?limit=N
//! GET  /reviews/{product_id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ProductId, Review, ReviewDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::invalid_payload_error;

/// Request payload for submitting a review.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateReviewRequest {
    pub product_id: String,
    pub name: String,
    /// Stars, 1 to 5 inclusive.
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Response payload for a review.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(value: Review) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id.to_string(),
            name: value.name,
            rating: value.rating,
            comment: value.comment,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Query string for the cross-product listing.
#[derive(Debug, Deserialize)]
pub struct ListReviewsQuery {
    pub limit: Option<i64>,
}

fn parse_create_request(payload: CreateReviewRequest) -> Result<ReviewDraft, Error> {
    ReviewDraft::new(
        payload.product_id,
        payload.name,
        payload.rating,
        payload.comment,
    )
    .map_err(invalid_payload_error)
}

/// Submit a review for an existing product.
#[utoipa::path(
    post,
    path = "/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Stored review", body = ReviewResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "The referenced product does not exist", body = Error),
        (status = 503, description = "Store unreachable", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
#[post("/reviews")]
pub async fn create_review(
    state: web::Data<HttpState>,
    payload: web::Json<CreateReviewRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_create_request(payload.into_inner())?;
    let review = state.reviews.submit(draft).await?;
    Ok(HttpResponse::Created().json(ReviewResponse::from(review)))
}

/// List recent reviews across all products, newest first.
#[utoipa::path(
    get,
    path = "/reviews",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, default 50, between 1 and 100")
    ),
    responses(
        (status = 200, description = "Recent reviews", body = [ReviewResponse]),
        (status = 400, description = "Out-of-range limit", body = Error),
        (status = 503, description = "Store unreachable", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "listReviews"
)]
#[get("/reviews")]
pub async fn list_reviews(
    state: web::Data<HttpState>,
    query: web::Query<ListReviewsQuery>,
) -> ApiResult<web::Json<Vec<ReviewResponse>>> {
    let reviews = state.reviews_query.latest(query.into_inner().limit).await?;
    Ok(web::Json(
        reviews.into_iter().map(ReviewResponse::from).collect(),
    ))
}

/// List every review for one product, newest first.
#[utoipa::path(
    get,
    path = "/reviews/{product_id}",
    params(("product_id" = String, Path, description = "24-character hex product id")),
    responses(
        (status = 200, description = "The product's reviews", body = [ReviewResponse]),
        (status = 400, description = "Malformed product id", body = Error),
        (status = 503, description = "Store unreachable", body = Error)
    ),
    tags = ["reviews"],
    operation_id = "listProductReviews"
)]
#[get("/reviews/{product_id}")]
pub async fn list_product_reviews(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ReviewResponse>>> {
    let id = ProductId::new(path.into_inner())?;
    let reviews = state.reviews_query.for_product(&id).await?;
    Ok(web::Json(
        reviews.into_iter().map(ReviewResponse::from).collect(),
    ))
}
