//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    MockOrderWorkflow, MockProductCatalog, MockReviewsCommand, MockReviewsQuery,
};
use crate::inbound::http::state::HttpState;

/// Admin secret wired into every test state.
pub const TEST_ADMIN_KEY: &str = "test-admin-key";

fn base_state(
    catalog: MockProductCatalog,
    orders: MockOrderWorkflow,
    reviews: MockReviewsCommand,
    reviews_query: MockReviewsQuery,
) -> web::Data<HttpState> {
    web::Data::new(HttpState {
        catalog: Arc::new(catalog),
        orders: Arc::new(orders),
        reviews: Arc::new(reviews),
        reviews_query: Arc::new(reviews_query),
        admin_key: Some(TEST_ADMIN_KEY.to_owned()),
    })
}

/// State whose catalogue port is the supplied mock; other ports expect no calls.
pub fn state_with_catalog(catalog: MockProductCatalog) -> web::Data<HttpState> {
    base_state(
        catalog,
        MockOrderWorkflow::new(),
        MockReviewsCommand::new(),
        MockReviewsQuery::new(),
    )
}

/// State whose order port is the supplied mock; other ports expect no calls.
pub fn state_with_orders(orders: MockOrderWorkflow) -> web::Data<HttpState> {
    base_state(
        MockProductCatalog::new(),
        orders,
        MockReviewsCommand::new(),
        MockReviewsQuery::new(),
    )
}

/// State whose review submission port is the supplied mock.
pub fn state_with_reviews(reviews: MockReviewsCommand) -> web::Data<HttpState> {
    base_state(
        MockProductCatalog::new(),
        MockOrderWorkflow::new(),
        reviews,
        MockReviewsQuery::new(),
    )
}

/// State whose review listing port is the supplied mock.
pub fn state_with_reviews_query(reviews_query: MockReviewsQuery) -> web::Data<HttpState> {
    base_state(
        MockProductCatalog::new(),
        MockOrderWorkflow::new(),
        MockReviewsCommand::new(),
        reviews_query,
    )
}

/// State with no admin key configured; all ports expect no calls.
pub fn state_without_admin_key() -> web::Data<HttpState> {
    web::Data::new(HttpState {
        catalog: Arc::new(MockProductCatalog::new()),
        orders: Arc::new(MockOrderWorkflow::new()),
        reviews: Arc::new(MockReviewsCommand::new()),
        reviews_query: Arc::new(MockReviewsQuery::new()),
        admin_key: None,
    })
}
