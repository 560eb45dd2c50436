//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{OrderWorkflow, ProductCatalog, ReviewsCommand, ReviewsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Product catalogue use-cases (create, list, fetch, delete, edits).
    pub catalog: Arc<dyn ProductCatalog>,
    /// Order placement and status workflow.
    pub orders: Arc<dyn OrderWorkflow>,
    /// Review submission use-case.
    pub reviews: Arc<dyn ReviewsCommand>,
    /// Review listing use-cases.
    pub reviews_query: Arc<dyn ReviewsQuery>,
    /// Shared secret expected in the admin header; `None` disables admin routes.
    pub admin_key: Option<String>,
}
