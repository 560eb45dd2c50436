//! Product reviews: immutable once submitted.

use chrono::{DateTime, Utc};

use super::product::ProductId;
use super::validation::{ValidationError, ensure_length_at_most, validate_non_empty};

const MAX_REVIEWER_NAME_CHARS: usize = 100;
const MAX_COMMENT_CHARS: usize = 1000;
const MIN_RATING: i32 = 1;
const MAX_RATING: i32 = 5;

/// A review as persisted in the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: String,
    pub product_id: ProductId,
    pub name: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A resolved review ready for persistence: everything but the
/// store-assigned key and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub product_id: ProductId,
    pub name: String,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Validated review submission. The product reference stays a raw string;
/// the review service resolves it against the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    product_id: String,
    name: String,
    rating: i32,
    comment: Option<String>,
}

impl ReviewDraft {
    /// Validate the supplied fields and build a draft.
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = validate_non_empty(name.into(), "name")?;
        ensure_length_at_most(&name, "name", MAX_REVIEWER_NAME_CHARS)?;
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::OutOfRange {
                field: "rating",
                min: i64::from(MIN_RATING),
                max: i64::from(MAX_RATING),
            });
        }
        if let Some(comment) = comment.as_deref() {
            ensure_length_at_most(comment, "comment", MAX_COMMENT_CHARS)?;
        }
        Ok(Self {
            product_id: product_id.into(),
            name,
            rating,
            comment,
        })
    }

    pub fn product_id(&self) -> &str {
        self.product_id.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}
