//! Review intake and listing service.
//!
//! Implements the [`ReviewsCommand`] and [`ReviewsQuery`] driving ports.
//! A review's product reference is resolved once, at submission; listings
//! never re-validate it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ProductRepository, ReviewRepository, ReviewsCommand, ReviewsQuery};
use crate::domain::{Error, ProductId, Review, ReviewDraft, ReviewRecord};

/// Default page size for the cross-product listing.
const DEFAULT_RECENT_LIMIT: i64 = 50;
/// Caller-supplied limits must stay within this range.
const MIN_RECENT_LIMIT: i64 = 1;
const MAX_RECENT_LIMIT: i64 = 100;
/// Hard cap on the per-product listing.
const PRODUCT_REVIEWS_CAP: i64 = 1000;

/// Review service implementing the driving ports.
#[derive(Clone)]
pub struct ReviewService<R, P> {
    reviews: Arc<R>,
    products: Arc<P>,
}

impl<R, P> ReviewService<R, P> {
    /// Create a new service over the given repositories.
    pub fn new(reviews: Arc<R>, products: Arc<P>) -> Self {
        Self { reviews, products }
    }
}

fn resolve_limit(limit: Option<i64>) -> Result<i64, Error> {
    match limit {
        None => Ok(DEFAULT_RECENT_LIMIT),
        Some(value) if (MIN_RECENT_LIMIT..=MAX_RECENT_LIMIT).contains(&value) => Ok(value),
        Some(_) => Err(Error::invalid_argument(format!(
            "Limit must be between {MIN_RECENT_LIMIT} and {MAX_RECENT_LIMIT}"
        ))),
    }
}

#[async_trait]
impl<R, P> ReviewsCommand for ReviewService<R, P>
where
    R: ReviewRepository,
    P: ProductRepository,
{
    async fn submit(&self, draft: ReviewDraft) -> Result<Review, Error> {
        let product_id = ProductId::new(draft.product_id())?;
        self.products
            .find_by_id(&product_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Product not found: {product_id}")))?;

        let record = ReviewRecord {
            product_id,
            name: draft.name().to_owned(),
            rating: draft.rating(),
            comment: draft.comment().map(str::to_owned),
        };
        let review = self.reviews.insert(&record).await?;
        tracing::info!(review_id = %review.id, product_id = %review.product_id, "review submitted");
        Ok(review)
    }
}

#[async_trait]
impl<R, P> ReviewsQuery for ReviewService<R, P>
where
    R: ReviewRepository,
    P: ProductRepository,
{
    async fn latest(&self, limit: Option<i64>) -> Result<Vec<Review>, Error> {
        let limit = resolve_limit(limit)?;
        Ok(self.reviews.find_recent(limit).await?)
    }

    async fn for_product(&self, id: &ProductId) -> Result<Vec<Review>, Error> {
        Ok(self
            .reviews
            .find_by_product(id, PRODUCT_REVIEWS_CAP)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockProductRepository, MockReviewRepository};
    use crate::domain::{ErrorCode, Gender, Product};
    use chrono::Utc;
    use mockall::predicate::eq;
    use rstest::rstest;

    const PRODUCT: &str = "0123456789abcdef01234567";

    fn make_service(
        reviews: MockReviewRepository,
        products: MockProductRepository,
    ) -> ReviewService<MockReviewRepository, MockProductRepository> {
        ReviewService::new(Arc::new(reviews), Arc::new(products))
    }

    fn sample_product() -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::new(PRODUCT).expect("valid id"),
            name: "Shirt".to_owned(),
            price: 10.0,
            available: true,
            gender: Gender::Men,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn stored_review(record: &ReviewRecord) -> Review {
        Review {
            id: "bbbbbbbbbbbbbbbbbbbbbbbb".to_owned(),
            product_id: record.product_id.clone(),
            name: record.name.clone(),
            rating: record.rating,
            comment: record.comment.clone(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn submit_resolves_the_product_before_persisting() {
        let mut products = MockProductRepository::new();
        products
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(sample_product())));
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_insert()
            .withf(|record| record.rating == 4 && record.name == "Jane")
            .times(1)
            .returning(|record| Ok(stored_review(record)));

        let draft = ReviewDraft::new(PRODUCT, "Jane", 4, Some("Lovely".to_owned()))
            .expect("valid draft");
        let review = make_service(reviews, products)
            .submit(draft)
            .await
            .expect("submitted");
        assert_eq!(review.rating, 4);
    }

    #[tokio::test]
    async fn submit_rejects_unknown_products() {
        let mut products = MockProductRepository::new();
        products
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));

        let draft = ReviewDraft::new(PRODUCT, "Jane", 4, None).expect("valid draft");
        let error = make_service(MockReviewRepository::new(), products)
            .submit(draft)
            .await
            .expect_err("unknown product");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), format!("Product not found: {PRODUCT}"));
    }

    #[tokio::test]
    async fn submit_rejects_malformed_product_references() {
        let draft = ReviewDraft::new("garbage", "Jane", 4, None).expect("valid draft");
        let error = make_service(MockReviewRepository::new(), MockProductRepository::new())
            .submit(draft)
            .await
            .expect_err("malformed");
        assert_eq!(error.code(), ErrorCode::InvalidReference);
        assert_eq!(error.message(), "Invalid product ID format: garbage");
    }

    #[tokio::test]
    async fn latest_defaults_to_fifty() {
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_find_recent()
            .with(eq(50_i64))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        make_service(reviews, MockProductRepository::new())
            .latest(None)
            .await
            .expect("listed");
    }

    #[rstest]
    #[case(0)]
    #[case(101)]
    #[case(-5)]
    #[tokio::test]
    async fn latest_rejects_out_of_range_limits(#[case] limit: i64) {
        let error = make_service(MockReviewRepository::new(), MockProductRepository::new())
            .latest(Some(limit))
            .await
            .expect_err("out of range");
        assert_eq!(error.code(), ErrorCode::InvalidArgument);
        assert_eq!(error.message(), "Limit must be between 1 and 100");
    }

    #[tokio::test]
    async fn for_product_applies_the_hard_cap() {
        let id = ProductId::new(PRODUCT).expect("valid id");
        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_find_by_product()
            .with(eq(id.clone()), eq(1000_i64))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        make_service(reviews, MockProductRepository::new())
            .for_product(&id)
            .await
            .expect("listed");
    }
}
