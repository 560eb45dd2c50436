//! MongoDB-backed review repository. Reviews are append-only; listings are
//! always newest first.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;

use crate::domain::ports::{ReviewRepository, StoreError};
use crate::domain::{ProductId, Review, ReviewRecord};

use super::documents::ReviewDocument;
use super::mongo_helpers::{inserted_object_id, map_driver_error};
use super::store::DocumentStore;

const COLLECTION: &str = "reviews";

/// Review collection adapter.
#[derive(Clone)]
pub struct MongoReviewRepository {
    collection: Collection<ReviewDocument>,
}

impl MongoReviewRepository {
    /// Create a repository over the store's review collection.
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            collection: store.collection(COLLECTION),
        }
    }

    async fn find_newest_first(
        &self,
        filter: mongodb::bson::Document,
        limit: i64,
        operation: &'static str,
    ) -> Result<Vec<Review>, StoreError> {
        let documents: Vec<ReviewDocument> = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await
            .map_err(|err| map_driver_error(err, operation))?
            .try_collect()
            .await
            .map_err(|err| map_driver_error(err, operation))?;
        documents
            .into_iter()
            .map(ReviewDocument::into_domain)
            .collect()
    }
}

#[async_trait]
impl ReviewRepository for MongoReviewRepository {
    async fn insert(&self, record: &ReviewRecord) -> Result<Review, StoreError> {
        let document = ReviewDocument::from_record(record);
        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|err| map_driver_error(err, "reviews insert"))?;
        let id = inserted_object_id(&result)?;
        ReviewDocument {
            id: Some(id),
            ..document
        }
        .into_domain()
    }

    async fn find_recent(&self, limit: i64) -> Result<Vec<Review>, StoreError> {
        self.find_newest_first(doc! {}, limit, "reviews find_recent")
            .await
    }

    async fn find_by_product(
        &self,
        id: &ProductId,
        limit: i64,
    ) -> Result<Vec<Review>, StoreError> {
        self.find_newest_first(
            doc! { "product_id": id.as_ref() },
            limit,
            "reviews find_by_product",
        )
        .await
    }
}
