//! MongoDB-backed product repository.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Document, doc};

use crate::domain::ports::{ProductRepository, StoreError};
use crate::domain::{Product, ProductDraft, ProductId};

use super::documents::ProductDocument;
use super::mongo_helpers::{inserted_object_id, map_driver_error, object_id};
use super::store::DocumentStore;

const COLLECTION: &str = "products";
/// Listing cap; the catalogue endpoint never pages.
const LIST_CAP: i64 = 1000;

/// Product collection adapter.
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    /// Create a repository over the store's product collection.
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            collection: store.collection(COLLECTION),
        }
    }

    async fn update_fields(
        &self,
        id: &ProductId,
        changes: Document,
        operation: &'static str,
    ) -> Result<bool, StoreError> {
        let key = object_id(id.as_ref())?;
        let result = self
            .collection
            .update_one(doc! { "_id": key }, doc! { "$set": changes })
            .await
            .map_err(|err| map_driver_error(err, operation))?;
        Ok(result.matched_count > 0)
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn insert(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        let document = ProductDocument::from_draft(draft);
        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|err| map_driver_error(err, "products insert"))?;
        let id = inserted_object_id(&result)?;
        ProductDocument {
            id: Some(id),
            ..document
        }
        .into_domain()
    }

    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let documents: Vec<ProductDocument> = self
            .collection
            .find(doc! {})
            .limit(LIST_CAP)
            .await
            .map_err(|err| map_driver_error(err, "products find"))?
            .try_collect()
            .await
            .map_err(|err| map_driver_error(err, "products cursor"))?;
        documents
            .into_iter()
            .map(ProductDocument::into_domain)
            .collect()
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let key = object_id(id.as_ref())?;
        let document = self
            .collection
            .find_one(doc! { "_id": key })
            .await
            .map_err(|err| map_driver_error(err, "products find_one"))?;
        document.map(ProductDocument::into_domain).transpose()
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, StoreError> {
        let key = object_id(id.as_ref())?;
        let result = self
            .collection
            .delete_one(doc! { "_id": key })
            .await
            .map_err(|err| map_driver_error(err, "products delete"))?;
        Ok(result.deleted_count > 0)
    }

    async fn set_availability(&self, id: &ProductId, available: bool) -> Result<bool, StoreError> {
        self.update_fields(id, doc! { "available": available }, "products set_availability")
            .await
    }

    async fn set_price(&self, id: &ProductId, price: f64) -> Result<bool, StoreError> {
        self.update_fields(id, doc! { "price": price }, "products set_price")
            .await
    }

    async fn set_description(
        &self,
        id: &ProductId,
        description: &str,
    ) -> Result<bool, StoreError> {
        self.update_fields(
            id,
            doc! { "description": description },
            "products set_description",
        )
        .await
    }
}
