//! MongoDB-backed order repository.

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::{self, doc};

use crate::domain::ports::{OrderRepository, StoreError};
use crate::domain::{Order, OrderId, OrderRecord, OrderStatus};

use super::documents::OrderDocument;
use super::mongo_helpers::{inserted_object_id, map_driver_error, object_id};
use super::store::DocumentStore;

const COLLECTION: &str = "orders";

/// Order collection adapter.
#[derive(Clone)]
pub struct MongoOrderRepository {
    collection: Collection<OrderDocument>,
}

impl MongoOrderRepository {
    /// Create a repository over the store's order collection.
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            collection: store.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    async fn insert(&self, record: &OrderRecord) -> Result<Order, StoreError> {
        let document = OrderDocument::from_record(record);
        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|err| map_driver_error(err, "orders insert"))?;
        let id = inserted_object_id(&result)?;
        OrderDocument {
            id: Some(id),
            ..document
        }
        .into_domain()
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let key = object_id(id.as_ref())?;
        let document = self
            .collection
            .find_one(doc! { "_id": key })
            .await
            .map_err(|err| map_driver_error(err, "orders find_one"))?;
        document.map(OrderDocument::into_domain).transpose()
    }

    async fn set_status(&self, id: &OrderId, status: OrderStatus) -> Result<bool, StoreError> {
        let key = object_id(id.as_ref())?;
        // Status changes are the one mutation that refreshes the timestamp.
        let changes = doc! {
            "status": status.as_str(),
            "updated_at": bson::DateTime::now(),
        };
        let result = self
            .collection
            .update_one(doc! { "_id": key }, doc! { "$set": changes })
            .await
            .map_err(|err| map_driver_error(err, "orders set_status"))?;
        Ok(result.matched_count > 0)
    }
}
