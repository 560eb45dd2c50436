//! BSON document shapes for the store's collections.
//!
//! These structs are internal to the persistence layer; repositories convert
//! them to domain entities at the read boundary. The gender backfill for
//! product documents that predate the field lives here and nowhere else.

use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::ports::StoreError;
use crate::domain::{
    Customer, Gender, Order, OrderId, OrderLine, OrderRecord, OrderStatus, Product, ProductDraft,
    ProductId, Review, ReviewRecord,
};

use super::mongo_helpers::to_chrono_datetime;

fn domain_id(id: Option<ObjectId>, collection: &'static str) -> Result<String, StoreError> {
    let id = id.ok_or_else(|| StoreError::decode(format!("{collection} document missing _id")))?;
    Ok(id.to_hex())
}

fn domain_product_id(raw: String) -> Result<ProductId, StoreError> {
    ProductId::new(raw).map_err(|err| StoreError::decode(err.to_string()))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: f64,
    pub available: bool,
    // Documents created before the field was introduced lack it entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

/// Legacy products read back as women's items; unrecognised stored values
/// fall back the same way, with a warning.
fn gender_or_backfill(raw: Option<&str>) -> Gender {
    match raw {
        None => Gender::Women,
        Some(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!(value, "unrecognised stored gender, reading as women");
            Gender::Women
        }),
    }
}

impl ProductDocument {
    pub(super) fn from_draft(draft: &ProductDraft) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: None,
            name: draft.name().to_owned(),
            price: draft.price(),
            available: draft.available(),
            gender: Some(draft.gender().as_str().to_owned()),
            description: draft.description().map(str::to_owned),
            created_at: now,
            updated_at: now,
        }
    }

    pub(super) fn into_domain(self) -> Result<Product, StoreError> {
        let id = domain_product_id(domain_id(self.id, "product")?)?;
        Ok(Product {
            id,
            name: self.name,
            price: self.price,
            available: self.available,
            gender: gender_or_backfill(self.gender.as_deref()),
            description: self.description,
            created_at: to_chrono_datetime(self.created_at, "created_at")?,
            updated_at: to_chrono_datetime(self.updated_at, "updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct CustomerDocument {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CustomerDocument {
    fn from_domain(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
        }
    }

    fn into_domain(self) -> Customer {
        Customer {
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct OrderItemDocument {
    pub product_id: String,
    pub quantity: u32,
    pub price: f64,
}

impl OrderItemDocument {
    fn from_domain(line: &OrderLine) -> Self {
        Self {
            product_id: line.product_id.to_string(),
            quantity: line.quantity,
            price: line.price,
        }
    }

    fn into_domain(self) -> Result<OrderLine, StoreError> {
        Ok(OrderLine {
            product_id: domain_product_id(self.product_id)?,
            quantity: self.quantity,
            price: self.price,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct OrderDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub customer: CustomerDocument,
    pub items: Vec<OrderItemDocument>,
    pub total: f64,
    pub status: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl OrderDocument {
    pub(super) fn from_record(record: &OrderRecord) -> Self {
        let now = bson::DateTime::now();
        Self {
            id: None,
            customer: CustomerDocument::from_domain(&record.customer),
            items: record.items.iter().map(OrderItemDocument::from_domain).collect(),
            total: record.total,
            status: record.status.as_str().to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    pub(super) fn into_domain(self) -> Result<Order, StoreError> {
        let id = domain_id(self.id, "order")?;
        let id = OrderId::new(id).map_err(|err| StoreError::decode(err.to_string()))?;
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|err| StoreError::decode(err.to_string()))?;
        let items = self
            .items
            .into_iter()
            .map(OrderItemDocument::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Order {
            id,
            customer: self.customer.into_domain(),
            items,
            total: self.total,
            status,
            created_at: to_chrono_datetime(self.created_at, "created_at")?,
            updated_at: to_chrono_datetime(self.updated_at, "updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ReviewDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub product_id: String,
    pub name: String,
    pub rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub created_at: bson::DateTime,
}

impl ReviewDocument {
    pub(super) fn from_record(record: &ReviewRecord) -> Self {
        Self {
            id: None,
            product_id: record.product_id.to_string(),
            name: record.name.clone(),
            rating: record.rating,
            comment: record.comment.clone(),
            created_at: bson::DateTime::now(),
        }
    }

    pub(super) fn into_domain(self) -> Result<Review, StoreError> {
        Ok(Review {
            id: domain_id(self.id, "review")?,
            product_id: domain_product_id(self.product_id)?,
            name: self.name,
            rating: self.rating,
            comment: self.comment,
            created_at: to_chrono_datetime(self.created_at, "created_at")?,
        })
    }
}
