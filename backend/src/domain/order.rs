//! Order entity, customer record, and the validated order draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::Error;
use super::product::ProductId;
use super::validation::{
    ValidationError, ensure_length_at_most, ensure_length_between, is_hex_object_key,
    validate_email, validate_non_empty,
};

const MAX_CUSTOMER_NAME_CHARS: usize = 100;
const MIN_PHONE_CHARS: usize = 10;
const MAX_PHONE_CHARS: usize = 20;
const MAX_ADDRESS_CHARS: usize = 500;

/// Store-assigned order key: a 24-character hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

/// Error raised when parsing an [`OrderId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("order id must be a 24-character hex string, got {value:?}")]
pub struct OrderIdError {
    value: String,
}

impl OrderIdError {
    /// The rejected input.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

impl OrderId {
    /// Parse a raw string as an order key.
    pub fn new(value: impl Into<String>) -> Result<Self, OrderIdError> {
        let value = value.into();
        if !is_hex_object_key(&value) {
            return Err(OrderIdError { value });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<OrderId> for String {
    fn from(value: OrderId) -> Self {
        value.0
    }
}

impl TryFrom<String> for OrderId {
    type Error = OrderIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderIdError> for Error {
    fn from(err: OrderIdError) -> Self {
        Error::invalid_reference(format!("Invalid order ID format: {}", err.value))
    }
}

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every recognised status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Lowercase wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an [`OrderStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status must be one of: pending, confirmed, shipped, delivered, cancelled, got {value:?}")]
pub struct ParseOrderStatusError {
    value: String,
}

impl std::str::FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    // Lowercase only; the wire format is case sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseOrderStatusError {
                value: s.to_owned(),
            })
    }
}

impl From<ParseOrderStatusError> for Error {
    fn from(_: ParseOrderStatusError) -> Self {
        let names = OrderStatus::ALL.map(OrderStatus::as_str).join(", ");
        Error::invalid_argument(format!("Invalid status. Must be one of: {names}"))
    }
}

/// Customer contact details embedded in an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

fn validate_customer(customer: &Customer) -> Result<(), ValidationError> {
    validate_non_empty(customer.name.clone(), "customer name")?;
    ensure_length_at_most(&customer.name, "customer name", MAX_CUSTOMER_NAME_CHARS)?;
    validate_email(&customer.email, "customer email")?;
    ensure_length_between(&customer.phone, "customer phone", MIN_PHONE_CHARS, MAX_PHONE_CHARS)?;
    validate_non_empty(customer.address.clone(), "customer address")?;
    ensure_length_at_most(&customer.address, "customer address", MAX_ADDRESS_CHARS)?;
    Ok(())
}

/// One requested line in an order submission. The product reference stays a
/// raw string here; the order workflow resolves it against the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemDraft {
    pub product_id: String,
    pub quantity: u32,
}

/// One persisted order line with the unit price snapshotted at order time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: f64,
}

/// A fully resolved order ready for persistence: everything but the
/// store-assigned key and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub customer: Customer,
    pub items: Vec<OrderLine>,
    pub total: f64,
    pub status: OrderStatus,
}

/// An order as persisted in the document store.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    pub items: Vec<OrderLine>,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated order submission.
///
/// ## Invariants
/// - the customer record satisfies the field constraints;
/// - at least one item is present;
/// - every quantity is greater than zero.
///
/// Product references are *not* resolved here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    customer: Customer,
    items: Vec<OrderItemDraft>,
}

impl OrderDraft {
    /// Validate the submission shape and build a draft.
    pub fn new(customer: Customer, items: Vec<OrderItemDraft>) -> Result<Self, ValidationError> {
        validate_customer(&customer)?;
        if items.is_empty() {
            return Err(ValidationError::EmptyCollection { field: "items" });
        }
        if items.iter().any(|item| item.quantity == 0) {
            return Err(ValidationError::NotPositive { field: "quantity" });
        }
        Ok(Self { customer, items })
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn items(&self) -> &[OrderItemDraft] {
        &self.items
    }
}
