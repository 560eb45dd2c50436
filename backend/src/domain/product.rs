//! Product entity and its validated value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::Error;
use super::validation::{
    ValidationError, ensure_length_at_most, ensure_positive_amount, is_hex_object_key,
    validate_non_empty,
};

const MAX_NAME_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Store-assigned product key: a 24-character hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

/// Error raised when parsing a [`ProductId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("product id must be a 24-character hex string, got {value:?}")]
pub struct ProductIdError {
    value: String,
}

impl ProductIdError {
    /// The rejected input.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

impl ProductId {
    /// Parse a raw string as a product key.
    pub fn new(value: impl Into<String>) -> Result<Self, ProductIdError> {
        let value = value.into();
        if !is_hex_object_key(&value) {
            return Err(ProductIdError { value });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductIdError> for Error {
    fn from(err: ProductIdError) -> Self {
        Error::invalid_reference(format!("Invalid product ID format: {}", err.value))
    }
}

/// Audience category a product is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    /// Lowercase wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a [`Gender`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("gender must be one of: men, women, got {value:?}")]
pub struct ParseGenderError {
    value: String,
}

impl std::str::FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            _ => Err(ParseGenderError {
                value: s.to_owned(),
            }),
        }
    }
}

/// A catalogue product as persisted in the document store.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub available: bool,
    pub gender: Gender,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a product.
///
/// ## Invariants
/// - `name` is non-empty and at most 200 characters.
/// - `price` is finite and greater than zero.
/// - `description`, when present, is at most 1000 characters.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    name: String,
    price: f64,
    available: bool,
    gender: Gender,
    description: Option<String>,
}

impl ProductDraft {
    /// Validate the supplied fields and build a draft.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        available: bool,
        gender: Gender,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = validate_non_empty(name.into(), "name")?;
        ensure_length_at_most(&name, "name", MAX_NAME_CHARS)?;
        ensure_positive_amount(price, "price")?;
        if let Some(description) = description.as_deref() {
            ensure_length_at_most(description, "description", MAX_DESCRIPTION_CHARS)?;
        }
        Ok(Self {
            name,
            price,
            available,
            gender,
            description,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Validate a replacement description for an existing product.
pub(crate) fn validate_description(value: &str) -> Result<(), ValidationError> {
    ensure_length_at_most(value, "description", MAX_DESCRIPTION_CHARS)
}
