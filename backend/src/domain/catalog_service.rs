//! Catalogue management service.
//!
//! Implements the [`ProductCatalog`] driving port over a product repository.
//! Field updates deliberately leave the updated timestamp untouched; only
//! order status changes refresh one.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ProductCatalog, ProductRepository};
use crate::domain::product::validate_description;
use crate::domain::validation::ensure_positive_amount;
use crate::domain::{Error, Product, ProductDraft, ProductId};

/// Catalogue service implementing the driving port.
#[derive(Clone)]
pub struct CatalogService<P> {
    products: Arc<P>,
}

impl<P> CatalogService<P> {
    /// Create a new service over the given repository.
    pub fn new(products: Arc<P>) -> Self {
        Self { products }
    }
}

impl<P> CatalogService<P>
where
    P: ProductRepository,
{
    fn missing(id: &ProductId) -> Error {
        Error::not_found(format!("Product not found: {id}"))
    }

    /// Translate "nothing matched" into `NotFound`.
    fn require_match(id: &ProductId, matched: bool) -> Result<(), Error> {
        if matched { Ok(()) } else { Err(Self::missing(id)) }
    }
}

#[async_trait]
impl<P> ProductCatalog for CatalogService<P>
where
    P: ProductRepository,
{
    async fn create(&self, draft: ProductDraft) -> Result<Product, Error> {
        let product = self.products.insert(&draft).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>, Error> {
        Ok(self.products.find_all().await?)
    }

    async fn get(&self, id: &ProductId) -> Result<Product, Error> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::missing(id))
    }

    async fn delete(&self, id: &ProductId) -> Result<(), Error> {
        let deleted = self.products.delete(id).await?;
        Self::require_match(id, deleted)?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    async fn set_availability(&self, id: &ProductId, available: bool) -> Result<(), Error> {
        let matched = self.products.set_availability(id, available).await?;
        Self::require_match(id, matched)
    }

    async fn set_price(&self, id: &ProductId, price: f64) -> Result<(), Error> {
        ensure_positive_amount(price, "price")
            .map_err(|err| Error::invalid_argument(err.to_string()))?;
        let matched = self.products.set_price(id, price).await?;
        Self::require_match(id, matched)
    }

    async fn set_description(&self, id: &ProductId, description: String) -> Result<(), Error> {
        validate_description(&description)
            .map_err(|err| Error::invalid_argument(err.to_string()))?;
        let matched = self.products.set_description(id, &description).await?;
        Self::require_match(id, matched)
    }
}
