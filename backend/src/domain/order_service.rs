//! Order creation workflow and order lifecycle service.
//!
//! Implements the [`OrderWorkflow`] driving port. Creation resolves every
//! product reference against the catalogue, snapshots unit prices at
//! submission time, recomputes the authoritative total server side, forces
//! the initial status to pending, persists the order in a single write, and
//! finally announces it to the admins best effort.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{AdminNotifier, OrderRepository, OrderWorkflow, ProductRepository};
use crate::domain::{
    Error, Order, OrderDraft, OrderId, OrderLine, OrderRecord, OrderStatus, Product, ProductId,
};

/// Order service implementing the driving port.
#[derive(Clone)]
pub struct OrderService<P, O, N> {
    products: Arc<P>,
    orders: Arc<O>,
    notifier: Arc<N>,
}

impl<P, O, N> OrderService<P, O, N> {
    /// Create a new service over the given repositories and notifier.
    pub fn new(products: Arc<P>, orders: Arc<O>, notifier: Arc<N>) -> Self {
        Self {
            products,
            orders,
            notifier,
        }
    }
}

impl<P, O, N> OrderService<P, O, N>
where
    P: ProductRepository,
    O: OrderRepository,
    N: AdminNotifier,
{
    fn order_missing(id: &OrderId) -> Error {
        Error::not_found(format!("Order not found: {id}"))
    }

    /// Resolve every referenced product, in submission order.
    ///
    /// Malformed and unknown references fail immediately, naming the
    /// offending reference. Unavailable products are collected across the
    /// whole submission so the caller learns about all of them at once.
    async fn resolve_products(
        &self,
        draft: &OrderDraft,
    ) -> Result<Vec<(Product, u32)>, Error> {
        let mut resolved = Vec::with_capacity(draft.items().len());
        let mut unavailable = Vec::new();

        for item in draft.items() {
            let id = ProductId::new(item.product_id.as_str())?;
            let product = self
                .products
                .find_by_id(&id)
                .await?
                .ok_or_else(|| Error::not_found(format!("Product not found: {id}")))?;
            if !product.available {
                unavailable.push(product.name.clone());
            }
            resolved.push((product, item.quantity));
        }

        if !unavailable.is_empty() {
            return Err(Error::unavailable(format!(
                "Product(s) not available: {}",
                unavailable.join(", ")
            )));
        }

        Ok(resolved)
    }

    /// Snapshot unit prices and accumulate the total.
    ///
    /// Prices come from the store, never from the client. A non-positive
    /// stored price means the document predates the price invariant and the
    /// submission is refused rather than sold at a broken price.
    fn snapshot_lines(resolved: Vec<(Product, u32)>) -> Result<(Vec<OrderLine>, f64), Error> {
        let mut lines = Vec::with_capacity(resolved.len());
        let mut total = 0.0_f64;

        for (product, quantity) in resolved {
            if product.price <= 0.0 {
                return Err(Error::invalid_state(format!(
                    "Product has invalid price: {}",
                    product.id
                )));
            }
            total += product.price * f64::from(quantity);
            lines.push(OrderLine {
                product_id: product.id,
                quantity,
                price: product.price,
            });
        }

        Ok((lines, total))
    }
}

#[async_trait]
impl<P, O, N> OrderWorkflow for OrderService<P, O, N>
where
    P: ProductRepository,
    O: OrderRepository,
    N: AdminNotifier,
{
    async fn place(&self, draft: OrderDraft) -> Result<Order, Error> {
        let resolved = self.resolve_products(&draft).await?;
        let (items, total) = Self::snapshot_lines(resolved)?;

        let record = OrderRecord {
            customer: draft.customer().clone(),
            items,
            total,
            status: OrderStatus::Pending,
        };
        let order = self.orders.insert(&record).await?;
        tracing::info!(order_id = %order.id, total = order.total, "order placed");

        // Announce best effort. A delivery failure never fails the order.
        if let Err(err) = self.notifier.order_received(&order).await {
            tracing::warn!(order_id = %order.id, error = %err, "order notification failed");
        }

        Ok(order)
    }

    async fn get(&self, id: &OrderId) -> Result<Order, Error> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::order_missing(id))
    }

    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order, Error> {
        let matched = self.orders.set_status(id, status).await?;
        if !matched {
            return Err(Self::order_missing(id));
        }
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::order_missing(id))
    }
}
