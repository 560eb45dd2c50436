//! In-memory adapters and app assembly shared by the integration suites.
//!
//! The fakes implement the driven ports over plain vectors so the suites can
//! exercise real services and real routes without a document store. Keys are
//! allocated from a per-store counter in the same 24-hex shape the store
//! adapters produce.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use async_trait::async_trait;
use chrono::Utc;

use backend::domain::ports::{
    AdminNotifier, NotifierError, OrderRepository, ProductRepository, ReviewRepository, StoreError,
};
use backend::domain::{
    CatalogService, Gender, Order, OrderId, OrderRecord, OrderService, OrderStatus, Product,
    ProductDraft, ProductId, Review, ReviewRecord, ReviewService,
};
use backend::inbound::console::{ConsoleTransport, Keyboard, TransportError};
use backend::inbound::http::state::HttpState;
use backend::server::build_app;

/// Admin key wired into every integration app.
pub const ADMIN_KEY: &str = "integration-admin-key";

fn next_key(counter: &AtomicU64) -> String {
    format!("{:024x}", counter.fetch_add(1, Ordering::Relaxed))
}

/// In-memory product collection with optional failure injection.
#[derive(Default)]
pub struct InMemoryProducts {
    items: Mutex<Vec<Product>>,
    next_key: AtomicU64,
    failure: Mutex<Option<StoreError>>,
}

impl InMemoryProducts {
    /// Make every subsequent call fail with the given error.
    pub fn fail_with(&self, error: StoreError) {
        *self.failure.lock().expect("product failure lock") = Some(error);
    }

    fn check(&self) -> Result<(), StoreError> {
        match self.failure.lock().expect("product failure lock").as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Snapshot of the stored products in insertion order.
    pub fn snapshot(&self) -> Vec<Product> {
        self.items.lock().expect("products lock").clone()
    }

    fn update(&self, id: &ProductId, apply: impl FnOnce(&mut Product)) -> bool {
        let mut items = self.items.lock().expect("products lock");
        match items.iter_mut().find(|product| product.id == *id) {
            Some(product) => {
                apply(product);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn insert(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        self.check()?;
        let now = Utc::now();
        let product = Product {
            id: ProductId::new(next_key(&self.next_key)).expect("generated key is valid"),
            name: draft.name().to_owned(),
            price: draft.price(),
            available: draft.available(),
            gender: draft.gender(),
            description: draft.description().map(str::to_owned),
            created_at: now,
            updated_at: now,
        };
        self.items
            .lock()
            .expect("products lock")
            .push(product.clone());
        Ok(product)
    }

    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        self.check()?;
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        self.check()?;
        Ok(self
            .items
            .lock()
            .expect("products lock")
            .iter()
            .find(|product| product.id == *id)
            .cloned())
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, StoreError> {
        self.check()?;
        let mut items = self.items.lock().expect("products lock");
        let before = items.len();
        items.retain(|product| product.id != *id);
        Ok(items.len() < before)
    }

    async fn set_availability(&self, id: &ProductId, available: bool) -> Result<bool, StoreError> {
        self.check()?;
        Ok(self.update(id, |product| product.available = available))
    }

    async fn set_price(&self, id: &ProductId, price: f64) -> Result<bool, StoreError> {
        self.check()?;
        Ok(self.update(id, |product| product.price = price))
    }

    async fn set_description(
        &self,
        id: &ProductId,
        description: &str,
    ) -> Result<bool, StoreError> {
        self.check()?;
        Ok(self.update(id, |product| product.description = Some(description.to_owned())))
    }
}

/// In-memory order collection.
#[derive(Default)]
pub struct InMemoryOrders {
    items: Mutex<Vec<Order>>,
    next_key: AtomicU64,
}

impl InMemoryOrders {
    /// Snapshot of the stored orders in insertion order.
    pub fn snapshot(&self) -> Vec<Order> {
        self.items.lock().expect("orders lock").clone()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn insert(&self, record: &OrderRecord) -> Result<Order, StoreError> {
        let now = Utc::now();
        let order = Order {
            id: OrderId::new(next_key(&self.next_key)).expect("generated key is valid"),
            customer: record.customer.clone(),
            items: record.items.clone(),
            total: record.total,
            status: record.status,
            created_at: now,
            updated_at: now,
        };
        self.items.lock().expect("orders lock").push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self
            .items
            .lock()
            .expect("orders lock")
            .iter()
            .find(|order| order.id == *id)
            .cloned())
    }

    async fn set_status(&self, id: &OrderId, status: OrderStatus) -> Result<bool, StoreError> {
        let mut items = self.items.lock().expect("orders lock");
        match items.iter_mut().find(|order| order.id == *id) {
            Some(order) => {
                order.status = status;
                order.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory review collection. Newest-first reads come from reverse
/// insertion order, matching the store adapter's timestamp sort.
#[derive(Default)]
pub struct InMemoryReviews {
    items: Mutex<Vec<Review>>,
    next_key: AtomicU64,
}

impl InMemoryReviews {
    /// Snapshot of the stored reviews in insertion order.
    pub fn snapshot(&self) -> Vec<Review> {
        self.items.lock().expect("reviews lock").clone()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviews {
    async fn insert(&self, record: &ReviewRecord) -> Result<Review, StoreError> {
        let review = Review {
            id: next_key(&self.next_key),
            product_id: record.product_id.clone(),
            name: record.name.clone(),
            rating: record.rating,
            comment: record.comment.clone(),
            created_at: Utc::now(),
        };
        self.items
            .lock()
            .expect("reviews lock")
            .push(review.clone());
        Ok(review)
    }

    async fn find_recent(&self, limit: i64) -> Result<Vec<Review>, StoreError> {
        let items = self.items.lock().expect("reviews lock");
        Ok(items
            .iter()
            .rev()
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn find_by_product(
        &self,
        id: &ProductId,
        limit: i64,
    ) -> Result<Vec<Review>, StoreError> {
        let items = self.items.lock().expect("reviews lock");
        Ok(items
            .iter()
            .rev()
            .filter(|review| review.product_id == *id)
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }
}

/// Notifier that records announcements instead of delivering them.
pub struct RecordingNotifier {
    announced: Mutex<Vec<String>>,
    texts: Mutex<Vec<String>>,
    failing: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            announced: Mutex::new(Vec::new()),
            texts: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    /// A notifier whose deliveries always fail.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// Order ids announced so far.
    pub fn announced(&self) -> Vec<String> {
        self.announced.lock().expect("announced lock").clone()
    }

    /// Free-form texts sent so far.
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().expect("texts lock").clone()
    }
}

#[async_trait]
impl AdminNotifier for RecordingNotifier {
    async fn order_received(&self, order: &Order) -> Result<(), NotifierError> {
        self.announced
            .lock()
            .expect("announced lock")
            .push(order.id.as_ref().to_owned());
        if self.failing {
            return Err(NotifierError::transport("recording notifier failure"));
        }
        Ok(())
    }

    async fn send_text(&self, text: &str) -> Result<(), NotifierError> {
        self.texts.lock().expect("texts lock").push(text.to_owned());
        if self.failing {
            return Err(NotifierError::transport("recording notifier failure"));
        }
        Ok(())
    }
}

/// Console transport that records every outgoing interaction.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(i64, String, Option<Keyboard>)>>,
    edits: Mutex<Vec<(i64, i64, String)>>,
    answered: Mutex<Vec<String>>,
}

impl RecordingTransport {
    /// Messages sent so far as `(chat_id, text, keyboard)`.
    pub fn sent(&self) -> Vec<(i64, String, Option<Keyboard>)> {
        self.sent.lock().expect("sent lock").clone()
    }

    /// Edits applied so far as `(chat_id, message_id, text)`.
    pub fn edits(&self) -> Vec<(i64, i64, String)> {
        self.edits.lock().expect("edits lock").clone()
    }

    /// Callback ids acknowledged so far.
    pub fn answered(&self) -> Vec<String> {
        self.answered.lock().expect("answered lock").clone()
    }
}

#[async_trait]
impl ConsoleTransport for RecordingTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), TransportError> {
        self.sent
            .lock()
            .expect("sent lock")
            .push((chat_id, text.to_owned(), keyboard));
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        _keyboard: Option<Keyboard>,
    ) -> Result<(), TransportError> {
        self.edits
            .lock()
            .expect("edits lock")
            .push((chat_id, message_id, text.to_owned()));
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        self.answered
            .lock()
            .expect("answered lock")
            .push(callback_id.to_owned());
        Ok(())
    }
}

/// The full set of fakes behind one application instance.
pub struct StoreWorld {
    pub products: Arc<InMemoryProducts>,
    pub orders: Arc<InMemoryOrders>,
    pub reviews: Arc<InMemoryReviews>,
    pub notifier: Arc<RecordingNotifier>,
}

impl StoreWorld {
    pub fn new() -> Self {
        Self::with_notifier(RecordingNotifier::new())
    }

    pub fn with_notifier(notifier: RecordingNotifier) -> Self {
        Self {
            products: Arc::new(InMemoryProducts::default()),
            orders: Arc::new(InMemoryOrders::default()),
            reviews: Arc::new(InMemoryReviews::default()),
            notifier: Arc::new(notifier),
        }
    }

    /// Insert a product directly into the fake store.
    pub async fn seed_product(
        &self,
        name: &str,
        price: f64,
        available: bool,
        gender: Gender,
    ) -> Product {
        let draft =
            ProductDraft::new(name, price, available, gender, None).expect("valid seed draft");
        self.products
            .insert(&draft)
            .await
            .expect("seed insert succeeds")
    }
}

/// Application state over the world's fakes, wired through the real services.
pub fn http_state(world: &StoreWorld) -> web::Data<HttpState> {
    let review_service = Arc::new(ReviewService::new(
        world.reviews.clone(),
        world.products.clone(),
    ));
    web::Data::new(HttpState {
        catalog: Arc::new(CatalogService::new(world.products.clone())),
        orders: Arc::new(OrderService::new(
            world.products.clone(),
            world.orders.clone(),
            world.notifier.clone(),
        )),
        reviews: review_service.clone(),
        reviews_query: review_service,
        admin_key: Some(ADMIN_KEY.to_owned()),
    })
}

/// The complete application over the world's fakes.
pub fn store_app(
    world: &StoreWorld,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    build_app(http_state(world))
}
