//! Update routing for the admin console.
//!
//! The dispatcher owns the session state and drives the product catalog
//! through chat commands, inline actions, and the pending-edit state
//! machine. Catalog failures become chat replies; only transport failures
//! propagate to the polling loop.

use std::sync::Arc;

use tracing::{debug, info};

use super::actions::AdminAction;
use super::render;
use super::session::{AdminRoster, EditField, PendingEdit, SessionState};
use super::transport::{ConsoleTransport, TransportError};
use crate::domain::ports::ProductCatalog;
use crate::domain::{Error, Gender, ProductDraft, ProductId};

/// A text message addressed to the console.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Chat to reply into.
    pub chat_id: i64,
    /// Sender account id; keys the pending-edit state.
    pub sender_id: i64,
    /// Sender handle, when the account has one.
    pub username: Option<String>,
    /// Message text.
    pub text: String,
}

/// An inline-button press on a card the console sent earlier.
#[derive(Debug, Clone)]
pub struct CallbackPress {
    /// Identifier used to acknowledge the press.
    pub callback_id: String,
    /// Chat holding the card.
    pub chat_id: i64,
    /// Message id of the card, edited in place with the outcome.
    pub message_id: i64,
    /// Account that pressed the button.
    pub sender_id: i64,
    /// Handle of that account, when present.
    pub username: Option<String>,
    /// Raw button payload.
    pub data: String,
}

/// Slash commands the console understands.
enum Command<'a> {
    Start,
    Help,
    Products,
    AddProduct(&'a str),
    DeleteProduct(&'a str),
    Unknown,
}

impl<'a> Command<'a> {
    /// Split a message into a command and its argument tail.
    ///
    /// `/command@BotName` forms are accepted; non-command text yields `None`.
    fn parse(text: &'a str) -> Option<Self> {
        let trimmed = text.trim();
        if !trimmed.starts_with('/') {
            return None;
        }
        let (head, tail) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(head, tail)| (head, tail.trim()));
        let name = head.split_once('@').map_or(head, |(name, _)| name);
        match name {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            "/products" => Some(Self::Products),
            "/addproduct" => Some(Self::AddProduct(tail)),
            "/deleteproduct" => Some(Self::DeleteProduct(tail)),
            _ => Some(Self::Unknown),
        }
    }
}

/// Routes console updates to the product catalog and renders the outcomes.
pub struct ConsoleDispatcher<C, T> {
    catalog: Arc<C>,
    transport: Arc<T>,
    sessions: SessionState,
    roster: AdminRoster,
}

impl<C, T> ConsoleDispatcher<C, T>
where
    C: ProductCatalog,
    T: ConsoleTransport,
{
    /// Build a dispatcher with empty session state.
    pub fn new(catalog: Arc<C>, transport: Arc<T>, roster: AdminRoster) -> Self {
        Self {
            catalog,
            transport,
            sessions: SessionState::new(),
            roster,
        }
    }

    /// Route one text message.
    ///
    /// Commands from non-admins get an unauthorized reply; non-admin free
    /// text is dropped silently.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when a reply cannot be delivered.
    pub async fn handle_message(&self, message: IncomingMessage) -> Result<(), TransportError> {
        if !self.roster.is_admin(message.username.as_deref()) {
            if message.text.trim_start().starts_with('/') {
                self.send(message.chat_id, render::UNAUTHORIZED_REPLY)
                    .await?;
            }
            return Ok(());
        }

        match Command::parse(&message.text) {
            Some(command) => self.handle_command(message.chat_id, command).await,
            None => self.handle_free_text(&message).await,
        }
    }

    /// Route one inline-button press.
    ///
    /// The press is always acknowledged; the card message is then edited in
    /// place with the outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the acknowledgement or the edit
    /// cannot be delivered.
    pub async fn handle_callback(&self, press: CallbackPress) -> Result<(), TransportError> {
        self.transport.answer_callback(&press.callback_id).await?;

        if !self.roster.is_admin(press.username.as_deref()) {
            return self
                .edit(press.chat_id, press.message_id, render::UNAUTHORIZED_REPLY)
                .await;
        }

        let Some(action) = AdminAction::parse(&press.data) else {
            debug!(data = %press.data, "dropping unrecognized callback payload");
            return Ok(());
        };

        let reply = match self.perform_action(&action, press.sender_id).await {
            Ok(text) => text,
            Err(error) => render::error_reply(&error),
        };
        self.edit(press.chat_id, press.message_id, &reply).await
    }

    async fn handle_command(
        &self,
        chat_id: i64,
        command: Command<'_>,
    ) -> Result<(), TransportError> {
        match command {
            Command::Start => self.send(chat_id, render::START_MESSAGE).await,
            Command::Help => self.send(chat_id, render::HELP_MESSAGE).await,
            Command::Products => self.list_products(chat_id).await,
            Command::AddProduct(args) => self.add_product(chat_id, args).await,
            Command::DeleteProduct(args) => self.delete_product(chat_id, args).await,
            Command::Unknown => Ok(()),
        }
    }

    async fn list_products(&self, chat_id: i64) -> Result<(), TransportError> {
        let products = match self.catalog.list().await {
            Ok(products) => products,
            Err(error) => return self.send(chat_id, &render::error_reply(&error)).await,
        };
        if products.is_empty() {
            return self.send(chat_id, render::EMPTY_CATALOG_REPLY).await;
        }
        for product in &products {
            let keyboard = render::product_keyboard(product.id.as_ref());
            self.transport
                .send_message(chat_id, &render::product_card(product), Some(keyboard))
                .await?;
        }
        Ok(())
    }

    async fn add_product(&self, chat_id: i64, args: &str) -> Result<(), TransportError> {
        let mut parts = args.split('|');
        let (Some(name), Some(price_raw), Some(available_raw), Some(gender_raw)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return self.send(chat_id, render::WRONG_ADD_FORMAT_REPLY).await;
        };
        if parts.next().is_some() {
            return self.send(chat_id, render::WRONG_ADD_FORMAT_REPLY).await;
        }

        let Ok(price) = price_raw.trim().parse::<f64>() else {
            return self.send(chat_id, render::WRONG_ADD_FORMAT_REPLY).await;
        };
        let Ok(gender) = gender_raw.parse::<Gender>() else {
            return self.send(chat_id, render::INVALID_GENDER_REPLY).await;
        };
        let Ok(draft) = ProductDraft::new(name.trim(), price, parse_available(available_raw), gender, None)
        else {
            return self.send(chat_id, render::WRONG_ADD_FORMAT_REPLY).await;
        };

        let reply = match self.catalog.create(draft).await {
            Ok(product) => {
                info!(product_id = %product.id, "product added from console");
                render::product_added_reply(&product)
            }
            Err(error) => render::error_reply(&error),
        };
        self.send(chat_id, &reply).await
    }

    async fn delete_product(&self, chat_id: i64, args: &str) -> Result<(), TransportError> {
        let reply = match self.try_delete(args).await {
            Ok(()) => render::DELETED_REPLY.to_owned(),
            Err(error) => render::error_reply(&error),
        };
        self.send(chat_id, &reply).await
    }

    async fn try_delete(&self, args: &str) -> Result<(), Error> {
        let id = ProductId::new(args.trim())?;
        self.catalog.delete(&id).await
    }

    async fn perform_action(
        &self,
        action: &AdminAction,
        sender_id: i64,
    ) -> Result<String, Error> {
        let id = ProductId::new(action.product_id())?;
        match action {
            AdminAction::SoldOut(_) => {
                self.catalog.set_availability(&id, false).await?;
                Ok(render::SOLD_OUT_REPLY.to_owned())
            }
            AdminAction::Available(_) => {
                self.catalog.set_availability(&id, true).await?;
                Ok(render::AVAILABLE_REPLY.to_owned())
            }
            AdminAction::Delete(_) => {
                self.catalog.delete(&id).await?;
                Ok(render::DELETED_REPLY.to_owned())
            }
            AdminAction::Price(_) => {
                let product = self.catalog.get(&id).await?;
                self.sessions
                    .set_pending(
                        sender_id,
                        PendingEdit {
                            product_id: id,
                            field: EditField::Price,
                        },
                    )
                    .await;
                Ok(render::price_prompt(&product.name))
            }
            AdminAction::Description(_) => {
                let product = self.catalog.get(&id).await?;
                self.sessions
                    .set_pending(
                        sender_id,
                        PendingEdit {
                            product_id: id,
                            field: EditField::Description,
                        },
                    )
                    .await;
                Ok(render::description_prompt(&product.name))
            }
        }
    }

    async fn handle_free_text(&self, message: &IncomingMessage) -> Result<(), TransportError> {
        let Some(pending) = self.sessions.take_pending(message.sender_id).await else {
            return Ok(());
        };
        let reply = self.apply_pending(&pending, message.text.trim()).await;
        self.send(message.chat_id, &reply).await
    }

    async fn apply_pending(&self, pending: &PendingEdit, value: &str) -> String {
        match pending.field {
            EditField::Price => {
                let Ok(price) = value.parse::<f64>() else {
                    return render::INVALID_NUMBER_REPLY.to_owned();
                };
                if !(price.is_finite() && price > 0.0) {
                    return render::INVALID_NUMBER_REPLY.to_owned();
                }
                match self.catalog.set_price(&pending.product_id, price).await {
                    Ok(()) => render::price_updated_reply(price),
                    Err(error) => render::error_reply(&error),
                }
            }
            EditField::Description => {
                match self
                    .catalog
                    .set_description(&pending.product_id, value.to_owned())
                    .await
                {
                    Ok(()) => render::DESCRIPTION_UPDATED_REPLY.to_owned(),
                    Err(error) => render::error_reply(&error),
                }
            }
        }
    }

    async fn send(&self, chat_id: i64, text: &str) -> Result<(), TransportError> {
        self.transport.send_message(chat_id, text, None).await
    }

    async fn edit(&self, chat_id: i64, message_id: i64, text: &str) -> Result<(), TransportError> {
        self.transport
            .edit_message(chat_id, message_id, text, None)
            .await
    }
}

fn parse_available(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}
