//! Message rendering for the admin console.
//!
//! Pure text and keyboard construction; nothing here talks to the transport
//! or the catalog. Texts are Telegram Markdown.

use super::actions::AdminAction;
use super::transport::{Button, Keyboard};
use crate::domain::{Error, ErrorCode, Product};

pub(super) const START_MESSAGE: &str = "👋 *Welcome to the Store Admin Console*\n\n\
    You can manage the store directly from this chat.\n\n\
    📦 *Products*\n\
    • /products – List products\n\
    • /addproduct Name|Price|true|men\n\
    • /deleteproduct <id>\n\n\
    ℹ️ Use /help for details";

pub(super) const HELP_MESSAGE: &str = "🆘 *Admin Console Help*\n\n\
    ➕ Add product:\n\
    `/addproduct Name|Price|true|men`\n\n\
    📦 List products:\n\
    `/products`\n\n\
    🗑 Delete product:\n\
    `/deleteproduct <id>`\n\n\
    💵 Change price:\n\
    Press *Change Price* on a card, then send the new number.\n\n\
    📝 Edit description:\n\
    Press *Description* on a card, then send the new text.\n\n\
    ⚠️ Gender must be `men` or `women`";

pub(super) const UNAUTHORIZED_REPLY: &str = "❌ Unauthorized";
pub(super) const EMPTY_CATALOG_REPLY: &str = "📦 No products found";
pub(super) const WRONG_ADD_FORMAT_REPLY: &str =
    "❌ Wrong format\n`/addproduct Name|Price|true|men`";
pub(super) const INVALID_GENDER_REPLY: &str = "❌ gender must be men or women";
pub(super) const INVALID_NUMBER_REPLY: &str = "❌ Send a valid number";
pub(super) const SOLD_OUT_REPLY: &str = "🟥 Marked as SOLD OUT";
pub(super) const AVAILABLE_REPLY: &str = "🟩 Marked as AVAILABLE";
pub(super) const DELETED_REPLY: &str = "🗑 Product deleted";
pub(super) const DESCRIPTION_UPDATED_REPLY: &str = "✅ Description updated";
pub(super) const GENERIC_FAILURE_REPLY: &str = "⚠️ Something went wrong, try again later";

/// Render one product card.
pub(super) fn product_card(product: &Product) -> String {
    let availability = if product.available {
        "Available ✅"
    } else {
        "Sold Out ❌"
    };
    let mut card = format!(
        "🛒 *{name}*\n🆔 `{id}`\n💵 {price} EGP\n👕 {gender}\n📦 {availability}",
        name = product.name,
        id = product.id,
        price = product.price,
        gender = product.gender,
    );
    if let Some(description) = product.description.as_deref() {
        card.push_str("\n📝 ");
        card.push_str(description);
    }
    card
}

/// Inline actions offered under one product card.
pub(super) fn product_keyboard(product_id: &str) -> Keyboard {
    vec![
        vec![
            action_button("🟥 Sold Out", AdminAction::SoldOut(product_id.to_owned())),
            action_button("🟩 Available", AdminAction::Available(product_id.to_owned())),
        ],
        vec![
            action_button("💰 Change Price", AdminAction::Price(product_id.to_owned())),
            action_button("✏️ Description", AdminAction::Description(product_id.to_owned())),
        ],
        vec![action_button("🗑 Delete", AdminAction::Delete(product_id.to_owned()))],
    ]
}

fn action_button(label: &str, action: AdminAction) -> Button {
    Button::new(label, action.callback_data())
}

/// Confirmation sent after `/addproduct` succeeds.
pub(super) fn product_added_reply(product: &Product) -> String {
    format!(
        "✅ *Product Added*\n\n{name}\n{price} EGP\n{gender}",
        name = product.name,
        price = product.price,
        gender = product.gender,
    )
}

/// Prompt shown when a price edit starts.
pub(super) fn price_prompt(name: &str) -> String {
    format!("💵 Send the new price for *{name}*")
}

/// Prompt shown when a description edit starts.
pub(super) fn description_prompt(name: &str) -> String {
    format!("📝 Send the new description for *{name}*")
}

/// Confirmation sent after a price edit lands.
pub(super) fn price_updated_reply(price: f64) -> String {
    format!("✅ Price updated → {price} EGP")
}

/// Render a domain failure as a short chat reply.
///
/// User-correctable failures surface their message; infrastructure failures
/// collapse to a generic line so driver detail never reaches the chat.
pub(super) fn error_reply(error: &Error) -> String {
    match error.code() {
        ErrorCode::InvalidReference => "❌ Invalid product ID".to_owned(),
        ErrorCode::NotFound => "❌ Product not found".to_owned(),
        ErrorCode::InvalidArgument | ErrorCode::Unavailable | ErrorCode::InvalidState => {
            format!("❌ {error}")
        }
        ErrorCode::Unauthorized
        | ErrorCode::Unconfigured
        | ErrorCode::Unreachable
        | ErrorCode::Internal => GENERIC_FAILURE_REPLY.to_owned(),
    }
}
