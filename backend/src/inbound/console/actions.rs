//! Inline actions carried by product-card buttons.
//!
//! Callback payloads are `tag:product_id` strings. They are parsed exactly
//! once at the boundary into this closed enum; everything downstream matches
//! on it exhaustively.

/// An inline action pressed on a product card, paired with the raw product
/// id it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    /// Mark the product sold out.
    SoldOut(String),
    /// Mark the product available again.
    Available(String),
    /// Start a pending price edit for the pressing admin.
    Price(String),
    /// Start a pending description edit for the pressing admin.
    Description(String),
    /// Delete the product.
    Delete(String),
}

impl AdminAction {
    /// Parse a callback payload of the form `tag:product_id`.
    ///
    /// Unknown tags and payloads without an id yield `None`; callers drop
    /// those presses.
    pub fn parse(data: &str) -> Option<Self> {
        let (tag, id) = data.split_once(':')?;
        if id.is_empty() {
            return None;
        }
        let target = id.to_owned();
        match tag {
            "soldout" => Some(Self::SoldOut(target)),
            "available" => Some(Self::Available(target)),
            "price" => Some(Self::Price(target)),
            "desc" => Some(Self::Description(target)),
            "delete" => Some(Self::Delete(target)),
            _ => None,
        }
    }

    /// Render the callback payload for this action.
    pub fn callback_data(&self) -> String {
        match self {
            Self::SoldOut(id) => format!("soldout:{id}"),
            Self::Available(id) => format!("available:{id}"),
            Self::Price(id) => format!("price:{id}"),
            Self::Description(id) => format!("desc:{id}"),
            Self::Delete(id) => format!("delete:{id}"),
        }
    }

    /// The raw product id this action targets.
    pub fn product_id(&self) -> &str {
        match self {
            Self::SoldOut(id)
            | Self::Available(id)
            | Self::Price(id)
            | Self::Description(id)
            | Self::Delete(id) => id,
        }
    }
}
