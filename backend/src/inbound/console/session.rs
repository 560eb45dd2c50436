//! Console session state: the admin allow-list and pending edits.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::ProductId;

/// Which product field a free-text reply will update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    /// The next message is parsed as the new price.
    Price,
    /// The next message becomes the new description verbatim.
    Description,
}

/// A pending edit: the next free-text message from the owning user becomes
/// the new value for `field` on `product_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    /// Product the edit targets.
    pub product_id: ProductId,
    /// Field the edit targets.
    pub field: EditField,
}

/// Mutable per-admin state shared across updates.
///
/// Keyed by user id. A newer pending edit silently replaces an older one,
/// and entries never expire; they are consumed by the user's next free-text
/// message regardless of whether the value parses.
#[derive(Debug, Default)]
pub struct SessionState {
    pending: Mutex<HashMap<i64, PendingEdit>>,
}

impl SessionState {
    /// Build empty session state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pending edit for `user_id`, replacing any existing one.
    pub async fn set_pending(&self, user_id: i64, edit: PendingEdit) {
        self.pending.lock().await.insert(user_id, edit);
    }

    /// Remove and return the pending edit for `user_id`, if any.
    pub async fn take_pending(&self, user_id: i64) -> Option<PendingEdit> {
        self.pending.lock().await.remove(&user_id)
    }
}

/// Allow-list of admin handles.
///
/// Handles are compared case-insensitively with any leading `@` stripped on
/// both sides. This gate trusts the chat platform's username display and is
/// deliberately weaker than the HTTP admin header; the two are never unified.
#[derive(Debug, Clone, Default)]
pub struct AdminRoster {
    handles: Vec<String>,
}

impl AdminRoster {
    /// Normalize and store the configured handles, dropping blank entries.
    pub fn new(handles: impl IntoIterator<Item = String>) -> Self {
        let normalized = handles
            .into_iter()
            .filter_map(|handle| {
                let cleaned = normalize_handle(&handle);
                (!cleaned.is_empty()).then_some(cleaned)
            })
            .collect();
        Self { handles: normalized }
    }

    /// Whether `username` is on the allow-list.
    ///
    /// Accounts without a public handle are never admins.
    pub fn is_admin(&self, username: Option<&str>) -> bool {
        username.is_some_and(|name| {
            let cleaned = normalize_handle(name);
            self.handles.iter().any(|handle| *handle == cleaned)
        })
    }
}

fn normalize_handle(handle: &str) -> String {
    handle.trim().trim_start_matches('@').to_lowercase()
}
