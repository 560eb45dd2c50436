//! Shared helpers for the MongoDB repository implementations.
//!
//! Driver errors are mapped into the domain's store error variants here,
//! with debug context emitted for operators; repositories never inspect
//! driver error kinds themselves.

use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use mongodb::error::{Error as DriverError, ErrorKind};
use mongodb::results::InsertOneResult;
use tracing::debug;

use crate::domain::ports::StoreError;

/// Map a driver error to a domain store error and emit debug context.
pub(super) fn map_driver_error(error: DriverError, operation: &str) -> StoreError {
    let message = error.to_string();
    debug!(%message, %operation, "mongodb operation failed");
    match *error.kind {
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => StoreError::connection(message),
        ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
            StoreError::decode(message)
        }
        _ => StoreError::query(message),
    }
}

/// Convert a validated hex key into a driver `ObjectId`.
pub(super) fn object_id(raw: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(raw)
        .map_err(|err| StoreError::decode(format!("invalid object id {raw:?}: {err}")))
}

/// Extract the store-assigned key from an insert acknowledgement.
pub(super) fn inserted_object_id(result: &InsertOneResult) -> Result<ObjectId, StoreError> {
    result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| StoreError::decode("insert did not return an object id"))
}

/// Convert a stored BSON timestamp into the domain's UTC representation.
pub(super) fn to_chrono_datetime(
    value: bson::DateTime,
    field: &'static str,
) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| StoreError::decode(format!("{field} timestamp out of range")))
}
