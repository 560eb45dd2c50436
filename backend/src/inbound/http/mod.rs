//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod error;
pub mod health;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use crate::domain::ApiResult;
