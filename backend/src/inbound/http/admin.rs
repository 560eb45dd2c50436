//! Admin authentication for privileged HTTP routes.
//!
//! Handlers opt in by taking [`AdminAccess`] as an argument; extraction fails
//! the request before the handler body runs when the shared secret is absent
//! or wrong.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};

use crate::domain::Error;
use crate::inbound::http::state::HttpState;

/// Header carrying the admin shared secret.
pub const ADMIN_KEY_HEADER: &str = "X-ADMIN-KEY";

/// Marker extractor proving the request presented the admin shared secret.
pub struct AdminAccess;

fn authorize(req: &HttpRequest) -> Result<AdminAccess, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    let Some(expected) = state.admin_key.as_deref() else {
        return Err(Error::unconfigured("Admin API key not configured"));
    };
    let presented = req
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if presented == Some(expected) {
        Ok(AdminAccess)
    } else {
        Err(Error::unauthorized("Invalid or missing admin API key"))
    }
}

impl FromRequest for AdminAccess {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authorize(req))
    }
}
