//! Access-log middleware.
//!
//! Emits one structured `tracing` event per completed request carrying the
//! method, path, response status, and handler latency. Failures surface as
//! events too, so a request never finishes silently.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, warn};

/// Access-log middleware factory.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::middleware::RequestLog;
///
/// let app = App::new().wrap(RequestLog);
/// ```
#[derive(Clone)]
pub struct RequestLog;

impl<S, B> Transform<S, ServiceRequest> for RequestLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLogMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequestLog`].
///
/// Applications should not use this type directly.
pub struct RequestLogMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_string();
        let started = Instant::now();
        let fut = self.service.call(req);
        Box::pin(async move {
            let outcome = fut.await;
            let elapsed_ms = started.elapsed().as_millis();
            match &outcome {
                Ok(response) => {
                    info!(
                        %method,
                        %path,
                        status = response.status().as_u16(),
                        elapsed_ms,
                        "request completed"
                    );
                }
                Err(error) => {
                    warn!(%method, %path, elapsed_ms, %error, "request failed");
                }
            }
            outcome
        })
    }
}
