//! Handlers: anything that turns a [`Request`] into a [`Response`].
//!
//! Route trees and verb tables store handlers as [`BoxedHandler`]s so that
//! closures, fixed responses, dispatchers and whole routers can be mixed
//! freely. Handlers only get `&self`; any state they close over is read-only
//! as far as routing is concerned.

pub mod dispatch;
pub mod responses;
pub mod router;

use std::sync::Arc;

use crate::http::request::Request;
use crate::http::response::Response;

pub trait Handler: Send + Sync {
    fn call(&self, req: &Request) -> Response;
}

pub type BoxedHandler = Arc<dyn Handler>;

impl<F> Handler for F
where
    F: Fn(&Request) -> Response + Send + Sync,
{
    fn call(&self, req: &Request) -> Response {
        self(req)
    }
}

pub fn boxed(handler: impl Handler + 'static) -> BoxedHandler {
    Arc::new(handler)
}

/// Always answers with the same response, whatever the request.
#[derive(Debug, Clone)]
pub struct Passthrough {
    response: Response,
}

impl Handler for Passthrough {
    fn call(&self, _req: &Request) -> Response {
        self.response.clone()
    }
}

pub fn passthrough(response: Response) -> Passthrough {
    Passthrough { response }
}

/// Wraps a function producing HTML into a `200 text/html` handler.
pub struct HtmlHandler<F> {
    content: F,
}

impl<F> Handler for HtmlHandler<F>
where
    F: Fn(&Request) -> String + Send + Sync,
{
    fn call(&self, req: &Request) -> Response {
        responses::html(200, (self.content)(req))
    }
}

pub fn html_handler<F>(content: F) -> HtmlHandler<F>
where
    F: Fn(&Request) -> String + Send + Sync,
{
    HtmlHandler { content }
}
