//! Tree-shaped REST routing with a small async HTTP/1.1 front end.
//!
//! Applications describe their resources as a [`RouteNode`] tree, usually with
//! a [`MethodDispatcher`] per resource, and hand it to a [`Router`]. Every
//! request resolves to exactly one handler: the matching one, a fixed
//! `404 Not Found`, or a fixed `405 Method Not Allowed`.
//!
//! ```
//! use restynet::{responses, MethodDispatcher, Request, RouteNode, Router};
//!
//! let router = Router::new(
//!     RouteNode::branch().child(
//!         "cats",
//!         RouteNode::branch().wildcard(RouteNode::leaf(
//!             MethodDispatcher::new().get(|req: &Request| responses::html(200, req.path.clone())),
//!         )),
//!     ),
//! );
//!
//! assert_eq!(router.call(&Request::new("GET", "/cats/15")).status, 200);
//! assert_eq!(router.call(&Request::new("PUT", "/cats/15")).status, 405);
//! assert_eq!(router.call(&Request::new("GET", "/birds")).status, 404);
//! ```

pub mod config;
pub mod handler;
pub mod http;
pub mod net;

pub use config::ServerConfig;
pub use handler::dispatch::{resource, MethodDispatcher, Resource, VerbTable};
pub use handler::responses;
pub use handler::router::{
    resource_method_router, resource_router, Label, ResourceRouter, RouteNode, Router,
};
pub use handler::{boxed, html_handler, passthrough, BoxedHandler, Handler};
pub use http::request::Request;
pub use http::response::{response, Body, Response};
pub use net::Server;
