//! Per-resource dispatch on the request verb.
//!
//! A [`MethodDispatcher`] owns a [`VerbTable`] built once, when the route tree
//! is assembled. Lookups compare the verb exactly as it arrived: `get` does
//! not match a `GET` entry. A verb with no entry yields `405 Method Not
//! Allowed`, never `404`, since the resource itself was found.
//!
//! Resources register their verbs explicitly, either through the builder
//! methods or by implementing [`Resource`]; nothing is discovered at runtime.

use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::handler::responses;
use crate::handler::{boxed, passthrough, BoxedHandler, Handler, Passthrough};
use crate::http::request::Request;
use crate::http::response::Response;

static METHOD_NOT_ALLOWED: Lazy<Passthrough> =
    Lazy::new(|| passthrough(responses::method_not_allowed()));

/// Verb to handler mapping for one resource, in registration order.
#[derive(Clone, Default)]
pub struct VerbTable {
    verbs: IndexMap<String, BoxedHandler>,
}

impl VerbTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `verb`. A verb registered twice keeps its
    /// first position but answers with the latest handler.
    pub fn insert(&mut self, verb: impl Into<String>, handler: impl Handler + 'static) {
        self.insert_boxed(verb, boxed(handler));
    }

    pub fn insert_boxed(&mut self, verb: impl Into<String>, handler: BoxedHandler) {
        self.verbs.insert(verb.into(), handler);
    }

    pub fn get(&self, verb: &str) -> Option<&BoxedHandler> {
        self.verbs.get(verb)
    }

    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.verbs.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for VerbTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.verbs.keys()).finish()
    }
}

impl<V: Into<String>> FromIterator<(V, BoxedHandler)> for VerbTable {
    fn from_iter<I: IntoIterator<Item = (V, BoxedHandler)>>(iter: I) -> Self {
        let mut table = VerbTable::new();
        for (verb, handler) in iter {
            table.insert_boxed(verb, handler);
        }
        table
    }
}

#[derive(Debug, Clone, Default)]
pub struct MethodDispatcher {
    table: VerbTable,
}

impl MethodDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: VerbTable) -> Self {
        Self { table }
    }

    pub fn from_pairs<V, I>(pairs: I) -> Self
    where
        V: Into<String>,
        I: IntoIterator<Item = (V, BoxedHandler)>,
    {
        Self::from_table(pairs.into_iter().collect())
    }

    pub fn on(mut self, verb: impl Into<String>, handler: impl Handler + 'static) -> Self {
        self.table.insert(verb, handler);
        self
    }

    pub fn get(self, handler: impl Handler + 'static) -> Self {
        self.on("GET", handler)
    }

    pub fn head(self, handler: impl Handler + 'static) -> Self {
        self.on("HEAD", handler)
    }

    pub fn post(self, handler: impl Handler + 'static) -> Self {
        self.on("POST", handler)
    }

    pub fn put(self, handler: impl Handler + 'static) -> Self {
        self.on("PUT", handler)
    }

    pub fn patch(self, handler: impl Handler + 'static) -> Self {
        self.on("PATCH", handler)
    }

    pub fn delete(self, handler: impl Handler + 'static) -> Self {
        self.on("DELETE", handler)
    }

    pub fn options(self, handler: impl Handler + 'static) -> Self {
        self.on("OPTIONS", handler)
    }

    pub fn allowed_methods(&self) -> Vec<&str> {
        self.table.verbs().collect()
    }

    /// The handler registered for `verb`, or the fixed 405 handler.
    pub fn handler_for(&self, verb: &str) -> &dyn Handler {
        match self.table.get(verb) {
            Some(handler) => handler.as_ref(),
            None => &*METHOD_NOT_ALLOWED,
        }
    }

    pub fn dispatch(&self, req: &Request) -> Response {
        if self.table.get(&req.method).is_none() {
            log::debug!(
                "{} not allowed on {} (allowed: {:?})",
                req.method,
                req.path,
                self.allowed_methods()
            );
        }
        self.handler_for(&req.method).call(req)
    }
}

impl Handler for MethodDispatcher {
    fn call(&self, req: &Request) -> Response {
        self.dispatch(req)
    }
}

/// A resource that declares which verbs it answers.
///
/// `declare` receives the resource behind an [`Arc`] so that the handlers it
/// registers can share it:
///
/// ```
/// use std::sync::Arc;
/// use restynet::handler::dispatch::{resource, Resource, VerbTable};
/// use restynet::handler::responses;
/// use restynet::http::request::Request;
///
/// struct Cat;
///
/// impl Resource for Cat {
///     fn declare(self: Arc<Self>, verbs: &mut VerbTable) {
///         verbs.insert("GET", |_req: &Request| responses::html(200, "get cat!"));
///         verbs.insert("PUT", |_req: &Request| responses::html(200, "put cat!"));
///     }
/// }
///
/// let cat = resource(Cat);
/// assert_eq!(cat.allowed_methods(), ["GET", "PUT"]);
/// assert_eq!(cat.dispatch(&Request::new("POST", "/cats/1")).status, 405);
/// ```
pub trait Resource: Send + Sync + 'static {
    fn declare(self: Arc<Self>, verbs: &mut VerbTable);
}

/// Builds a dispatcher from the verbs `resource` declares.
pub fn resource<R: Resource>(resource: R) -> MethodDispatcher {
    let mut table = VerbTable::new();
    Arc::new(resource).declare(&mut table);
    MethodDispatcher::from_table(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(body: &'static str) -> impl Handler + 'static {
        move |_req: &Request| responses::html(200, body)
    }

    #[test]
    fn dispatches_on_registered_verb() {
        let dispatcher = MethodDispatcher::new().get(text("get")).put(text("put"));
        let res = dispatcher.dispatch(&Request::new("PUT", "/cats/1"));
        assert_eq!(res, responses::html(200, "put"));
    }

    #[test]
    fn unknown_verb_is_405() {
        let dispatcher = MethodDispatcher::new().get(text("get"));
        assert_eq!(
            dispatcher.dispatch(&Request::new("PUT", "/cats")),
            responses::method_not_allowed()
        );
        assert_eq!(
            dispatcher.dispatch(&Request::new("FROB", "/cats")),
            responses::method_not_allowed()
        );
    }

    #[test]
    fn verbs_are_case_sensitive() {
        let dispatcher = MethodDispatcher::new().get(text("get"));
        assert_eq!(dispatcher.dispatch(&Request::new("get", "/")).status, 405);
        assert_eq!(dispatcher.dispatch(&Request::new("GET", "/")).status, 200);
    }

    #[test]
    fn empty_dispatcher_rejects_everything() {
        let dispatcher = MethodDispatcher::new();
        assert!(dispatcher.allowed_methods().is_empty());
        assert_eq!(dispatcher.dispatch(&Request::new("GET", "/")).status, 405);
    }

    #[test]
    fn pairs_keep_order_and_last_registration_wins() {
        let dispatcher = MethodDispatcher::from_pairs([
            ("POST", boxed(text("first"))),
            ("GET", boxed(text("get"))),
            ("POST", boxed(text("second"))),
        ]);
        assert_eq!(dispatcher.allowed_methods(), ["POST", "GET"]);
        assert_eq!(
            dispatcher.dispatch(&Request::new("POST", "/")),
            responses::html(200, "second")
        );
    }

    #[test]
    fn custom_verbs_are_allowed() {
        let dispatcher = MethodDispatcher::new().on("PURGE", text("purged"));
        assert_eq!(dispatcher.dispatch(&Request::new("PURGE", "/")).status, 200);
    }

    struct Counter {
        start: u32,
    }

    impl Resource for Counter {
        fn declare(self: Arc<Self>, verbs: &mut VerbTable) {
            let this = Arc::clone(&self);
            verbs.insert("GET", move |_req: &Request| {
                responses::html(200, this.start.to_string())
            });
            verbs.insert("DELETE", move |_req: &Request| {
                responses::html(204, format!("deleted {}", self.start))
            });
        }
    }

    #[test]
    fn resource_registers_declared_verbs_only() {
        let dispatcher = resource(Counter { start: 7 });
        assert_eq!(dispatcher.allowed_methods(), ["GET", "DELETE"]);
        assert_eq!(
            dispatcher.dispatch(&Request::new("GET", "/")),
            responses::html(200, "7")
        );
        assert_eq!(dispatcher.dispatch(&Request::new("DELETE", "/")).status, 204);
        assert_eq!(dispatcher.dispatch(&Request::new("PUT", "/")).status, 405);
    }
}
