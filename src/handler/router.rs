//! Route tree and path resolution.
//!
//! A route tree mirrors the resource hierarchy it serves: each path segment
//! descends one level. At every level an exact label is tried first, then the
//! [`Label::Wildcard`] child, which consumes exactly one segment of any value.
//! Once a branch is taken it is never backtracked out of.
//!
//! Resolution always yields a handler. Paths that run off the tree, and nodes
//! reached without a handler of their own, resolve to the fixed
//! `404 Not Found` handler.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::handler::dispatch::{MethodDispatcher, VerbTable};
use crate::handler::responses;
use crate::handler::{boxed, passthrough, BoxedHandler, Handler, Passthrough};
use crate::http::request::Request;
use crate::http::response::Response;

static NOT_FOUND: Lazy<Passthrough> = Lazy::new(|| passthrough(responses::not_found()));

/// Label of an edge in the route tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Exact(String),
    /// Matches any single segment. Distinct from an exact `"*"` label.
    Wildcard,
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Exact(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Exact(s)
    }
}

#[derive(Clone, Default)]
pub enum RouteNode {
    /// Nothing routable here.
    #[default]
    Empty,
    /// A handler with no children.
    Leaf(BoxedHandler),
    /// An optional handler for this exact path plus child routes.
    Branch {
        handler: Option<BoxedHandler>,
        children: HashMap<Label, RouteNode>,
    },
}

impl RouteNode {
    pub fn empty() -> Self {
        RouteNode::Empty
    }

    pub fn leaf(handler: impl Handler + 'static) -> Self {
        RouteNode::Leaf(boxed(handler))
    }

    /// A branch with no handler and no children yet.
    pub fn branch() -> Self {
        RouteNode::Branch {
            handler: None,
            children: HashMap::new(),
        }
    }

    /// Sets the handler answering for this node itself.
    pub fn with_handler(self, handler: impl Handler + 'static) -> Self {
        let (_, children) = self.into_branch();
        RouteNode::Branch {
            handler: Some(boxed(handler)),
            children,
        }
    }

    /// Adds (or replaces) the child under `label`.
    pub fn child(self, label: impl Into<Label>, node: RouteNode) -> Self {
        let (handler, mut children) = self.into_branch();
        children.insert(label.into(), node);
        RouteNode::Branch { handler, children }
    }

    pub fn wildcard(self, node: RouteNode) -> Self {
        self.child(Label::Wildcard, node)
    }

    pub fn handler(&self) -> Option<&BoxedHandler> {
        match self {
            RouteNode::Empty => None,
            RouteNode::Leaf(handler) => Some(handler),
            RouteNode::Branch { handler, .. } => handler.as_ref(),
        }
    }

    fn into_branch(self) -> (Option<BoxedHandler>, HashMap<Label, RouteNode>) {
        match self {
            RouteNode::Empty => (None, HashMap::new()),
            RouteNode::Leaf(handler) => (Some(handler), HashMap::new()),
            RouteNode::Branch { handler, children } => (handler, children),
        }
    }

    fn lookup(&self, segment: &str) -> Option<&RouteNode> {
        match self {
            RouteNode::Branch { children, .. } => children
                .get(&Label::Exact(segment.to_string()))
                .or_else(|| children.get(&Label::Wildcard)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for RouteNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteNode::Empty => f.write_str("Empty"),
            RouteNode::Leaf(_) => f.write_str("Leaf"),
            RouteNode::Branch { handler, children } => f
                .debug_struct("Branch")
                .field("handler", &handler.is_some())
                .field("children", children)
                .finish(),
        }
    }
}

/// Splits a path into its non-empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Resolves `segments` against `node`.
pub fn resolve<'a>(segments: &[&str], node: &'a RouteNode) -> &'a dyn Handler {
    match segments {
        [] => match node.handler() {
            Some(handler) => handler.as_ref(),
            None => &*NOT_FOUND,
        },
        [head, rest @ ..] => match node.lookup(head) {
            Some(child) => resolve(rest, child),
            None => &*NOT_FOUND,
        },
    }
}

/// The root of an application's routes.
///
/// The tree is fixed once the router is built; share it behind an [`Arc`] to
/// serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Router {
    root: RouteNode,
}

impl Router {
    pub fn new(root: RouteNode) -> Self {
        Self { root }
    }

    /// Selects the handler for `req` without running it.
    pub fn route(&self, req: &Request) -> &dyn Handler {
        let segments = split_path(&req.path);
        resolve(&segments, &self.root)
    }

    pub fn call(&self, req: &Request) -> Response {
        let res = self.route(req).call(req);
        log::debug!("{} {} -> {}", req.method, req.path, res.status);
        res
    }

    pub fn into_shared(self) -> Arc<Router> {
        Arc::new(self)
    }
}

impl Handler for Router {
    fn call(&self, req: &Request) -> Response {
        Router::call(self, req)
    }
}

/// Dispatches on the first path segment only.
///
/// `/users`, `/users/1` and `/users/1/edit` all reach the handler named
/// `users`; whatever follows the first segment is left to that handler. The
/// root path and unknown names are not found.
#[derive(Clone, Default)]
pub struct ResourceRouter {
    routes: HashMap<String, BoxedHandler>,
}

impl ResourceRouter {
    /// The handler for the first segment of `path`, or the fixed 404 handler.
    pub fn route(&self, path: &str) -> &dyn Handler {
        let handler = split_path(path)
            .first()
            .and_then(|name| self.routes.get(*name));
        match handler {
            Some(handler) => handler.as_ref(),
            None => &*NOT_FOUND,
        }
    }
}

impl Handler for ResourceRouter {
    fn call(&self, req: &Request) -> Response {
        self.route(&req.path).call(req)
    }
}

impl std::fmt::Debug for ResourceRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.routes.keys()).finish()
    }
}

/// Builds a [`ResourceRouter`] from resource names to handlers.
pub fn resource_router<K, I>(routes: I) -> ResourceRouter
where
    K: Into<String>,
    I: IntoIterator<Item = (K, BoxedHandler)>,
{
    ResourceRouter {
        routes: routes
            .into_iter()
            .map(|(name, handler)| (name.into(), handler))
            .collect(),
    }
}

/// A [`resource_router`] whose resources each dispatch on the request verb.
pub fn resource_method_router<K, I>(routes: I) -> ResourceRouter
where
    K: Into<String>,
    I: IntoIterator<Item = (K, VerbTable)>,
{
    resource_router(
        routes
            .into_iter()
            .map(|(name, verbs)| (name, boxed(MethodDispatcher::from_table(verbs)))),
    )
}
