//! Common test utilities shared across integration tests

use std::sync::Arc;

use restynet::{
    html_handler, resource, MethodDispatcher, Request, Resource, Response, RouteNode, Router,
    VerbTable,
};

pub struct Index;

impl Resource for Index {
    fn declare(self: Arc<Self>, verbs: &mut VerbTable) {
        verbs.insert("GET", html_handler(|_req: &Request| "index!".to_string()));
    }
}

pub struct Cats;

impl Resource for Cats {
    fn declare(self: Arc<Self>, verbs: &mut VerbTable) {
        verbs.insert("GET", html_handler(|_req: &Request| "collection of cats!".to_string()));
    }
}

pub struct Cat;

impl Resource for Cat {
    fn declare(self: Arc<Self>, verbs: &mut VerbTable) {
        verbs.insert("GET", html_handler(|_req: &Request| "get cat!".to_string()));
        verbs.insert("PUT", html_handler(|_req: &Request| "put cat!".to_string()));
    }
}

/// `(Index, {"cats": (Cats, {"*": Cat})})`
pub fn cats_tree() -> Router {
    Router::new(
        RouteNode::branch().with_handler(resource(Index)).child(
            "cats",
            RouteNode::branch()
                .with_handler(resource(Cats))
                .wildcard(RouteNode::leaf(resource(Cat))),
        ),
    )
}

/// Handler answering with its own name, for telling branches apart.
#[allow(dead_code)]
pub fn named(name: &'static str) -> MethodDispatcher {
    MethodDispatcher::new()
        .get(html_handler(move |_req: &Request| name.to_string()))
        .post(html_handler(move |_req: &Request| name.to_string()))
}

#[allow(dead_code)]
pub fn send(router: &Router, method: &str, path: &str) -> Response {
    router.call(&Request::new(method, path))
}

/// Assert that a response is the 200 text/html page with the given body
#[allow(dead_code)]
pub fn assert_html(res: &Response, body: &str) {
    assert_eq!(res.status, 200);
    assert_eq!(res.header("Content-Type"), Some("text/html"));
    assert_eq!(res.body.as_text(), Some(body));
}
