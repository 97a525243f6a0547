use crate::context::Context;
use crate::types::RouteParams;
use http::Method;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

pub(crate) use self::registry::Registry;

mod registry;

type HandlerFn = dyn Fn(&mut Context) + Send + Sync + 'static;

/// A route handler or a middleware.
///
/// Both are plain functions (or closures) over the request [`Context`](./struct.Context.html). They don't return a value:
/// the response is written into the context, and a middleware passes control on by calling
/// [`Context::next`](./struct.Context.html#method.next).
///
/// # Examples
///
/// ```
/// use hyper::StatusCode;
/// use routetree::{Context, Handler};
///
/// let handler = Handler::new(|ctx: &mut Context| {
///     ctx.respond(StatusCode::OK, "Home page");
/// });
/// ```
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    /// Wraps a function or a closure into a handler.
    pub fn new<H>(handler: H) -> Handler
    where
        H: Fn(&mut Context) + Send + Sync + 'static,
    {
        Handler(Arc::new(handler))
    }

    pub(crate) fn call(&self, ctx: &mut Context) {
        (self.0)(ctx)
    }
}

impl Debug for Handler {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Handler")
    }
}

/// A registered route: an HTTP method and the pattern it was registered with.
///
/// Routes shouldn't be created directly, use [RouterBuilder](./struct.RouterBuilder.html) methods to register one
/// and [`Router::routes`](./struct.Router.html#method.routes) to list them.
#[derive(Clone, PartialEq, Eq)]
pub struct Route {
    pub(crate) method: Method,
    pub(crate) pattern: String,
}

impl Route {
    /// The method the route was registered for.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The full pattern, including the prefixes of the enclosing groups.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Debug for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{ method: {:?}, pattern: {:?} }}", self.method, self.pattern)
    }
}

/// The outcome of a successful [`Router::resolve`](./struct.Router.html#method.resolve).
pub struct RouteMatch<'a> {
    pub(crate) handler: &'a Handler,
    pub(crate) pattern: &'a str,
    pub(crate) params: RouteParams,
}

impl<'a> RouteMatch<'a> {
    /// The pattern stored on the matched tree node.
    pub fn pattern(&self) -> &'a str {
        self.pattern
    }

    /// The parameters extracted from the request path.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// The handler registered for the matched pattern.
    pub fn handler(&self) -> &'a Handler {
        self.handler
    }
}

impl Debug for RouteMatch<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{ pattern: {:?}, params: {:?} }}", self.pattern, self.params)
    }
}
