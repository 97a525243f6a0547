//! Prefix-scoped middleware.
//!
//! A middleware is a [`Handler`](../struct.Handler.html) attached to a scope: the root scope of a
//! [`RouterBuilder`](../struct.RouterBuilder.html) or any [`Group`](../struct.Group.html). For each request, the
//! middlewares of every scope whose prefix starts the request path are run in scope creation order, each
//! deciding whether to continue the chain with [`Context::next`](../struct.Context.html#method.next).

use crate::context::Context;
use std::time::Instant;

pub(crate) use self::scope::{ScopeId, ScopeTable};

mod scope;

/// Creates a middleware which logs every request with its response status and duration.
///
/// The request is logged at `info` level through [`tracing`](https://docs.rs/tracing) once the rest of the chain
/// has returned.
///
/// # Examples
///
/// ```
/// use hyper::StatusCode;
/// use routetree::{middleware, Context, Router};
///
/// # fn run() -> routetree::Result<Router> {
/// let router = Router::builder()
///     .middleware(middleware::request_logger())
///     .get("/", |ctx: &mut Context| ctx.respond(StatusCode::OK, "Home page"))
///     .build()?;
/// # Ok(router)
/// # }
/// # run().unwrap();
/// ```
pub fn request_logger() -> impl Fn(&mut Context) + Send + Sync + 'static {
    |ctx: &mut Context| {
        let start = Instant::now();
        ctx.next();
        tracing::info!(
            method = %ctx.method(),
            path = ctx.path(),
            status = ctx.status().as_u16(),
            remote_addr = %ctx.remote_addr(),
            elapsed = ?start.elapsed(),
            "request"
        );
    }
}
