//! `routetree` is a lightweight HTTP router for [hyper](https://hyper.rs/) built on a segment trie, with
//! middleware scoped by path prefix.
//!
//! Core features:
//!
//! - Route matching on a per-method prefix tree of path segments: exact (`/about`), named (`/users/:userId`)
//!   and trailing wildcard (`/static/*filepath`) segments.
//!
//! - Path-prefix [groups](./struct.Group.html) carrying middlewares, nested to any depth.
//!
//! - Middlewares cooperate explicitly: each one decides whether the request goes on by calling
//!   [`Context::next`](./struct.Context.html#method.next), and can act on the response once the call returns.
//!
//! - Shared app state through [`RouterBuilder::data`](./struct.RouterBuilder.html#method.data).
//!
//! ## Basic Example
//!
//! ```no_run
//! use hyper::service::Service;
//! use hyper::StatusCode;
//! use hyper_util::rt::{TokioExecutor, TokioIo};
//! use hyper_util::server::conn::auto::Builder;
//! use routetree::{middleware, Context, Router, RouterService};
//! use std::net::SocketAddr;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! // Define an app state to share it across the route handlers and middlewares.
//! #[derive(Clone)]
//! struct State(u64);
//!
//! // A handler for "/" page.
//! fn home_handler(ctx: &mut Context) {
//!     // Access the app state.
//!     let state = ctx.data::<State>().unwrap();
//!     ctx.respond(StatusCode::OK, format!("Home page, state: {}", state.0));
//! }
//!
//! // A handler for "/users/:userId" page.
//! fn user_handler(ctx: &mut Context) {
//!     let user_id = ctx.param("userId").unwrap_or_default().to_owned();
//!     ctx.respond(StatusCode::OK, format!("Hello {}", user_id));
//! }
//!
//! // A middleware which only lets requests carrying a token through.
//! fn auth(ctx: &mut Context) {
//!     if ctx.request().headers().contains_key("x-token") {
//!         ctx.next();
//!     } else {
//!         ctx.respond(StatusCode::UNAUTHORIZED, "Missing token");
//!     }
//! }
//!
//! fn router() -> routetree::Result<Router> {
//!     Router::builder()
//!         .data(State(100))
//!         .middleware(middleware::request_logger())
//!         .get("/", home_handler)
//!         .scope("/admin", |admin| {
//!             admin.middleware(auth).get("/users/:userId", user_handler);
//!         })
//!         .build()
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let router_service = Arc::new(RouterService::new(router()?));
//!
//!     // The address on which the server will be listening.
//!     let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
//!     let listener = TcpListener::bind(addr).await?;
//!
//!     loop {
//!         let (stream, _) = listener.accept().await?;
//!         let router_service = router_service.clone();
//!
//!         tokio::spawn(async move {
//!             // Get the request service for this connection
//!             let request_service = router_service.call(&stream).await.unwrap();
//!
//!             // Wrap the stream in TokioIo for hyper
//!             let io = TokioIo::new(stream);
//!             let builder = Builder::new(TokioExecutor::new());
//!
//!             // Serve the connection
//!             if let Err(err) = builder.serve_connection(io, request_service).await {
//!                 eprintln!("Error serving connection: {:?}", err);
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! ## Routing
//!
//! ### Route Handlers
//!
//! A handler is a function or a closure taking the request [`Context`](./struct.Context.html). It returns nothing:
//! the response is written into the context.
//!
//! ```
//! use hyper::StatusCode;
//! use routetree::{Context, Router};
//!
//! fn about_handler(ctx: &mut Context) {
//!     ctx.respond(StatusCode::OK, "About page");
//! }
//!
//! # fn run() -> routetree::Result<Router> {
//! let router = Router::builder()
//!     .get("/about", about_handler)
//!     .post("/contact", |ctx: &mut Context| ctx.respond(StatusCode::CREATED, "Thanks"))
//!     .build()?;
//! # Ok(router)
//! # }
//! # run().unwrap();
//! ```
//!
//! ### Route Paths
//!
//! A route path is a list of segments separated by `/`. Empty segments are ignored, so `/about`, `about` and
//! `/about/` are the same path.
//!
//! - A plain segment matches the same text.
//! - A segment starting with `:` binds exactly one path segment under the name that follows.
//! - A segment starting with `*` binds the rest of the path, segments joined with `/`. It must be the last
//!   segment: [`build`](./struct.RouterBuilder.html#method.build) fails on a pattern like `/a/*rest/b`.
//!
//! ```txt
//! Route path: /users/:userName/books/:bookName
//! Request URL: http://localhost:3000/users/alice/books/HarryPotter
//! ctx.params() returns: { "userName": "alice", "bookName": "HarryPotter" }
//!
//! Route path: /static/*filepath
//! Request URL: http://localhost:3000/static/css/app.css
//! ctx.params() returns: { "filepath": "css/app.css" }
//! ```
//!
//! ### Matching Order
//!
//! There is no priority between static, named and wildcard segments. The tree is searched depth first and
//! siblings are tried in the order they were first registered, so a named segment registered before a static
//! one at the same position takes precedence. Registering a static segment where a named or wildcard sibling
//! already exists reuses that sibling: with `/users/:id` registered first, `/users/admin` replaces it, and both
//! `/users/admin` and `/users/42` then reach the `/users/admin` handler. Register the static route first to
//! keep both. A named segment ending a route also matches longer paths, e.g. `/users/:id` matches
//! `/users/42/extra`.
//!
//! Requests that match no route get a `404` with the plain text body `NOT FOUND`, unless a handler is set with
//! [`not_found`](./struct.RouterBuilder.html#method.not_found).
//!
//! ## Middleware
//!
//! Middlewares are handlers attached to a scope with `middleware`. For each request, the middlewares of every scope
//! whose prefix starts the request path are chained in the order the scopes were created (the root scope first),
//! each scope's middlewares in the order they were attached. The first one is run by the router; every
//! middleware passes control on with [`Context::next`](./struct.Context.html#method.next), and the route handler
//! runs when the last middleware does. A middleware that doesn't call `next` ends the request there.
//!
//! ```
//! use hyper::StatusCode;
//! use routetree::{Context, Router};
//! use std::time::Instant;
//!
//! fn timing(ctx: &mut Context) {
//!     let start = Instant::now();
//!     ctx.next();
//!     println!("{} {} took {:?}", ctx.method(), ctx.path(), start.elapsed());
//! }
//!
//! # fn run() -> routetree::Result<Router> {
//! let router = Router::builder()
//!     .middleware(timing)
//!     .scope("/api", |api| {
//!         api.middleware(|ctx: &mut Context| {
//!             ctx.response_mut().headers_mut().insert("x-api", "1".parse().unwrap());
//!             ctx.next();
//!         });
//!         api.scope("/v1", |v1| {
//!             v1.get("/books", |ctx: &mut Context| ctx.respond(StatusCode::OK, "List of books"));
//!         });
//!     })
//!     .build()?;
//! # Ok(router)
//! # }
//! # run().unwrap();
//! ```
//!
//! Scope prefixes are compared as plain text, so the middlewares of `/api` also run for `/apiary`.

pub use self::context::Context;
pub use self::error::{Error, RouteError};
pub use self::route::{Handler, Route, RouteMatch};
pub use self::router::{Group, Router, RouterBuilder};
#[doc(hidden)]
pub use self::service::RequestService;
pub use self::service::RequestServiceBuilder;
pub use self::service::RouterService;
pub use self::tree::Segment;
pub use self::types::RouteParams;

mod context;
mod data_map;
mod error;
mod helpers;
pub mod middleware;
mod route;
mod router;
mod service;
mod tree;
mod types;

/// A Result type often returned from methods that can have routetree errors.
pub type Result<T> = std::result::Result<T, RouteError>;
