use crate::data_map::DataMap;
use crate::route::Handler;
use crate::types::RouteParams;
use http_body_util::Full;
use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};
use std::fmt::{self, Debug, Formatter};
use std::net::SocketAddr;
use std::sync::Arc;

/// Per-request state handed to every middleware and to the route handler.
///
/// A `Context` is created for each incoming request and dropped once the response is produced. It carries the
/// request (with its body already collected), the response being built, the route parameters, and the sequence
/// of middlewares assigned to the request.
///
/// # Examples
///
/// ```
/// use hyper::StatusCode;
/// use routetree::{Context, Router};
///
/// # fn run() -> routetree::Result<Router> {
/// let router = Router::builder()
///     .middleware(|ctx: &mut Context| {
///         // Runs before the handler, continues the chain, then sees the response.
///         ctx.next();
///         println!("{} {} -> {}", ctx.method(), ctx.path(), ctx.status());
///     })
///     .get("/users/:userId", |ctx: &mut Context| {
///         let body = format!("Hello {}", ctx.param("userId").unwrap_or_default());
///         ctx.respond(StatusCode::OK, body);
///     })
///     .build()?;
/// # Ok(router)
/// # }
/// # run().unwrap();
/// ```
pub struct Context {
    request: Request<Bytes>,
    response: Response<Full<Bytes>>,
    params: RouteParams,
    method: Method,
    path: String,
    remote_addr: SocketAddr,
    data: Arc<DataMap>,

    middlewares: Vec<Handler>,
    handler: Option<Handler>,
    // Steps taken through `middlewares` and then `handler`; zero is "before first".
    cursor: usize,
}

impl Context {
    pub(crate) fn new(request: Request<Bytes>, path: String, remote_addr: SocketAddr, data: Arc<DataMap>) -> Context {
        Context {
            method: request.method().clone(),
            request,
            response: Response::new(Full::new(Bytes::new())),
            params: RouteParams::new(),
            path,
            remote_addr,
            data,
            middlewares: Vec::new(),
            handler: None,
            cursor: 0,
        }
    }

    pub(crate) fn assign(&mut self, middlewares: Vec<Handler>, handler: Option<Handler>, params: RouteParams) {
        self.middlewares = middlewares;
        self.handler = handler;
        self.params = params;
    }

    /// Passes control to the next middleware, or to the route handler once every middleware has run.
    ///
    /// A middleware that doesn't call `next` ends the chain: neither the remaining middlewares nor the route
    /// handler are executed. Code placed after the call runs once the rest of the chain has returned.
    pub fn next(&mut self) {
        let step = self.cursor;
        self.cursor = self.cursor.saturating_add(1);

        if let Some(middleware) = self.middlewares.get(step).cloned() {
            middleware.call(self);
        } else if step == self.middlewares.len() {
            if let Some(handler) = self.handler.clone() {
                handler.call(self);
            }
        }
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The percent-decoded request path used for routing.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the value of the route parameter `name`, if the matched pattern declared it.
    pub fn param<N: AsRef<str>>(&self, name: N) -> Option<&str> {
        self.params.get(name)
    }

    /// All route parameters extracted for this request.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// The request, with its body collected into [`Bytes`](https://docs.rs/bytes/1/bytes/struct.Bytes.html).
    pub fn request(&self) -> &Request<Bytes> {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut Request<Bytes> {
        &mut self.request
    }

    /// The address of the peer that sent the request.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// Returns the shared data of type `T` registered with [`RouterBuilder::data`](./struct.RouterBuilder.html#method.data).
    pub fn data<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.data.get::<T>()
    }

    /// The status of the response built so far, `200 OK` until something sets it.
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn set_status(&mut self, status: StatusCode) {
        *self.response.status_mut() = status;
    }

    /// Sets the response status and replaces the response body.
    pub fn respond<B: Into<Bytes>>(&mut self, status: StatusCode, body: B) {
        self.set_status(status);
        *self.response.body_mut() = Full::new(body.into());
    }

    pub fn response(&self) -> &Response<Full<Bytes>> {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut Response<Full<Bytes>> {
        &mut self.response
    }

    pub(crate) fn into_response(self) -> Response<Full<Bytes>> {
        self.response
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ method: {:?}, path: {:?}, params: {:?}, middlewares: {}, cursor: {} }}",
            self.method,
            self.path,
            self.params,
            self.middlewares.len(),
            self.cursor
        )
    }
}
