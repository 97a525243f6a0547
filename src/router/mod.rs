use crate::context::Context;
use crate::data_map::DataMap;
use crate::helpers;
use crate::middleware::ScopeTable;
use crate::route::{Handler, Registry, Route, RouteMatch};
use crate::types::RouteParams;
use http_body_util::Full;
use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::{Method, Request, Response, StatusCode};
use std::fmt::{self, Debug, Formatter};
use std::net::SocketAddr;
use std::sync::Arc;

pub use self::builder::{Group, RouterBuilder};

mod builder;

const NOT_FOUND_BODY: &str = "NOT FOUND";

/// Represents a modular, lightweight and mountable router type.
///
/// A router holds one routing tree per HTTP method, the middleware scopes created while building it, and the
/// shared data. It is immutable once built, so it can be shared between connections behind an `Arc`.
///
/// # Examples
///
/// ```
/// use hyper::StatusCode;
/// use routetree::{Context, Router};
///
/// fn home_handler(ctx: &mut Context) {
///     ctx.respond(StatusCode::OK, "home");
/// }
///
/// fn run() -> routetree::Result<Router> {
///     Router::builder().get("/", home_handler).build()
/// }
/// # run().unwrap();
/// ```
pub struct Router {
    registry: Registry,
    scopes: ScopeTable,
    data: Arc<DataMap>,
    not_found: Handler,
}

impl Router {
    /// Return a [RouterBuilder](./struct.RouterBuilder.html) instance to build a `Router`.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Finds the route registered for `method` that the tree selects for `path`, along with the extracted
    /// parameters. Returns `None` when the method has no routes or no pattern matches.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.registry.resolve(method, path)
    }

    /// Lists every registered route.
    pub fn routes(&self) -> Vec<Route> {
        self.registry.routes()
    }

    /// Runs a request through its middleware chain and route handler and returns the response.
    ///
    /// The request path is percent decoded before routing. Requests which don't match any route are handed to
    /// the not found handler, after the middlewares whose scope matches the path. A path that doesn't decode to
    /// UTF-8 matches no route; its scopes are assigned on the raw path.
    pub fn handle(&self, req: Request<Bytes>, remote_addr: SocketAddr) -> Response<Full<Bytes>> {
        match helpers::percent_decode_request_path(req.uri().path()) {
            Ok(path) => self.dispatch(req, path, remote_addr, true),
            Err(err) => {
                let path = req.uri().path().to_owned();
                tracing::debug!(path = %path, error = %err, "request path could not be decoded");
                self.dispatch(req, path, remote_addr, false)
            }
        }
    }

    fn dispatch(&self, req: Request<Bytes>, path: String, remote_addr: SocketAddr, routable: bool) -> Response<Full<Bytes>> {
        let span = tracing::debug_span!("request", method = %req.method(), path = %path);
        let _enter = span.enter();

        let middlewares = self.scopes.assign(&path);
        let mut ctx = Context::new(req, path, remote_addr, Arc::clone(&self.data));

        let found = if routable {
            self.registry.resolve(ctx.method(), ctx.path())
        } else {
            None
        };
        let (handler, params) = match found {
            Some(found) => (found.handler.clone(), found.params),
            None => {
                tracing::trace!("no route matched");
                (self.not_found.clone(), RouteParams::new())
            }
        };

        ctx.assign(middlewares, Some(handler), params);
        ctx.next();
        ctx.into_response()
    }
}

fn default_not_found(ctx: &mut Context) {
    ctx.respond(StatusCode::NOT_FOUND, NOT_FOUND_BODY);
    ctx.response_mut()
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
}

impl Debug for Router {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{ routes: {:?}, scopes: {:?} }}", self.routes(), self.scopes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::sync::Mutex;

    fn remote_addr() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 4000))
    }

    fn request(method: Method, uri: &str) -> Request<Bytes> {
        Request::builder().method(method).uri(uri).body(Bytes::new()).unwrap()
    }

    async fn body_text(res: Response<Full<Bytes>>) -> String {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_answer_misses_with_plain_text_404() {
        let router = Router::builder()
            .get("/users", |ctx: &mut Context| ctx.respond(StatusCode::OK, "users"))
            .build()
            .unwrap();

        let res = router.handle(request(Method::GET, "/nope"), remote_addr());
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "text/plain");
        assert_eq!(body_text(res).await, "NOT FOUND");

        let res = router.handle(request(Method::POST, "/users"), remote_addr());
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_run_scoped_middlewares_before_handler() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());

        let router = Router::builder()
            .scope("/api", move |api| {
                api.middleware(move |ctx: &mut Context| {
                    l1.lock().unwrap().push("api".to_owned());
                    ctx.next();
                })
                .scope("/v1", move |v1| {
                    v1.middleware(move |ctx: &mut Context| {
                        l2.lock().unwrap().push("v1".to_owned());
                        ctx.next();
                    })
                    .get("/users/:id", move |ctx: &mut Context| {
                        let id = ctx.param("id").unwrap_or_default().to_owned();
                        l3.lock().unwrap().push(format!("user {}", id));
                        ctx.respond(StatusCode::OK, id);
                    });
                });
            })
            .build()
            .unwrap();

        let res = router.handle(request(Method::GET, "/api/v1/users/7"), remote_addr());
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "7");
        assert_eq!(*log.lock().unwrap(), vec!["api", "v1", "user 7"]);
    }

    #[tokio::test]
    async fn should_decode_path_before_routing() {
        let router = Router::builder()
            .get("/files/*path", |ctx: &mut Context| {
                let path = ctx.param("path").unwrap_or_default().to_owned();
                ctx.respond(StatusCode::OK, path);
            })
            .build()
            .unwrap();

        let res = router.handle(request(Method::GET, "/files/caf%C3%A9/menu.txt"), remote_addr());
        assert_eq!(body_text(res).await, "café/menu.txt");
    }

    #[tokio::test]
    async fn should_answer_404_for_undecodable_path() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let l1 = log.clone();

        let router = Router::builder()
            .scope("/files", move |files| {
                files
                    .middleware(move |ctx: &mut Context| {
                        l1.lock().unwrap().push(ctx.path().to_owned());
                        ctx.next();
                    })
                    .get("/*path", |ctx: &mut Context| ctx.respond(StatusCode::OK, "file"));
            })
            .build()
            .unwrap();

        let res = router.handle(request(Method::GET, "/files/%FF"), remote_addr());
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(res).await, "NOT FOUND");
        assert_eq!(*log.lock().unwrap(), vec!["/files/%FF"]);
    }

    #[test]
    fn should_expose_resolution() {
        let router = Router::builder()
            .get("/p/:lang/doc", |_: &mut Context| {})
            .build()
            .unwrap();

        let found = router.resolve(&Method::GET, "/p/go/doc").unwrap();
        assert_eq!(found.pattern(), "/p/:lang/doc");
        assert_eq!(found.params().get("lang"), Some("go"));
        assert!(router.resolve(&Method::DELETE, "/p/go/doc").is_none());
    }
}
