use crate::router::Router;
use crate::{Error, RouteError};
use http_body_util::{BodyExt, Full};
use bytes::Bytes;
use http::{Request, Response};
use hyper::body::Body;
use hyper::service::Service;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

/// A [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) processing the requests of a single
/// connection.
///
/// The request body is collected before dispatch, so route handlers and middlewares see a `Request<Bytes>`.
pub struct RequestService<T> {
    pub(crate) router: Arc<Router>,
    pub(crate) remote_addr: SocketAddr,
    _body: std::marker::PhantomData<fn(T)>,
}

impl<T> Service<Request<T>> for RequestService<T>
where
    T: Body + Send + 'static,
    T::Data: Send,
    T::Error: Into<RouteError>,
{
    type Response = Response<Full<Bytes>>;
    type Error = RouteError;
    #[allow(clippy::type_complexity)]
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<T>) -> Self::Future {
        let router = self.router.clone();
        let remote_addr = self.remote_addr;

        Box::pin(process(router, remote_addr, req))
    }
}

async fn process<T>(router: Arc<Router>, remote_addr: SocketAddr, req: Request<T>) -> crate::Result<Response<Full<Bytes>>>
where
    T: Body,
    T::Error: Into<RouteError>,
{
    let (parts, body) = req.into_parts();
    let body = body
        .collect()
        .await
        .map_err(|err| Error::Body(err.into()))?
        .to_bytes();

    Ok(router.handle(Request::from_parts(parts, body), remote_addr))
}

#[derive(Debug)]
pub struct RequestServiceBuilder {
    router: Arc<Router>,
}

impl RequestServiceBuilder {
    pub fn new(router: Router) -> Self {
        Self {
            router: Arc::from(router),
        }
    }

    pub fn build<T>(&self, remote_addr: SocketAddr) -> RequestService<T> {
        RequestService {
            router: self.router.clone(),
            remote_addr,
            _body: std::marker::PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Context, RequestServiceBuilder, RouteError, Router};
    use bytes::Bytes;
    use futures::future::poll_fn;
    use http::Method;
    use http_body_util::{BodyExt, Full};
    use hyper::service::Service;
    use hyper::{Request, Response, StatusCode};
    use std::net::SocketAddr;
    use std::str::FromStr;
    use std::task::Poll;

    #[tokio::test]
    async fn should_route_request() {
        const RESPONSE_TEXT: &str = "Hello world!";
        let remote_addr = SocketAddr::from_str("0.0.0.0:8080").unwrap();
        let router = Router::builder()
            .get("/", |ctx: &mut Context| ctx.respond(StatusCode::OK, RESPONSE_TEXT))
            .build()
            .unwrap();
        let req: Request<Full<Bytes>> = Request::builder()
            .method(Method::GET)
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();

        let builder = RequestServiceBuilder::new(router);
        let service = builder.build(remote_addr);

        poll_fn(|_| -> Poll<Result<(), RouteError>> { Poll::Ready(Ok(())) })
            .await
            .expect("request service is not ready");

        let resp: Response<Full<Bytes>> = service.call(req).await.unwrap();
        let body_bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(RESPONSE_TEXT, body)
    }

    #[tokio::test]
    async fn should_pass_body_and_remote_addr_to_handler() {
        let remote_addr = SocketAddr::from_str("10.1.2.3:5555").unwrap();
        let router = Router::builder()
            .post("/echo", |ctx: &mut Context| {
                let body = format!(
                    "{} {}",
                    ctx.remote_addr(),
                    String::from_utf8_lossy(ctx.request().body())
                );
                ctx.respond(StatusCode::OK, body);
            })
            .build()
            .unwrap();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/echo")
            .body(Full::new(Bytes::from("ping")))
            .unwrap();

        let service = RequestServiceBuilder::new(router).build(remote_addr);
        let resp = service.call(req).await.unwrap();
        let body_bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body_bytes[..], b"10.1.2.3:5555 ping");
    }
}
