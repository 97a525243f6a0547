use crate::router::Router;
use crate::service::request_service::{RequestService, RequestServiceBuilder};
use hyper::body::Incoming;
use hyper::service::Service;
use std::convert::Infallible;
use std::future::{ready, Ready};
use tokio::net::TcpStream;

/// A [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) creating a
/// [`RequestService`](./struct.RequestService.html) for each accepted connection.
///
/// # Examples
///
/// ```no_run
/// use hyper::service::Service;
/// use hyper::StatusCode;
/// use hyper_util::rt::{TokioExecutor, TokioIo};
/// use hyper_util::server::conn::auto::Builder;
/// use routetree::{Context, Router, RouterService};
/// use std::net::SocketAddr;
/// use std::sync::Arc;
/// use tokio::net::TcpListener;
///
/// fn home(ctx: &mut Context) {
///     ctx.respond(StatusCode::OK, "Home page");
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let router = Router::builder().get("/", home).build()?;
///
///     // Create a Service from the router above to handle incoming requests.
///     let service = Arc::new(RouterService::new(router));
///
///     let addr: SocketAddr = SocketAddr::from(([127, 0, 0, 1], 3001));
///     let listener = TcpListener::bind(addr).await?;
///
///     loop {
///         let (stream, _) = listener.accept().await?;
///         let router_service = service.clone();
///
///         tokio::spawn(async move {
///             // Get the request service for this connection
///             let request_service = router_service.call(&stream).await.unwrap();
///             let io = TokioIo::new(stream);
///
///             let builder = Builder::new(TokioExecutor::new());
///             if let Err(err) = builder.serve_connection(io, request_service).await {
///                 eprintln!("Error serving connection: {:?}", err);
///             }
///         });
///     }
/// }
/// ```
#[derive(Debug)]
pub struct RouterService {
    builder: RequestServiceBuilder,
}

impl RouterService {
    /// Creates a new service from a built router.
    pub fn new(router: Router) -> RouterService {
        RouterService {
            builder: RequestServiceBuilder::new(router),
        }
    }
}

impl Service<&TcpStream> for RouterService {
    type Response = RequestService<Incoming>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, conn: &TcpStream) -> Self::Future {
        let addr = match conn.peer_addr() {
            Ok(addr) => addr,
            Err(err) => {
                tracing::debug!(error = %err, "couldn't read peer address");
                std::net::SocketAddr::from(([0, 0, 0, 0], 0))
            }
        };
        let req_service = self.builder.build(addr);

        ready(Ok(req_service))
    }
}
