use hyper::service::Service;
use hyper::StatusCode;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use routetree::{middleware, Context, Router, RouterService};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

// Define an app state to share it across the route handlers and middlewares.
#[derive(Clone)]
struct State(u64);

// A handler for "/" page.
fn home_handler(ctx: &mut Context) {
    let visits = ctx.data::<State>().map(|state| state.0).unwrap_or_default();
    ctx.respond(StatusCode::OK, format!("Home page ({})", visits));
}

// A handler for "/users/:userId" page.
fn user_handler(ctx: &mut Context) {
    let user_id = ctx.param("userId").unwrap_or_default().to_owned();
    ctx.respond(StatusCode::OK, format!("Hello {}", user_id));
}

// A handler for "/static/*filepath".
fn static_handler(ctx: &mut Context) {
    let file = ctx.param("filepath").unwrap_or_default().to_owned();
    ctx.respond(StatusCode::OK, format!("File: {}", file));
}

// Only lets requests carrying an `x-api-key` header reach the API routes.
fn api_key(ctx: &mut Context) {
    if ctx.request().headers().contains_key("x-api-key") {
        ctx.next();
    } else {
        ctx.respond(StatusCode::UNAUTHORIZED, "Missing API key");
    }
}

fn router() -> routetree::Result<Router> {
    Router::builder()
        .data(State(100))
        .middleware(middleware::request_logger())
        .get("/", home_handler)
        .get("/static/*filepath", static_handler)
        .scope("/api", |api| {
            api.middleware(api_key).scope("/v1", |v1| {
                v1.get("/users/:userId", user_handler);
            });
        })
        .build()
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let router = router()?;
    for route in router.routes() {
        tracing::info!(method = %route.method(), pattern = route.pattern(), "route");
    }

    // Create a Service from the router above to handle incoming requests.
    let service = Arc::new(RouterService::new(router));

    // The address on which the server will be listening.
    let addr: SocketAddr = std::env::var("ROUTETREE_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_owned())
        .parse()?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "App is running");

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let service = Arc::clone(&service);

                tokio::task::spawn(async move {
                    let request_service = match service.call(&stream).await {
                        Ok(request_service) => request_service,
                        Err(err) => match err {},
                    };
                    let io = TokioIo::new(stream);

                    let builder = Builder::new(TokioExecutor::new());
                    if let Err(err) = builder.serve_connection(io, request_service).await {
                        tracing::error!(error = %err, "Error serving connection");
                    }
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "Error accepting connection");
            }
        }
    }
}
