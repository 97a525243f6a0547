#![allow(dead_code)]

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::service::Service;
use hyper::{Request, Response};
use hyper_util::client::legacy::Client;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use routetree::{RequestServiceBuilder, Router, RouterService};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot::{self, Sender};

pub struct Serve {
    addr: SocketAddr,
    tx: Sender<()>,
}

impl Serve {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn new_request(&self, method: &str, route: &str) -> http::request::Builder {
        http::request::Request::builder()
            .method(method.to_ascii_uppercase().as_str())
            .uri(format!("http://{}{}", self.addr(), route))
    }

    pub async fn send(&self, req: Request<Full<Bytes>>) -> (u16, String) {
        let client = Client::builder(TokioExecutor::new()).build_http::<Full<Bytes>>();
        let res = client.request(req).await.unwrap();
        let status = res.status().as_u16();
        (status, into_text(res.into_body()).await)
    }

    pub fn shutdown(self) {
        let _ = self.tx.send(());
    }
}

/// Serves `router` on an ephemeral local port until the returned handle is shut down.
pub async fn serve(router: Router) -> Serve {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router_service = Arc::new(RouterService::new(router));
    let (tx, mut rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        loop {
            let stream = tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, _)) => stream,
                    Err(_) => continue,
                },
                _ = &mut rx => break,
            };

            let router_service = router_service.clone();
            tokio::spawn(async move {
                let request_service = router_service.call(&stream).await.unwrap();
                let io = TokioIo::new(stream);
                let builder = Builder::new(TokioExecutor::new());
                let _ = builder.serve_connection(io, request_service).await;
            });
        }
    });

    Serve { addr, tx }
}

/// Runs one request through the router services without a network round trip.
pub async fn call(router: Router, req: Request<Full<Bytes>>) -> Response<Full<Bytes>> {
    let service = RequestServiceBuilder::new(router).build(SocketAddr::from(([127, 0, 0, 1], 0)));
    service.call(req).await.unwrap()
}

pub fn get(uri: &str) -> Request<Full<Bytes>> {
    Request::builder().uri(uri).body(Full::new(Bytes::new())).unwrap()
}

pub async fn into_text<B>(body: B) -> String
where
    B: hyper::body::Body<Data = Bytes> + Send,
    B::Error: std::fmt::Debug,
{
    String::from_utf8_lossy(&body.collect().await.unwrap().to_bytes()).to_string()
}
