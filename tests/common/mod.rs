//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use tokio::net::TcpListener;

use restful_routing::config::{RouteConfig, RouterConfig};
use restful_routing::handlers::builtin_registry;
use restful_routing::lifecycle::Shutdown;
use restful_routing::{HttpServer, RouteTable};

/// Route config entry bound to a built-in handler.
pub fn route(method: &str, path: &str, produces: &str, consumes: &str, handler: &str) -> RouteConfig {
    RouteConfig {
        method: method.to_string(),
        path: path.to_string(),
        produces: produces.to_string(),
        consumes: consumes.to_string(),
        handler: handler.to_string(),
    }
}

/// Config with a small user API.
pub fn test_config() -> RouterConfig {
    let mut config = RouterConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.routes = vec![
        route("GET", "/users/{id}", "application/json", "", "echo"),
        route("PUT", "/users/{id}", "application/json", "application/json", "echo"),
        route("GET", "/health", "", "", "ok"),
    ];
    config
}

pub fn build_server(config: RouterConfig) -> HttpServer {
    let table = RouteTable::from_config(&config.routes, &builtin_registry())
        .expect("test routes reference built-in handlers");
    HttpServer::new(config, table)
}

/// Serve `config` on an ephemeral port until the returned handle is triggered.
pub async fn start_server(config: RouterConfig) -> (SocketAddr, Shutdown) {
    let server = build_server(config);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_string(response: Response<Body>) -> (StatusCode, String) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
