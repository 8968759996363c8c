//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use bang_router::config::validation::normalize_search;
use bang_router::config::{BangOverride, RouterConfig};
use bang_router::http::HttpServer;
use bang_router::lifecycle::Shutdown;

/// A running server on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub updates: mpsc::UnboundedSender<RouterConfig>,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server for `config` on 127.0.0.1:0.
pub async fn start_server(config: RouterConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (updates, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    TestServer {
        addr,
        updates,
        shutdown,
    }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Config without vendor bangs, holding only `overrides` (normalized the
/// way the loader does it).
pub fn config_with_overrides(overrides: &[(&str, &str)]) -> RouterConfig {
    let mut config = RouterConfig::default();
    config.search.use_vendor_bangs = false;
    config.search.bang_overrides = overrides
        .iter()
        .map(|(bang, url)| BangOverride::new(*bang, *url))
        .collect();
    normalize_search(&mut config.search);
    config
}

/// `Location` of a redirect response.
pub fn location(res: &reqwest::Response) -> String {
    res.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
