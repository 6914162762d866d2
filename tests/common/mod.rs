//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rawg_gateway::config::GatewayConfig;
use rawg_gateway::upstream::{Forwarder, HttpTransport};
use rawg_gateway::HttpServer;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const UPSTREAM_KEY: &str = "upstream-key";

/// Handle to a running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    /// Base URL to configure as `rawg.base_url`.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Request targets (path and query) in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Start a programmable mock upstream on an ephemeral port. `f` receives the
/// request target and returns the status and JSON body to send.
pub async fn start_mock_upstream<F, Fut>(f: F) -> MockUpstream
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let Some(target) = read_request_target(&mut socket).await else {
                            return;
                        };
                        recorded.lock().unwrap().push(target.clone());

                        let (status, body) = f(target).await;
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_line(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockUpstream { addr, requests }
}

/// Mock upstream that always answers 200 with `body`.
pub async fn start_fixed_upstream(body: Value) -> MockUpstream {
    let body = body.to_string();
    start_mock_upstream(move |_| {
        let body = body.clone();
        async move { (200, body) }
    })
    .await
}

async fn read_request_target(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    request_line.split_whitespace().nth(1).map(str::to_string)
}

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        400 => "400 Bad Request",
        401 => "401 Unauthorized",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Config pointing at `upstream`, with fast retries.
pub fn gateway_config(upstream: &MockUpstream) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.rawg.base_url = upstream.base_url();
    config.rawg.api_key = UPSTREAM_KEY.into();
    config.rawg.timeout_secs = 5;
    config.rawg.backoff_unit_ms = 1;
    config
}

/// Build a gateway whose outbound client ignores proxy environment variables.
pub fn gateway(config: GatewayConfig) -> HttpServer {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(config.rawg.timeout_secs))
        .build()
        .unwrap();
    let forwarder = Forwarder::new(HttpTransport::from_client(client), &config.rawg);
    HttpServer::with_upstream(config, Arc::new(forwarder)).unwrap()
}

/// A one-page games listing in the upstream's shape.
pub fn games_fixture() -> Value {
    json!({
        "count": 2,
        "next": "https://api.rawg.io/api/games?page=2",
        "previous": null,
        "results": [
            {
                "id": 3498,
                "slug": "grand-theft-auto-v",
                "name": "Grand Theft Auto V",
                "released": "2013-09-17",
                "rating": 4.47,
                "metacritic": 92,
                "background_image": "https://media.rawg.io/media/games/gta5.jpg",
                "genres": [
                    { "id": 4, "name": "Action", "slug": "action", "games_count": 180000 }
                ],
                "platforms": [
                    {
                        "platform": { "id": 4, "name": "PC", "slug": "pc" },
                        "released_at": "2013-09-17",
                        "requirements_en": { "minimum": "4GB RAM" }
                    }
                ],
                "stores": [
                    {
                        "id": 290375,
                        "store": { "id": 1, "name": "Steam", "slug": "steam", "domain": "store.steampowered.com" }
                    }
                ]
            },
            {
                "id": 4200,
                "slug": "portal-2",
                "name": "Portal 2",
                "rating": 4.61,
                "playtime": 11
            }
        ]
    })
}
