//! Retry behavior of the forwarder against a real HTTP upstream.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rawg_gateway::config::RawgApiConfig;
use rawg_gateway::models::{Game, Paginated};
use rawg_gateway::upstream::{
    fetch, Forwarder, GatewayError, HttpTransport, QueryParams, Upstream, UpstreamError,
};

mod common;

fn forwarder(upstream: &common::MockUpstream, max_retries: u32) -> Forwarder {
    let config = RawgApiConfig {
        api_key: common::UPSTREAM_KEY.into(),
        base_url: upstream.base_url(),
        timeout_secs: 5,
        max_retries,
        backoff_unit_ms: 1,
    };
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .unwrap();
    Forwarder::new(HttpTransport::from_client(client), &config)
}

#[tokio::test]
async fn test_rate_limited_then_success() {
    let call_count = Arc::new(AtomicU32::new(0));
    let cc = call_count.clone();
    let upstream = common::start_mock_upstream(move |_| {
        let cc = cc.clone();
        async move {
            if cc.fetch_add(1, Ordering::SeqCst) == 0 {
                (429, "{}".to_string())
            } else {
                (200, common::games_fixture().to_string())
            }
        }
    })
    .await;

    let forwarder = forwarder(&upstream, 3);
    let page: Paginated<Game> = fetch(&forwarder, "games", &QueryParams::new()).await.unwrap();

    assert_eq!(page.results.len(), 2);
    assert_eq!(upstream.request_count(), 2);
    let requests = upstream.requests();
    assert_eq!(requests[0], requests[1]);
}

#[tokio::test]
async fn test_always_rate_limited_exhausts_budget() {
    let upstream = common::start_mock_upstream(|_| async { (429, "{}".to_string()) }).await;

    let err = forwarder(&upstream, 2)
        .get("games", &QueryParams::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        UpstreamError::RetriesExhausted { attempts: 3, ref last } if matches!(**last, UpstreamError::RateLimited)
    ));
    assert_eq!(upstream.request_count(), 3);
}

#[tokio::test]
async fn test_server_error_not_retried() {
    let upstream = common::start_mock_upstream(|_| async { (503, "{}".to_string()) }).await;

    let err = forwarder(&upstream, 3)
        .get("games/1", &QueryParams::new())
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::NonRetryableStatus(503)));
    assert_eq!(upstream.request_count(), 1);
}

#[tokio::test]
async fn test_connection_refused_is_retried_then_exhausted() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = RawgApiConfig {
        api_key: common::UPSTREAM_KEY.into(),
        base_url: format!("http://{addr}/api"),
        timeout_secs: 2,
        max_retries: 1,
        backoff_unit_ms: 1,
    };
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let forwarder = Forwarder::new(HttpTransport::from_client(client), &config);

    let err = forwarder.get("games", &QueryParams::new()).await.unwrap_err();
    assert!(matches!(
        err,
        UpstreamError::RetriesExhausted { attempts: 2, ref last } if matches!(**last, UpstreamError::TransientNetwork(_))
    ));
}

#[tokio::test]
async fn test_malformed_payload_is_decode_error() {
    let upstream = common::start_mock_upstream(|_| async { (200, "not json".to_string()) }).await;

    let result: Result<Paginated<Game>, _> =
        fetch(&forwarder(&upstream, 3), "games", &QueryParams::new()).await;

    assert!(matches!(result, Err(GatewayError::Decode(_))));
    assert_eq!(upstream.request_count(), 1);
}
