//! Integration tests for `MarketsClient` using wiremock HTTP mocks.

use std::time::Duration;

use newsflow_markets::{MarketsClient, MarketsError, RetryPolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> MarketsClient {
    let retry = RetryPolicy {
        max_attempts: 5,
        wait: Duration::ZERO,
    };
    MarketsClient::with_base_url(None, 30, retry, Duration::ZERO, base_url)
        .expect("client construction should not fail")
}

fn coin_list_body() -> serde_json::Value {
    serde_json::json!([
        { "id": "bitcoin", "name": "Bitcoin", "symbol": "btc" },
        { "id": "bitcoin-cash", "name": "Bitcoin Cash", "symbol": "bch" },
        { "id": "ethereum", "name": "Ethereum", "symbol": "eth" }
    ])
}

fn detail_body(id: &str, name: &str, price: f64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "market_cap_rank": 1,
        "market_data": {
            "current_price": { "usd": price },
            "market_cap": { "usd": 1.0e12 }
        },
        "developer_data": { "stars": 1000 },
        "tickers": []
    })
}

#[tokio::test]
async fn lookup_returns_snapshot_per_matching_candidate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/coins/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coin_list_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/coins/bitcoin"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(detail_body("bitcoin", "Bitcoin", 50000.0)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/coins/bitcoin-cash"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(detail_body("bitcoin-cash", "Bitcoin Cash", 300.0)),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let snapshots = client.lookup("bitcoin").await.expect("lookup should work");

    assert_eq!(snapshots.len(), 2, "both bitcoin variants match");
    assert_eq!(snapshots[0].id, "bitcoin");
    assert_eq!(snapshots[0].market_data.current_price_usd, Some(50000.0));
    assert_eq!(snapshots[1].id, "bitcoin-cash");
}

#[tokio::test]
async fn lookup_with_no_candidates_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/coins/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coin_list_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let snapshots = client.lookup("dogecoin").await.expect("no match is fine");
    assert!(snapshots.is_empty());
}

#[tokio::test]
async fn transient_500s_are_retried_until_success() {
    let server = MockServer::start().await;

    // Three failures, then success on the fourth attempt.
    Mock::given(method("GET"))
        .and(path("/api/v3/coins/list"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(3)
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/coins/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "ethereum", "name": "Ethereum" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/coins/ethereum"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(detail_body("ethereum", "Ethereum", 3000.0)),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let snapshots = client
        .lookup("ethereum")
        .await
        .expect("should succeed on the 4th attempt");
    assert_eq!(snapshots.len(), 1);
}

#[tokio::test]
async fn unreserved_characters_in_coin_ids_stay_literal_in_the_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/coins/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "wrapped.token-x_v2~beta", "name": "Wrapped Token X" }
        ])))
        .mount(&server)
        .await;
    // The mock only answers on the literal path; over-encoding (e.g. %2D for
    // '-') would 404.
    Mock::given(method("GET"))
        .and(path("/api/v3/coins/wrapped.token-x_v2~beta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body(
            "wrapped.token-x_v2~beta",
            "Wrapped Token X",
            1.0,
        )))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let snapshots = client.lookup("token").await.expect("lookup should work");
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].id, "wrapped.token-x_v2~beta");
}

#[tokio::test]
async fn market_overview_fetches_markets_and_trending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/coins/markets"))
        .and(wiremock::matchers::query_param("vs_currency", "usd"))
        .and(wiremock::matchers::query_param("order", "market_cap_desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "bitcoin", "market_cap_rank": 1, "current_price": 50000.0 }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/search/trending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coins": [ { "item": { "id": "dogecoin" } } ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let overview = client
        .market_overview()
        .await
        .expect("overview should fetch");

    assert_eq!(overview.markets[0]["id"], "bitcoin");
    assert_eq!(overview.trending["coins"][0]["item"]["id"], "dogecoin");
}

#[tokio::test]
async fn malformed_list_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/coins/list"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "not": "a list" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.lookup("bitcoin").await.unwrap_err();
    assert!(
        matches!(err, MarketsError::Deserialize { .. }),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn api_key_is_appended_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/coins/list"))
        .and(wiremock::matchers::query_param("x_cg_demo_api_key", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let retry = RetryPolicy {
        max_attempts: 1,
        wait: Duration::ZERO,
    };
    let client =
        MarketsClient::with_base_url(Some("demo"), 30, retry, Duration::ZERO, &server.uri())
            .expect("client construction should not fail");
    let snapshots = client.lookup("anything").await.expect("empty list is fine");
    assert!(snapshots.is_empty());
}
