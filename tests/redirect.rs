//! End-to-end tests for the HTTP redirect service.

use std::time::Duration;

use reqwest::StatusCode;

use bang_router::config::schema::RedirectStatus;
use bang_router::config::RouterConfig;

mod common;

#[tokio::test]
async fn test_bang_redirect() {
    let server = common::start_server(common::config_with_overrides(&[(
        "gh",
        "https://github.com/search?q={query}",
    )]))
    .await;

    let res = common::client()
        .get(server.url("/search"))
        .query(&[("q", "!gh tokio runtime")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        common::location(&res),
        "https://github.com/search?q=tokio+runtime"
    );
}

#[tokio::test]
async fn test_raw_override_location_is_percent_encoded() {
    let mut config = common::config_with_overrides(&[("raw", "https://raw.example/{query}")]);
    config.search.bang_overrides[0].url_encode_placeholder = false;
    config.search.bang_overrides[0].url_encode_space_to_plus = false;
    let server = common::start_server(config).await;

    let res = common::client()
        .get(server.url("/search"))
        .query(&[("q", "!raw café")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&res), "https://raw.example/caf%C3%A9");
}

#[tokio::test]
async fn test_lone_bang_redirect() {
    let server = common::start_server(common::config_with_overrides(&[(
        "gh",
        "https://github.com/search?q={query}",
    )]))
    .await;

    let res = common::client()
        .get(server.url("/?q=%21gh"))
        .send()
        .await
        .unwrap();

    assert_eq!(common::location(&res), "https://github.com");
}

#[tokio::test]
async fn test_fallback_uses_default_engine() {
    let server = common::start_server(common::config_with_overrides(&[])).await;

    let res = common::client()
        .get(server.url("/search"))
        .query(&[("q", "!unknown query text")])
        .send()
        .await
        .unwrap();

    assert_eq!(
        common::location(&res),
        "https://www.google.com/search?q=!unknown+query+text"
    );
}

#[tokio::test]
async fn test_vendor_bang_from_bundled_catalog() {
    let server = common::start_server(RouterConfig::default()).await;

    let res = common::client()
        .get(server.url("/search"))
        .query(&[("q", "!w cats")])
        .send()
        .await
        .unwrap();

    assert_eq!(
        common::location(&res),
        "https://en.wikipedia.org/wiki/Special:Search?search=cats"
    );
}

#[tokio::test]
async fn test_missing_query_is_bad_request() {
    let server = common::start_server(RouterConfig::default()).await;
    let client = common::client();

    for path in ["/search", "/search?q=", "/?q=%20%20"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "path {path}");
    }
}

#[tokio::test]
async fn test_configured_redirect_status() {
    let mut config = common::config_with_overrides(&[]);
    config.http.redirect_status = RedirectStatus::Found;
    let server = common::start_server(config).await;

    let res = common::client()
        .get(server.url("/search?q=rust"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_health_and_request_id() {
    let server = common::start_server(RouterConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "ok");

    let res = client
        .get(server.url("/health"))
        .header("x-request-id", "test-id-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "test-id-1");
}

#[tokio::test]
async fn test_admin_table_requires_token() {
    let mut config = common::config_with_overrides(&[("x", "https://x.example/{query}")]);
    config.admin.enabled = true;
    config.admin.api_key = "secret".to_string();
    let server = common::start_server(config).await;
    let client = common::client();

    let res = client.get(server.url("/admin/table")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(server.url("/admin/table"))
        .bearer_auth("wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(server.url("/admin/table"))
        .bearer_auth("secret")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let table: serde_json::Value = res.json().await.unwrap();
    assert_eq!(table["_b_x"], "3https://x.example/{query}");
    assert_eq!(table["_e"], "https://www.google.com/search?q={query}");
}

#[tokio::test]
async fn test_admin_hidden_when_disabled() {
    let server = common::start_server(RouterConfig::default()).await;

    let res = common::client()
        .get(server.url("/admin/table"))
        .bearer_auth("")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_config_update_swaps_table() {
    let server = common::start_server(common::config_with_overrides(&[(
        "x",
        "https://old.example/?q={query}",
    )]))
    .await;
    let client = common::client();

    server
        .updates
        .send(common::config_with_overrides(&[(
            "x",
            "https://new.example/?q={query}",
        )]))
        .unwrap();

    let mut location = String::new();
    for _ in 0..50 {
        let res = client.get(server.url("/search?q=%21x+a")).send().await.unwrap();
        location = common::location(&res);
        if location.starts_with("https://new.example") {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(location, "https://new.example/?q=a");
}
