//! Failure injection tests for a forwarding tier.

use axum::http::StatusCode;
use paging_relay::config::TierRole;

mod common;

const QUERY: &str = "?page=1&pageSize=10&startDate=2024-01-01&endDate=2024-01-31";

#[tokio::test]
async fn test_downstream_404_passed_through() {
    let (backend, recorded) = common::start_mock_backend(404, "").await;
    let tier = common::spawn_tier(common::forwarding_config(TierRole::Business, backend)).await;

    let res = common::client()
        .get(tier.url(&format!("/api/profiles{}", QUERY)))
        .send()
        .await
        .expect("Tier unreachable");

    assert_eq!(res.status(), StatusCode::NOT_FOUND, "404 must not be remapped");
    assert!(res.text().await.unwrap().is_empty());
    assert_eq!(recorded.count(), 1, "exactly one downstream call, no retries");
}

#[tokio::test]
async fn test_downstream_errors_keep_their_status() {
    for status in [400u16, 401, 409, 500, 503] {
        let (backend, recorded) = common::start_mock_backend(status, r#"{"error":"nope"}"#).await;
        let tier = common::spawn_tier(common::forwarding_config(TierRole::Management, backend)).await;

        let res = common::client()
            .get(tier.url(&format!("/api/episodes{}", QUERY)))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), status);
        assert!(res.text().await.unwrap().is_empty(), "error bodies are not relayed");
        assert_eq!(recorded.count(), 1);
    }
}

#[tokio::test]
async fn test_unreachable_downstream_is_500() {
    let logs = common::capture_logs();
    let nowhere = common::unused_addr().await;
    let tier = common::spawn_tier(common::forwarding_config(TierRole::Business, nowhere)).await;

    let res = common::client()
        .get(tier.url(&format!("/api/episodes{}", QUERY)))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.text().await.unwrap().is_empty(), "no internal detail leaked");

    let attempted = format!("url=http://{}/api/episodes?page=1&pageSize=10&", nowhere);
    let lines = logs.lines();
    assert!(
        lines.iter().any(|line| line.contains("ERROR") && line.contains(&attempted)),
        "attempted URL not logged at error level: {:#?}",
        lines
    );
}

#[tokio::test]
async fn test_missing_start_date_never_forwards() {
    let (backend, recorded) = common::start_mock_backend(200, "[]").await;
    let tier = common::spawn_tier(common::forwarding_config(TierRole::Business, backend)).await;

    let res = common::client()
        .get(tier.url("/api/episodes?page=2&pageSize=50&endDate=2024-01-31"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "invalid date range");
    assert_eq!(recorded.count(), 0, "downstream must not be called");
}

#[tokio::test]
async fn test_missing_page_never_forwards() {
    let (backend, recorded) = common::start_mock_backend(200, "[]").await;
    let tier = common::spawn_tier(common::forwarding_config(TierRole::Business, backend)).await;

    let res = common::client()
        .get(tier.url("/api/episodes?startDate=2024-01-01&endDate=2024-01-31"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "invalid page");
    assert_eq!(recorded.count(), 0);
}

#[tokio::test]
async fn test_unparseable_page_never_forwards() {
    let (backend, recorded) = common::start_mock_backend(200, "[]").await;
    let tier = common::spawn_tier(common::forwarding_config(TierRole::Management, backend)).await;

    let res = common::client()
        .get(tier.url("/api/profiles?page=first&startDate=2024-01-01&endDate=2024-01-31"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "invalid page");
    assert_eq!(recorded.count(), 0);
}

#[tokio::test]
async fn test_every_tier_clamps_the_same_way() {
    for role in [TierRole::Business, TierRole::Management] {
        let (backend, recorded) = common::start_mock_backend(200, "[]").await;
        let tier = common::spawn_tier(common::forwarding_config(role, backend)).await;

        let res = common::client()
            .get(tier.url("/api/episodes?page=-4&pageSize=90000&startDate=2024-01-01&endDate=2024-01-02"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let target = &recorded.all()[0].target;
        assert!(target.contains("page=1&pageSize=5000&"), "{} forwarded {}", role, target);
    }
}
