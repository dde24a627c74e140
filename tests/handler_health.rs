mod common;

use common::FakeUpstream;

#[tokio::test]
async fn test_health_with_upstream() {
    let upstream = FakeUpstream::start().await;
    let server = common::create_test_server(&common::config_with_upstream(&upstream));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["upstream"]["status"], "ok");
    assert_eq!(json["checks"]["proxy"]["status"], "ok");
    assert_eq!(json["checks"]["linkedin_oauth"]["status"], "disabled");
    assert_eq!(upstream.call_count(), 0);
}

#[tokio::test]
async fn test_health_without_upstream_is_degraded() {
    let server = common::create_test_server(&common::base_config());

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["upstream"]["status"], "disabled");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_never_exposes_api_key() {
    let upstream = FakeUpstream::start().await;
    let server = common::create_test_server(&common::config_with_upstream(&upstream));

    let response = server.get("/health").await;

    assert!(!response.text().contains(common::TEST_API_KEY));
}
