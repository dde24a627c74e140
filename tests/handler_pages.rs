mod common;

use common::FakeUpstream;

#[tokio::test]
async fn test_index_lists_connect_link() {
    let upstream = FakeUpstream::start().await;
    let server = common::create_test_server(&common::config_with_upstream(&upstream));

    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("/connect/linkedin"));
    assert!(!html.contains("UNIPILE_DSN"));
}

#[tokio::test]
async fn test_index_warns_when_not_configured() {
    let server = common::create_test_server(&common::base_config());

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("UNIPILE_DSN"));
}

#[tokio::test]
async fn test_success_page_greets_by_name() {
    let server = common::create_test_server(&common::base_config());

    let response = server
        .get("/success")
        .add_query_param("name", "Ada Lovelace")
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("Ada Lovelace"));
}

#[tokio::test]
async fn test_success_page_escapes_name() {
    let server = common::create_test_server(&common::base_config());

    let response = server
        .get("/success")
        .add_query_param("name", "<script>alert(1)</script>")
        .await;

    response.assert_status_ok();
    assert!(!response.text().contains("<script>"));
}

#[tokio::test]
async fn test_failure_page_shows_error_code() {
    let server = common::create_test_server(&common::base_config());

    let response = server
        .get("/failure")
        .add_query_param("error", "access_denied")
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("access_denied"));
}

#[tokio::test]
async fn test_pages_without_query() {
    let server = common::create_test_server(&common::base_config());

    server.get("/success").await.assert_status_ok();
    server.get("/failure").await.assert_status_ok();
}

#[tokio::test]
async fn test_static_fallback() {
    let server = common::create_test_server(&common::base_config());

    server.get("/styles.css").await.assert_status_ok();
    server.get("/missing.txt").await.assert_status_not_found();
}
