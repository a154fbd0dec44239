use axum::http::StatusCode;
use axum_test::TestServer;
use limelight_preview::config::AppConfig;
use limelight_preview::http::{router, AppState};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

const TEMPLATE: &str = include_str!("./fixtures/article.html");

fn test_state(backend_url: &str, public_origin: &str) -> AppState {
    let config = AppConfig {
        supabase_url: backend_url.to_string(),
        supabase_service_key: "service-key".to_string(),
        public_origin: Some(public_origin.to_string()),
        assets_base_url: Some(backend_url.to_string()),
    };

    AppState::new(&config)
}

fn article_body() -> String {
    json!({
        "title": "Hi \"There\"",
        "excerpt": "An excerpt",
        "image_url": "https://cdn.example/img.png",
        "authors": {"full_name": "Jane Doe"}
    })
    .to_string()
}

async fn mock_article(server: &mut ServerGuard, slug: &str, body: &str) -> Mock {
    server
        .mock("GET", "/rest/v1/posts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("slug".into(), format!("eq.{slug}")),
            Matcher::UrlEncoded(
                "select".into(),
                "title,excerpt,image_url,authors(full_name)".into(),
            ),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn mock_template(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/article.html")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(TEMPLATE)
        .create_async()
        .await
}

#[tokio::test]
async fn test_article_page_carries_injected_metadata() {
    let mut backend = Server::new_async().await;
    let article = mock_article(&mut backend, "hi-there", &article_body()).await;
    let template = mock_template(&mut backend).await;

    let server = TestServer::new(router(test_state(&backend.url(), "https://host"))).unwrap();
    let response = server.get("/article/hi-there").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.header("content-type"),
        "text/html;charset=UTF-8"
    );

    let html = response.text();
    assert!(html.contains("<title>Hi &quot;There&quot; | The Limelight</title>"));
    assert!(html.contains(r#"<meta name="description" content="An excerpt" />"#));
    assert!(html.contains(r#"<meta name="author" content="Jane Doe" />"#));
    assert!(html.contains(r#"<meta property="og:url" content="https://host/article/hi-there" />"#));
    assert!(html.contains(r#"<meta property="twitter:image" content="https://cdn.example/img.png" />"#));

    article.assert_async().await;
    template.assert_async().await;
}

#[tokio::test]
async fn test_template_is_fetched_once_across_requests() {
    let mut backend = Server::new_async().await;
    mock_article(&mut backend, "hi-there", &article_body()).await;
    let template = mock_template(&mut backend).await;

    let server = TestServer::new(router(test_state(&backend.url(), "https://host"))).unwrap();

    server.get("/article/hi-there").await.assert_status_ok();
    server.get("/article/hi-there").await.assert_status_ok();

    template.assert_async().await;
}

#[tokio::test]
async fn test_multi_segment_path_uses_first_segment_as_slug() {
    let mut backend = Server::new_async().await;
    mock_article(&mut backend, "hi-there", &article_body()).await;
    mock_template(&mut backend).await;

    let server = TestServer::new(router(test_state(&backend.url(), "https://host"))).unwrap();
    let response = server.get("/article/hi-there/extra/segments").await;

    response.assert_status(StatusCode::OK);
    assert!(response
        .text()
        .contains(r#"<meta property="og:url" content="https://host/article/hi-there" />"#));
}

#[tokio::test]
async fn test_missing_slug_is_rejected_without_backend_calls() {
    let mut backend = Server::new_async().await;
    let untouched = backend
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let server = TestServer::new(router(test_state(&backend.url(), "https://host"))).unwrap();

    let response = server.get("/article").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_text("Article slug is missing.");

    let response = server.get("/article/").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_text("Article slug is missing.");

    let response = server.get("/article//x").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_text("Article slug is missing.");

    untouched.assert_async().await;
}

#[tokio::test]
async fn test_unknown_article_redirects_to_site_root() {
    let mut backend = Server::new_async().await;
    backend
        .mock("GET", "/rest/v1/posts")
        .match_query(Matcher::Any)
        .with_status(406)
        .with_body(r#"{"message":"JSON object requested, multiple (or no) rows returned"}"#)
        .create_async()
        .await;

    let server = TestServer::new(router(test_state(&backend.url(), "https://host"))).unwrap();
    let response = server.get("/article/ghost").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://host/");
}

#[tokio::test]
async fn test_backend_error_redirects_to_site_root() {
    let mut backend = Server::new_async().await;
    backend
        .mock("GET", "/rest/v1/posts")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let server = TestServer::new(router(test_state(&backend.url(), "https://host"))).unwrap();
    let response = server.get("/article/hi-there").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://host/");
}

#[tokio::test]
async fn test_backend_outage_redirects_to_site_root() {
    // Bind a server just to reserve a dead address, then drop it.
    let backend_url = {
        let server = Server::new_async().await;
        server.url()
    };

    let server = TestServer::new(router(test_state(&backend_url, "https://host"))).unwrap();
    let response = server.get("/article/hi-there").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://host/");
}

#[tokio::test]
async fn test_template_failure_is_an_internal_error() {
    let mut backend = Server::new_async().await;
    mock_article(&mut backend, "hi-there", &article_body()).await;
    backend
        .mock("GET", "/article.html")
        .with_status(404)
        .create_async()
        .await;

    let server = TestServer::new(router(test_state(&backend.url(), "https://host"))).unwrap();
    let response = server.get("/article/hi-there").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_text("An internal error occurred while processing the article.");
}

#[tokio::test]
async fn test_failed_template_fetch_is_retried_on_next_request() {
    let mut backend = Server::new_async().await;
    mock_article(&mut backend, "hi-there", &article_body()).await;
    let broken = backend
        .mock("GET", "/article.html")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let server = TestServer::new(router(test_state(&backend.url(), "https://host"))).unwrap();
    server
        .get("/article/hi-there")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    // Newest mock wins, so the repaired asset host answers from here on.
    let fixed = mock_template(&mut backend).await;
    let response = server.get("/article/hi-there").await;

    response.assert_status(StatusCode::OK);
    broken.assert_async().await;
    fixed.assert_async().await;
}

#[tokio::test]
async fn test_malformed_record_is_an_internal_error() {
    let mut backend = Server::new_async().await;
    let body = json!({
        "title": "Orphaned",
        "excerpt": "No author row",
        "image_url": null,
        "authors": null
    })
    .to_string();
    mock_article(&mut backend, "orphan", &body).await;

    let server = TestServer::new(router(test_state(&backend.url(), "https://host"))).unwrap();
    let response = server.get("/article/orphan").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_text("An internal error occurred while processing the article.");
}
