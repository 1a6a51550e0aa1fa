use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use ncss_server::Server;
use serde_json::Value;
use tower::ServiceExt;

fn app() -> Router {
    Server::builder().build().expect("server").router()
}

async fn get(uri: &str) -> Response {
    app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("infallible router")
}

async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.expect("body").to_bytes().to_vec()
}

#[tokio::test]
async fn root_redirects_to_docs() {
    let response = get("/").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/docs");
}

#[tokio::test]
async fn docs_are_served() {
    let response = get("/docs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await).expect("utf-8 page");
    assert!(html.contains("<html"), "{html}");
}

#[tokio::test]
async fn spec_lists_both_endpoints() {
    let response = get("/api/spec").await;
    assert_eq!(response.status(), StatusCode::OK);

    let spec: Value = serde_json::from_slice(&body_bytes(response).await).expect("json spec");
    assert_eq!(spec["info"]["title"], "NCSS APIs");
    assert_eq!(spec["info"]["version"], "1.0");
    assert!(spec["paths"]["/convert/number"]["get"].is_object());
    assert!(spec["paths"]["/convert/unit"]["get"].is_object());
    assert!(spec["paths"]["/health"]["get"].is_object());
}

#[tokio::test]
async fn health_is_not_cached() {
    let response = get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store, no-cache, must-revalidate");

    let health: Value = serde_json::from_slice(&body_bytes(response).await).expect("json health");
    assert_eq!(health["status"], "up");
}

#[tokio::test]
async fn conversions_are_mounted() {
    let response = get("/convert/unit?quantity=3.14&unit=km&to=m").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"3140.0 meter");

    let response = get("/convert/number?value=11&to=rank").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"eleventh");
}

#[tokio::test]
async fn extra_units_can_be_defined_at_build_time() {
    let app = Server::builder().define_unit("smoot = 1.7018 * m = smoot").build().expect("server").router();
    let response = app
        .oneshot(Request::builder().uri("/convert/unit?quantity=1&unit=smoot&to=m").body(Body::empty()).expect("request"))
        .await
        .expect("infallible router");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"1.7018 meter");
}

#[test]
fn invalid_unit_definition_fails_build() {
    let err = Server::builder().define_unit("tims = 3 * m").build().expect_err("tims redefined");
    assert!(err.to_string().contains("Platform bootstrap failed"), "{err}");
}
