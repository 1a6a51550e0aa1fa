use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use ncss_convert::convert_router;
use ncss_kernel::domain::config::ApiConfig;
use ncss_kernel::server::ApiState;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let config = ApiConfig::default();
    let slice = ncss_convert::init(&config).expect("convert slice");
    let state = ApiState::builder().config(config).register_slice(slice).build().expect("state");

    let (router, _api) = convert_router().split_for_parts();
    router.with_state(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("infallible router");

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = response.into_body().collect().await.expect("body").to_bytes().to_vec();
    (status, content_type, body)
}

async fn get_text(uri: &str) -> (StatusCode, String) {
    let (status, content_type, body) = get(app(), uri).await;
    assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"), "{uri}");
    (status, String::from_utf8(body).expect("utf-8 body"))
}

async fn get_error(uri: &str) -> (StatusCode, Value) {
    let (status, content_type, body) = get(app(), uri).await;
    assert_eq!(content_type.as_deref(), Some("application/json"), "{uri}");
    (status, serde_json::from_slice(&body).expect("json error body"))
}

#[tokio::test]
async fn number_to_words() {
    assert_eq!(get_text("/convert/number?value=11").await, (StatusCode::OK, "eleven".to_owned()));
    assert_eq!(get_text("/convert/number?value=11&to=words").await, (StatusCode::OK, "eleven".to_owned()));
}

#[tokio::test]
async fn number_to_rank() {
    assert_eq!(get_text("/convert/number?value=11&to=rank").await, (StatusCode::OK, "eleventh".to_owned()));
}

#[tokio::test]
async fn words_to_number() {
    assert_eq!(get_text("/convert/number?value=eleven&to=number").await, (StatusCode::OK, "11".to_owned()));
}

#[tokio::test]
async fn number_errors() {
    let cases = [
        ("/convert/number", "value to convert is required"),
        ("/convert/number?value=", "value to convert is required"),
        ("/convert/number?to=rank", "value to convert is required"),
        ("/convert/number?value=11&to=roman", "unknown 'to' value"),
        ("/convert/number?value=11&to=", "unknown 'to' value"),
        ("/convert/number?value=abc", "Invalid number to convert to words"),
        ("/convert/number?value=abc&to=rank", "Invalid number to convert to rank"),
        ("/convert/number?value=banana&to=number", "Invalid number word to convert to number"),
    ];

    for (uri, message) in cases {
        let (status, body) = get_error(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({ "error": 400, "message": message }), "{uri}");
    }
}

#[tokio::test]
async fn unknown_query_parameters_are_ignored() {
    assert_eq!(
        get_text("/convert/number?value=11&lang=fr").await,
        (StatusCode::OK, "eleven".to_owned())
    );
}

#[tokio::test]
async fn unit_conversion() {
    assert_eq!(
        get_text("/convert/unit?quantity=3.14&unit=km&to=m").await,
        (StatusCode::OK, "3140.0 meter".to_owned())
    );
    assert_eq!(
        get_text("/convert/unit?quantity=1&unit=tims&to=m").await,
        (StatusCode::OK, "1.5 meter".to_owned())
    );
    assert_eq!(
        get_text("/convert/unit?quantity=2&unit=km%2Fs&to=m%2Fs").await,
        (StatusCode::OK, "2000.0 meter/second".to_owned())
    );
}

#[tokio::test]
async fn unit_missing_parameters() {
    let cases = [
        ("/convert/unit", "No quantity parameter given"),
        ("/convert/unit?quantity=&unit=m&to=km", "No quantity parameter given"),
        ("/convert/unit?quantity=1", "No unit parameter given"),
        ("/convert/unit?quantity=1&unit=m", "No to parameter given"),
        ("/convert/unit?quantity=1&unit=m&to=", "No to parameter given"),
        ("/convert/unit?quantity=abc&unit=m&to=km", "Quantity 'abc' is invalid"),
    ];

    for (uri, message) in cases {
        let (status, body) = get_error(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({ "error": 400, "message": message }), "{uri}");
    }
}

#[tokio::test]
async fn repeated_parameters_use_the_first_value() {
    assert_eq!(get_text("/convert/number?value=1&value=2").await, (StatusCode::OK, "one".to_owned()));
    assert_eq!(
        get_text("/convert/unit?quantity=2&quantity=x&unit=km&to=m&unit=s").await,
        (StatusCode::OK, "2000.0 meter".to_owned())
    );

    let (status, body) = get_error("/convert/number?value=1&to=roman&to=rank").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": 400, "message": "unknown 'to' value" }));
}

#[tokio::test]
async fn hostile_unit_expressions_get_json_errors() {
    let deep = "-".repeat(20_000);
    let (status, body) = get_error(&format!("/convert/unit?quantity=1&unit={deep}m&to=m")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);

    let (status, body) = get_error("/convert/unit?quantity=1&unit=m**2147483647%20*%20m&to=m").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Unit 'm**2147483647 * m' not found");
}

#[tokio::test]
async fn unit_not_found() {
    let (status, body) = get_error("/convert/unit?quantity=1&unit=bogus&to=m").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": 404, "message": "Unit 'bogus' not found" }));

    let (status, body) = get_error("/convert/unit?quantity=1&unit=m&to=bogus").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Unit 'bogus' not found");
}

#[tokio::test]
async fn incompatible_units() {
    let (status, body) = get_error("/convert/unit?quantity=1&unit=m&to=s").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": 400, "message": "Cannot convert from m to s" }));
}

#[tokio::test]
async fn missing_slice_is_an_internal_error() {
    let state = ApiState::builder().config(ApiConfig::default()).build().expect("state without slices");
    let (router, _api) = convert_router().split_for_parts();

    let (status, _, body) = get(router.with_state(state), "/convert/unit?quantity=1&unit=m&to=km").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = serde_json::from_slice(&body).expect("json error body");
    assert_eq!(body, json!({ "error": 500, "message": "Internal server error" }));
}
