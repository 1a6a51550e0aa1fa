use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use ncss::domain::constants::{API_TITLE, API_VERSION};
use ncss::kernel::server::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

pub(crate) const DOCS_PATH: &str = "/docs";
pub(crate) const SPEC_PATH: &str = "/api/spec";

#[derive(OpenApi)]
struct ApiDoc;

async fn docs_redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, DOCS_PATH)])
}

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let mut api = ApiDoc::openapi();
    api.info.title = API_TITLE.to_owned();
    api.info.version = API_VERSION.to_owned();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(ncss::server::router::system_router())
        .merge(ncss::server::router::feature_router())
        .with_state(state)
        .split_for_parts();

    let spec = Json(api_doc.clone());
    let scalar_routes = Scalar::with_url(DOCS_PATH, api_doc);

    Router::new()
        .route("/", get(docs_redirect))
        .route(SPEC_PATH, get(move || async move { spec }))
        .merge(openapi_routes)
        .merge(scalar_routes)
        .layer(TraceLayer::new_for_http())
}
