use crate::handlers;
use ncss_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `/convert/number` and `/convert/unit`.
pub fn convert_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::number_handler))
        .routes(routes!(handlers::unit_handler))
}
