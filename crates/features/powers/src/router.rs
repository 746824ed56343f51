use crate::handlers;
use hhub_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::list_powers))
        .routes(routes!(handlers::get_power, handlers::update_power))
}
