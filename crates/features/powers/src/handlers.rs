use crate::Powers;
use axum::extract::State;
use hhub_derive::{api_handler, api_model};
use hhub_domain::constants::{POWER, POWERS_TAG};
use hhub_domain::entity::PowerId;
use hhub_domain::projection::PowerView;
use hhub_kernel::server::{ApiError, ApiResult, ApiState, ErrorBody, ErrorsBody, Json, Path};
use tracing::info;

/// Partial update of a power. Only `description` can change.
#[api_model(deny_unknown_fields = false)]
pub struct PowerPatch {
    pub description: Option<String>,
}

#[api_handler(
    get,
    path = "/powers",
    responses((status = OK, description = "Every power", body = [PowerView])),
    tag = POWERS_TAG,
)]
pub async fn list_powers(State(state): State<ApiState>) -> ApiResult<Json<Vec<PowerView>>> {
    let powers = state.try_get_slice::<Powers>()?.repository.list().await?;
    Ok(Json(powers.iter().map(PowerView::from).collect()))
}

#[api_handler(
    get,
    path = "/powers/{id}",
    params(("id" = i64, Path, description = "Power id")),
    responses(
        (status = OK, description = "The power", body = PowerView),
        (status = NOT_FOUND, description = "No such power", body = ErrorBody),
    ),
    tag = POWERS_TAG,
)]
pub async fn get_power(
    State(state): State<ApiState>,
    Path(id): Path<PowerId>,
) -> ApiResult<Json<PowerView>> {
    let power = state
        .try_get_slice::<Powers>()?
        .repository
        .find(id)
        .await?
        .ok_or(ApiError::not_found(POWER))?;

    Ok(Json(PowerView::from(&power)))
}

#[api_handler(
    patch,
    path = "/powers/{id}",
    params(("id" = i64, Path, description = "Power id")),
    request_body = PowerPatch,
    responses(
        (status = OK, description = "The updated power", body = PowerView),
        (status = BAD_REQUEST, description = "No description given", body = ErrorsBody),
        (status = NOT_FOUND, description = "No such power", body = ErrorBody),
        (status = UNPROCESSABLE_ENTITY, description = "Description too short", body = ErrorsBody),
    ),
    tag = POWERS_TAG,
)]
pub async fn update_power(
    State(state): State<ApiState>,
    Path(id): Path<PowerId>,
    patch: Result<Json<PowerPatch>, ApiError>,
) -> ApiResult<Json<PowerView>> {
    let repository = &state.try_get_slice::<Powers>()?.repository;

    // An unknown power is reported before the body is inspected.
    if repository.find(id).await?.is_none() {
        return Err(ApiError::not_found(POWER));
    }
    let Json(patch) = patch?;
    let Some(description) = patch.description else {
        return Err(ApiError::malformed("Invalid request"));
    };

    let power = repository.update_description(id, description).await?;
    info!(power_id = id, "Power description updated");

    Ok(Json(PowerView::from(&power)))
}
