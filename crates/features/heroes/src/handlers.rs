use crate::Heroes;
use axum::extract::State;
use hhub_derive::api_handler;
use hhub_domain::constants::{HERO, HEROES_TAG};
use hhub_domain::entity::HeroId;
use hhub_domain::projection::{HeroDetail, HeroSummary};
use hhub_kernel::server::{ApiError, ApiResult, ApiState, ErrorBody, Json, Path};

#[api_handler(
    get,
    path = "/heroes",
    responses((status = OK, description = "Every hero, without powers", body = [HeroSummary])),
    tag = HEROES_TAG,
)]
pub async fn list_heroes(State(state): State<ApiState>) -> ApiResult<Json<Vec<HeroSummary>>> {
    let heroes = state.try_get_slice::<Heroes>()?.repository.list().await?;
    Ok(Json(heroes.iter().map(HeroSummary::from).collect()))
}

#[api_handler(
    get,
    path = "/heroes/{id}",
    params(("id" = i64, Path, description = "Hero id")),
    responses(
        (status = OK, description = "The hero with its powers", body = HeroDetail),
        (status = NOT_FOUND, description = "No such hero", body = ErrorBody),
    ),
    tag = HEROES_TAG,
)]
pub async fn get_hero(
    State(state): State<ApiState>,
    Path(id): Path<HeroId>,
) -> ApiResult<Json<HeroDetail>> {
    let (hero, powers) = state
        .try_get_slice::<Heroes>()?
        .repository
        .find_with_powers(id)
        .await?
        .ok_or(ApiError::not_found(HERO))?;

    Ok(Json(HeroDetail::new(&hero, &powers)))
}
