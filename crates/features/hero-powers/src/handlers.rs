use crate::HeroPowers;
use axum::extract::State;
use axum::http::StatusCode;
use hhub_derive::{api_handler, api_model};
use hhub_domain::constants::HERO_POWERS_TAG;
use hhub_domain::entity::{HeroId, NewHeroPower, PowerId, Strength};
use hhub_domain::projection::HeroPowerView;
use hhub_kernel::server::{ApiError, ApiResult, ApiState, ErrorsBody, Json};
use tracing::info;

/// Body of `POST /hero_powers`. Every key is optional at the parsing stage so
/// each absence can be reported with the right status.
#[api_model(deny_unknown_fields = false)]
pub struct HeroPowerCreate {
    /// One of `Strong`, `Weak`, `Average`
    pub strength: Option<String>,
    pub hero_id: Option<HeroId>,
    pub power_id: Option<PowerId>,
}

#[api_handler(
    post,
    path = "/hero_powers",
    request_body = HeroPowerCreate,
    responses(
        (status = CREATED, description = "The new hero-power with its hero and power", body = HeroPowerView),
        (status = BAD_REQUEST, description = "Malformed body or missing ids", body = ErrorsBody),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid strength, unknown hero or power", body = ErrorsBody),
    ),
    tag = HERO_POWERS_TAG,
)]
pub async fn create_hero_power(
    State(state): State<ApiState>,
    Json(body): Json<HeroPowerCreate>,
) -> ApiResult<(StatusCode, Json<HeroPowerView>)> {
    let strength: Strength = body.strength.as_deref().unwrap_or_default().parse()?;

    let (Some(hero_id), Some(power_id)) = (body.hero_id, body.power_id) else {
        return Err(ApiError::malformed("Invalid request"));
    };

    let created = state
        .try_get_slice::<HeroPowers>()?
        .repository
        .create(NewHeroPower { strength, hero_id, power_id })
        .await?;

    info!(hero_power_id = created.link.id, hero_id, power_id, %strength, "Hero-power created");

    Ok((
        StatusCode::CREATED,
        Json(HeroPowerView::new(&created.link, &created.hero, &created.power)),
    ))
}
