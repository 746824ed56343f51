//! Facade crate for `HeroHub` slices and shared modules.
//! Re-exports domain/kernel primitives and aggregates slice initialization and routing.
//! Keep this crate thin: it should compose other crates, not implement business logic.

use hhub_database::Database;
pub use hhub_domain as domain;
pub use hhub_kernel as kernel;
use std::borrow::Cow;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use hhub_kernel::server::router::system_router;
        use hhub_kernel::server::ApiState;
        use utoipa_axum::router::OpenApiRouter;

        /// Every slice's routes merged into one documented router.
        pub fn api_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new()
                .merge(crate::features::heroes::router())
                .merge(crate::features::powers::router())
                .merge(crate::features::hero_powers::router())
        }
    }
}

/// Feature slices compiled into this build.
pub mod features {
    pub use hhub_hero_powers as hero_powers;
    pub use hhub_heroes as heroes;
    pub use hhub_powers as powers;
}

/// A slice failed to initialize.
#[hhub_derive::hhub_error]
pub enum InitError {
    #[error("Powers slice failed{}: {source}", format_context(.context))]
    Powers { source: features::powers::PowersError, context: Option<Cow<'static, str>> },
    #[error("Heroes slice failed{}: {source}", format_context(.context))]
    Heroes { source: features::heroes::HeroesError, context: Option<Cow<'static, str>> },
    #[error("Hero-powers slice failed{}: {source}", format_context(.context))]
    HeroPowers {
        source: features::hero_powers::HeroPowersError,
        context: Option<Cow<'static, str>>,
    },
}

/// Initializes every slice against the shared pool.
///
/// # Errors
/// Returns the first slice failure.
pub fn init(database: &Database) -> Result<Vec<domain::registry::InitializedSlice>, InitError> {
    Ok(vec![
        features::powers::init(database)?,
        features::heroes::init(database)?,
        features::hero_powers::init(database)?,
    ])
}
