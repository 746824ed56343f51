use hhub_database::DatabaseError;
use hhub_domain::ValidationError;
use hhub_domain::entity::{HeroId, PowerId};
use hhub_heroes::HeroesError;
use hhub_powers::PowersError;
use std::borrow::Cow;

/// A specialized [`HeroPowersError`] enum of this crate.
#[hhub_derive::hhub_error]
pub enum HeroPowersError {
    /// The referenced hero does not exist. Reported as a rule violation, not a 404.
    #[error("Hero not found{}", format_context(.context))]
    MissingHero { id: HeroId, context: Option<Cow<'static, str>> },

    #[error("Power not found{}", format_context(.context))]
    MissingPower { id: PowerId, context: Option<Cow<'static, str>> },

    #[error("Invalid hero-power{}: {source}", format_context(.context))]
    Validation { source: ValidationError, context: Option<Cow<'static, str>> },

    #[error("Hero lookup failed{}: {source}", format_context(.context))]
    Heroes { source: HeroesError, context: Option<Cow<'static, str>> },

    #[error("Power lookup failed{}: {source}", format_context(.context))]
    Powers { source: PowersError, context: Option<Cow<'static, str>> },

    #[error("Hero-power storage error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Hero-power query failed{}: {source}", format_context(.context))]
    Sqlx { source: sqlx::Error, context: Option<Cow<'static, str>> },
}

#[cfg(feature = "server")]
impl From<HeroPowersError> for hhub_kernel::server::ApiError {
    fn from(err: HeroPowersError) -> Self {
        match err {
            HeroPowersError::MissingHero { .. } => Self::validation("Hero not found"),
            HeroPowersError::MissingPower { .. } => Self::validation("Power not found"),
            HeroPowersError::Validation { source, .. } => source.into(),
            HeroPowersError::Heroes { source, .. } => source.into(),
            HeroPowersError::Powers { source, .. } => source.into(),
            HeroPowersError::Database { source, context } => Self::Database { source, context },
            HeroPowersError::Sqlx { source, context } => {
                Self::Database { source: source.into(), context }
            }
        }
    }
}
