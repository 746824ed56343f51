use hhub_database::DatabaseError;
use hhub_domain::ValidationError;
use hhub_domain::entity::HeroId;
use std::borrow::Cow;

/// A specialized [`HeroesError`] enum of this crate.
#[hhub_derive::hhub_error]
pub enum HeroesError {
    #[error("Hero {id} not found{}", format_context(.context))]
    NotFound { id: HeroId, context: Option<Cow<'static, str>> },

    #[error("Invalid hero data{}: {source}", format_context(.context))]
    Validation { source: ValidationError, context: Option<Cow<'static, str>> },

    #[error("Hero storage error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Hero query failed{}: {source}", format_context(.context))]
    Sqlx { source: sqlx::Error, context: Option<Cow<'static, str>> },
}

#[cfg(feature = "server")]
impl From<HeroesError> for hhub_kernel::server::ApiError {
    fn from(err: HeroesError) -> Self {
        match err {
            HeroesError::NotFound { .. } => Self::not_found(hhub_domain::constants::HERO),
            HeroesError::Validation { source, .. } => source.into(),
            HeroesError::Database { source, context } => Self::Database { source, context },
            HeroesError::Sqlx { source, context } => {
                Self::Database { source: source.into(), context }
            }
        }
    }
}
