use hhub_database::DatabaseError;
use hhub_domain::ValidationError;
use hhub_domain::entity::PowerId;
use std::borrow::Cow;

/// A specialized [`PowersError`] enum of this crate.
#[hhub_derive::hhub_error]
pub enum PowersError {
    #[error("Power {id} not found{}", format_context(.context))]
    NotFound { id: PowerId, context: Option<Cow<'static, str>> },

    /// A field rule rejected the change; nothing was written.
    #[error("Invalid power{}: {source}", format_context(.context))]
    Validation { source: ValidationError, context: Option<Cow<'static, str>> },

    #[error("Power storage error{}: {source}", format_context(.context))]
    Database { source: DatabaseError, context: Option<Cow<'static, str>> },

    #[error("Power query failed{}: {source}", format_context(.context))]
    Sqlx { source: sqlx::Error, context: Option<Cow<'static, str>> },
}

#[cfg(feature = "server")]
impl From<PowersError> for hhub_kernel::server::ApiError {
    fn from(err: PowersError) -> Self {
        match err {
            PowersError::NotFound { .. } => Self::not_found(hhub_domain::constants::POWER),
            PowersError::Validation { source, .. } => source.into(),
            PowersError::Database { source, context } => Self::Database { source, context },
            PowersError::Sqlx { source, context } => {
                Self::Database { source: source.into(), context }
            }
        }
    }
}
