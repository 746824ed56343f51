//! Powers feature slice: repository, handlers and routes for `/powers`.

mod error;
#[cfg(feature = "server")]
pub mod handlers;
pub mod repository;
#[cfg(feature = "server")]
mod router;

pub use crate::error::{PowersError, PowersErrorExt};
pub use crate::repository::{PowerRepository, fetch_power};
#[cfg(feature = "server")]
pub use crate::router::router;

use hhub_database::Database;
use hhub_kernel::domain::registry::InitializedSlice;

/// Powers feature state
#[hhub_derive::hhub_slice]
pub struct Powers {
    pub repository: PowerRepository,
}

/// Builds the slice around the shared pool.
pub fn init(database: &Database) -> Result<InitializedSlice, PowersError> {
    let slice = Powers::new(PowersInner { repository: PowerRepository::new(database.clone()) });

    tracing::info!("Powers slice initialized");
    Ok(InitializedSlice::new(slice))
}
