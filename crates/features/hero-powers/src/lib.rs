//! Hero-powers feature slice: creation of hero/power links via `/hero_powers`.

mod error;
#[cfg(feature = "server")]
pub mod handlers;
pub mod repository;
#[cfg(feature = "server")]
mod router;

pub use crate::error::{HeroPowersError, HeroPowersErrorExt};
pub use crate::repository::{HeroPowerRepository, LinkedHeroPower};
#[cfg(feature = "server")]
pub use crate::router::router;

use hhub_database::Database;
use hhub_kernel::domain::registry::InitializedSlice;

/// Hero-powers feature state
#[hhub_derive::hhub_slice]
pub struct HeroPowers {
    pub repository: HeroPowerRepository,
}

pub fn init(database: &Database) -> Result<InitializedSlice, HeroPowersError> {
    let slice =
        HeroPowers::new(HeroPowersInner { repository: HeroPowerRepository::new(database.clone()) });

    tracing::info!("Hero-powers slice initialized");
    Ok(InitializedSlice::new(slice))
}
