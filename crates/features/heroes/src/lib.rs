//! Heroes feature slice: repository, handlers and routes for `/heroes`.
//!
//! A hero's powers are never stored on the hero; they are read through
//! `hero_powers` whenever the detail view is requested.

mod error;
#[cfg(feature = "server")]
pub mod handlers;
pub mod repository;
#[cfg(feature = "server")]
mod router;

pub use crate::error::{HeroesError, HeroesErrorExt};
pub use crate::repository::{HeroRepository, fetch_hero};
#[cfg(feature = "server")]
pub use crate::router::router;

use hhub_database::Database;
use hhub_kernel::domain::registry::InitializedSlice;

/// Heroes feature state
#[hhub_derive::hhub_slice]
pub struct Heroes {
    pub repository: HeroRepository,
}

pub fn init(database: &Database) -> Result<InitializedSlice, HeroesError> {
    let slice = Heroes::new(HeroesInner { repository: HeroRepository::new(database.clone()) });

    tracing::info!("Heroes slice initialized");
    Ok(InitializedSlice::new(slice))
}
