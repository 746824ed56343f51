//! # Domain Models
//!
//! Pure domain types for `HeroHub`: the three entities, their field rules, the response
//! projections built from them, and the typed configuration tree.
//! Keep it lean: no I/O, networking, or persistence here.

pub mod config;
pub mod constants;
pub mod entity;
pub mod projection;
pub mod registry;
pub mod validation;

pub use entity::{Hero, HeroPower, NewHero, NewHeroPower, NewPower, Power, Strength};
pub use validation::{Description, ValidationError};
