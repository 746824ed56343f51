//! Response projections.
//!
//! One hand-written shape per entity per context. Embedded entities always use the
//! reduced form, so no projection reaches back into the entity that embeds it.

use crate::entity::{Hero, HeroId, HeroPower, HeroPowerId, Power, PowerId, Strength};
use hhub_derive::api_model;

/// Hero without relations. Used by list views and when embedded in a hero-power.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct HeroSummary {
    pub id: HeroId,
    pub name: String,
    pub super_name: String,
}

/// Hero with its derived list of powers.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct HeroDetail {
    pub id: HeroId,
    pub name: String,
    pub super_name: String,
    pub powers: Vec<PowerView>,
}

/// Power without its hero-powers.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct PowerView {
    pub id: PowerId,
    pub name: String,
    pub description: String,
}

/// Hero-power with its hero and power embedded one level deep.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct HeroPowerView {
    pub id: HeroPowerId,
    pub strength: Strength,
    pub hero_id: HeroId,
    pub power_id: PowerId,
    pub hero: HeroSummary,
    pub power: PowerView,
}

impl From<&Hero> for HeroSummary {
    fn from(hero: &Hero) -> Self {
        Self { id: hero.id, name: hero.name.clone(), super_name: hero.super_name.clone() }
    }
}

impl From<&Power> for PowerView {
    fn from(power: &Power) -> Self {
        Self { id: power.id, name: power.name.clone(), description: power.description().to_owned() }
    }
}

impl HeroDetail {
    /// Builds the detail view from a hero and the powers reached through its hero-powers.
    #[must_use]
    pub fn new(hero: &Hero, powers: &[Power]) -> Self {
        Self {
            id: hero.id,
            name: hero.name.clone(),
            super_name: hero.super_name.clone(),
            powers: powers.iter().map(PowerView::from).collect(),
        }
    }
}

impl HeroPowerView {
    #[must_use]
    pub fn new(link: &HeroPower, hero: &Hero, power: &Power) -> Self {
        Self {
            id: link.id,
            strength: link.strength,
            hero_id: link.hero_id,
            power_id: link.power_id,
            hero: hero.into(),
            power: power.into(),
        }
    }
}
