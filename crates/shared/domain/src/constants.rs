//! Shared string constants: `OpenAPI` tags and entity labels used in error bodies.

pub const SYSTEM_TAG: &str = "System";
pub const HEROES_TAG: &str = "Heroes";
pub const POWERS_TAG: &str = "Powers";
pub const HERO_POWERS_TAG: &str = "Hero Powers";

pub const HERO: &str = "Hero";
pub const POWER: &str = "Power";
