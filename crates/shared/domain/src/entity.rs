//! The entity model: heroes, powers and the hero-power association between them.
//!
//! Relationships are plain foreign-key fields. Derived views such as a hero's powers
//! are built by the data-access layer, never stored on the entity.

use crate::validation::{Description, STRENGTHS, ValidationError, validate_required};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type HeroId = i64;
pub type PowerId = i64;
pub type HeroPowerId = i64;

/// A character with a civilian name and a super name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    pub super_name: String,
}

/// An ability. Its description is kept valid by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Power {
    pub id: PowerId,
    pub name: String,
    description: Description,
}

impl Power {
    pub fn new(
        id: PowerId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_required("name", &name)?;
        Ok(Self { id, name, description: Description::parse(description)? })
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the description. On error the current value is left as it was.
    pub fn set_description(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        self.description = Description::parse(value)?;
        Ok(())
    }
}

/// Rating of a hero-power association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl Strength {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => STRENGTHS[0],
            Self::Weak => STRENGTHS[1],
            Self::Average => STRENGTHS[2],
        }
    }
}

impl FromStr for Strength {
    type Err = ValidationError;

    /// Exact, case-sensitive match against the three literals.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Strong" => Ok(Self::Strong),
            "Weak" => Ok(Self::Weak),
            "Average" => Ok(Self::Average),
            other => Err(ValidationError::InvalidStrength { value: other.to_owned() }),
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join entity between [`Hero`] and [`Power`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPower {
    pub id: HeroPowerId,
    pub strength: Strength,
    pub hero_id: HeroId,
    pub power_id: PowerId,
}

impl HeroPower {
    /// Parses and assigns a strength. On error the current value is left as it was.
    pub fn set_strength(&mut self, value: &str) -> Result<(), ValidationError> {
        self.strength = value.parse()?;
        Ok(())
    }
}

/// A hero that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHero {
    pub name: String,
    pub super_name: String,
}

impl NewHero {
    pub fn new(
        name: impl Into<String>,
        super_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let (name, super_name) = (name.into(), super_name.into());
        validate_required("name", &name)?;
        validate_required("super_name", &super_name)?;
        Ok(Self { name, super_name })
    }
}

/// A power that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPower {
    pub name: String,
    pub description: Description,
}

impl NewPower {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_required("name", &name)?;
        Ok(Self { name, description: Description::parse(description)? })
    }
}

/// A hero-power association that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewHeroPower {
    pub strength: Strength,
    pub hero_id: HeroId,
    pub power_id: PowerId,
}

impl NewHeroPower {
    pub fn new(strength: &str, hero_id: HeroId, power_id: PowerId) -> Result<Self, ValidationError> {
        Ok(Self { strength: strength.parse()?, hero_id, power_id })
    }
}
