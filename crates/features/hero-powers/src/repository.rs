//! `SQLite` access for the `hero_powers` join table.

use crate::error::{HeroPowersError, HeroPowersErrorExt};
use hhub_database::Database;
use hhub_domain::ValidationError;
use hhub_domain::entity::{Hero, HeroId, HeroPower, HeroPowerId, NewHeroPower, Power, PowerId};
use hhub_heroes::fetch_hero;
use hhub_powers::fetch_power;
use sqlx::FromRow;
use tracing::{debug, instrument};

#[derive(Debug, FromRow)]
struct HeroPowerRow {
    id: HeroPowerId,
    strength: String,
    hero_id: HeroId,
    power_id: PowerId,
}

impl TryFrom<HeroPowerRow> for HeroPower {
    type Error = ValidationError;

    fn try_from(row: HeroPowerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            strength: row.strength.parse()?,
            hero_id: row.hero_id,
            power_id: row.power_id,
        })
    }
}

/// A persisted hero-power with both ends loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedHeroPower {
    pub link: HeroPower,
    pub hero: Hero,
    pub power: Power,
}

/// Pool-backed repository held by the [`crate::HeroPowers`] slice.
#[derive(Debug, Clone)]
pub struct HeroPowerRepository {
    db: Database,
}

impl HeroPowerRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn find(&self, id: HeroPowerId) -> Result<Option<HeroPower>, HeroPowersError> {
        let row = sqlx::query_as::<_, HeroPowerRow>(
            "SELECT id, strength, hero_id, power_id FROM hero_powers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await
        .context("Loading hero-power")?;

        row.map(HeroPower::try_from).transpose().context("Stored hero-power violates field rules")
    }

    /// Links a hero to a power.
    ///
    /// Both ends are looked up inside the same transaction as the insert, so a
    /// missing hero or power aborts without writing anything.
    #[instrument(skip(self), fields(hero_id = new.hero_id, power_id = new.power_id))]
    pub async fn create(&self, new: NewHeroPower) -> Result<LinkedHeroPower, HeroPowersError> {
        let mut tx = self.db.begin_write().await.context("Creating hero-power")?;

        let hero = fetch_hero(&mut *tx, new.hero_id)
            .await?
            .ok_or(HeroPowersError::MissingHero { id: new.hero_id, context: None })?;
        let power = fetch_power(&mut *tx, new.power_id)
            .await?
            .ok_or(HeroPowersError::MissingPower { id: new.power_id, context: None })?;

        let row = sqlx::query_as::<_, HeroPowerRow>(
            "INSERT INTO hero_powers (strength, hero_id, power_id) VALUES (?, ?, ?) \
             RETURNING id, strength, hero_id, power_id",
        )
        .bind(new.strength.as_str())
        .bind(new.hero_id)
        .bind(new.power_id)
        .fetch_one(&mut *tx)
        .await
        .context("Inserting hero-power")?;

        tx.commit().await.context("Committing hero-power")?;

        let link = HeroPower::try_from(row).context("Inserted hero-power violates field rules")?;
        debug!(hero_power_id = link.id, "Hero-power created");
        Ok(LinkedHeroPower { link, hero, power })
    }
}
