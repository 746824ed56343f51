//! `SQLite` access for the `heroes` table and the powers reached through `hero_powers`.

use crate::error::{HeroesError, HeroesErrorExt};
use hhub_database::Database;
use hhub_domain::entity::{Hero, HeroId, NewHero, Power};
use hhub_powers::repository::{POWER_COLUMNS, PowerRow};
use sqlx::{FromRow, SqliteExecutor};
use tracing::{debug, instrument};

#[derive(Debug, FromRow)]
struct HeroRow {
    id: HeroId,
    name: String,
    super_name: String,
}

impl From<HeroRow> for Hero {
    fn from(row: HeroRow) -> Self {
        Self { id: row.id, name: row.name, super_name: row.super_name }
    }
}

/// Loads one hero by primary key.
pub async fn fetch_hero<'e, E>(executor: E, id: HeroId) -> Result<Option<Hero>, HeroesError>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, HeroRow>("SELECT id, name, super_name FROM heroes WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
        .context("Loading hero")?;

    Ok(row.map(Hero::from))
}

/// Pool-backed repository held by the [`crate::Heroes`] slice.
#[derive(Debug, Clone)]
pub struct HeroRepository {
    db: Database,
}

impl HeroRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// All heroes in insertion order.
    pub async fn list(&self) -> Result<Vec<Hero>, HeroesError> {
        let rows = sqlx::query_as::<_, HeroRow>(
            "SELECT id, name, super_name FROM heroes ORDER BY id",
        )
        .fetch_all(self.db.pool())
        .await
        .context("Listing heroes")?;

        Ok(rows.into_iter().map(Hero::from).collect())
    }

    pub async fn find(&self, id: HeroId) -> Result<Option<Hero>, HeroesError> {
        fetch_hero(self.db.pool(), id).await
    }

    /// The powers linked to a hero, one per hero-power, in link order.
    ///
    /// A power linked twice appears twice.
    pub async fn powers_of(&self, id: HeroId) -> Result<Vec<Power>, HeroesError> {
        let rows = sqlx::query_as::<_, PowerRow>(&format!(
            "SELECT {POWER_COLUMNS} FROM hero_powers \
             JOIN powers ON powers.id = hero_powers.power_id \
             WHERE hero_powers.hero_id = ? ORDER BY hero_powers.id"
        ))
        .bind(id)
        .fetch_all(self.db.pool())
        .await
        .context("Loading powers of hero")?;

        rows.into_iter()
            .map(Power::try_from)
            .collect::<Result<_, _>>()
            .context("Stored power violates field rules")
    }

    /// A hero together with its derived powers.
    pub async fn find_with_powers(
        &self,
        id: HeroId,
    ) -> Result<Option<(Hero, Vec<Power>)>, HeroesError> {
        let Some(hero) = self.find(id).await? else {
            return Ok(None);
        };
        let powers = self.powers_of(id).await?;
        Ok(Some((hero, powers)))
    }

    #[instrument(skip(self, hero), fields(super_name = %hero.super_name))]
    pub async fn create(&self, hero: NewHero) -> Result<Hero, HeroesError> {
        let row = sqlx::query_as::<_, HeroRow>(
            "INSERT INTO heroes (name, super_name) VALUES (?, ?) RETURNING id, name, super_name",
        )
        .bind(&hero.name)
        .bind(&hero.super_name)
        .fetch_one(self.db.pool())
        .await
        .context("Inserting hero")?;

        debug!(hero_id = row.id, "Hero created");
        Ok(row.into())
    }

    /// Deletes a hero and every hero-power that references it.
    ///
    /// Returns `false` when no such hero exists.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: HeroId) -> Result<bool, HeroesError> {
        let mut tx = self.db.begin_write().await.context("Deleting hero")?;

        let links = sqlx::query("DELETE FROM hero_powers WHERE hero_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Deleting hero-powers of hero")?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM heroes WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Deleting hero")?
            .rows_affected()
            > 0;

        tx.commit().await.context("Committing hero delete")?;

        debug!(hero_id = id, links, deleted, "Hero delete finished");
        Ok(deleted)
    }
}
