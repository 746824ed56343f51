//! `SQLite` access for the `powers` table.
//!
//! Free functions take any executor so other slices can run them inside their own
//! transactions; [`PowerRepository`] wraps them for the pool.

use crate::error::{PowersError, PowersErrorExt};
use hhub_database::Database;
use hhub_domain::entity::{NewPower, Power, PowerId};
use hhub_domain::ValidationError;
use sqlx::{FromRow, SqliteExecutor};
use tracing::{debug, instrument};

/// Column list shared by every query that materializes a [`Power`].
pub const POWER_COLUMNS: &str = "powers.id, powers.name, powers.description";

/// Raw `powers` row. Converted into [`Power`], which re-checks the description rule.
#[derive(Debug, FromRow)]
pub struct PowerRow {
    pub id: PowerId,
    pub name: String,
    pub description: String,
}

impl TryFrom<PowerRow> for Power {
    type Error = ValidationError;

    fn try_from(row: PowerRow) -> Result<Self, Self::Error> {
        Self::new(row.id, row.name, row.description)
    }
}

/// Loads one power by primary key.
pub async fn fetch_power<'e, E>(executor: E, id: PowerId) -> Result<Option<Power>, PowersError>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, PowerRow>(&format!(
        "SELECT {POWER_COLUMNS} FROM powers WHERE powers.id = ?"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
    .context("Loading power")?;

    row.map(Power::try_from).transpose().context("Stored power violates field rules")
}

/// Pool-backed repository held by the [`crate::Powers`] slice.
#[derive(Debug, Clone)]
pub struct PowerRepository {
    db: Database,
}

impl PowerRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// All powers in insertion order.
    pub async fn list(&self) -> Result<Vec<Power>, PowersError> {
        let rows = sqlx::query_as::<_, PowerRow>(&format!(
            "SELECT {POWER_COLUMNS} FROM powers ORDER BY powers.id"
        ))
        .fetch_all(self.db.pool())
        .await
        .context("Listing powers")?;

        rows.into_iter()
            .map(Power::try_from)
            .collect::<Result<_, _>>()
            .context("Stored power violates field rules")
    }

    pub async fn find(&self, id: PowerId) -> Result<Option<Power>, PowersError> {
        fetch_power(self.db.pool(), id).await
    }

    #[instrument(skip(self, power), fields(name = %power.name))]
    pub async fn create(&self, power: NewPower) -> Result<Power, PowersError> {
        let row = sqlx::query_as::<_, PowerRow>(
            "INSERT INTO powers (name, description) VALUES (?, ?) RETURNING id, name, description",
        )
        .bind(&power.name)
        .bind(power.description.as_str())
        .fetch_one(self.db.pool())
        .await
        .context("Inserting power")?;

        debug!(power_id = row.id, "Power created");
        Power::try_from(row).context("Inserted power violates field rules")
    }

    /// Replaces a power's description.
    ///
    /// The new value is checked before any write; a rejected value leaves the stored
    /// row untouched and the transaction is rolled back on drop.
    #[instrument(skip(self, description))]
    pub async fn update_description(
        &self,
        id: PowerId,
        description: impl Into<String>,
    ) -> Result<Power, PowersError> {
        let mut tx = self.db.begin_write().await.context("Updating power")?;

        let mut power = fetch_power(&mut *tx, id)
            .await?
            .ok_or(PowersError::NotFound { id, context: None })?;

        power.set_description(description)?;

        sqlx::query("UPDATE powers SET description = ? WHERE id = ?")
            .bind(power.description())
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Writing power description")?;

        tx.commit().await.context("Committing power update")?;

        debug!(power_id = id, "Power description updated");
        Ok(power)
    }

    /// Deletes a power and every hero-power that references it.
    ///
    /// Returns `false` when no such power exists.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: PowerId) -> Result<bool, PowersError> {
        let mut tx = self.db.begin_write().await.context("Deleting power")?;

        let links = sqlx::query("DELETE FROM hero_powers WHERE power_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Deleting hero-powers of power")?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM powers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Deleting power")?
            .rows_affected()
            > 0;

        tx.commit().await.context("Committing power delete")?;

        debug!(power_id = id, links, deleted, "Power delete finished");
        Ok(deleted)
    }
}
