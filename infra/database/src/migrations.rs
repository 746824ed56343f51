use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

const LEDGER_DDL: &str = "CREATE TABLE IF NOT EXISTS _migrations (
    version    INTEGER PRIMARY KEY,
    name       TEXT NOT NULL,
    checksum   TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// Schema migrations compiled into the binary, in application order.
static MIGRATIONS: &[Migration] = &[
    Migration::new(
        1,
        "create_heroes_and_powers",
        include_str!("../migrations/0001_create_heroes_and_powers.sql"),
    ),
    Migration::new(2, "create_hero_powers", include_str!("../migrations/0002_create_hero_powers.sql")),
];

#[derive(Debug)]
pub(crate) struct Migration {
    version: i64,
    name: &'static str,
    script: &'static str,
}

impl Migration {
    #[must_use]
    pub(crate) const fn new(version: i64, name: &'static str, script: &'static str) -> Self {
        Self { version, name, script }
    }

    /// Hex-encoded SHA-256 of the script text.
    pub(crate) fn checksum(&self) -> String {
        hex::encode(Sha256::digest(self.script.as_bytes()))
    }

    fn to_applied(&self) -> AppliedMigration {
        AppliedMigration {
            version: self.version,
            name: self.name.to_owned(),
            checksum: self.checksum(),
        }
    }
}

/// Outcome of a [`MigrationRunner::run`] call.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

/// A row of the `_migrations` ledger.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AppliedMigration {
    pub version: i64,
    pub name: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MigrationRunner<'a> {
    #[must_use]
    pub(crate) const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Applies every pending migration, each inside its own transaction.
    ///
    /// # Errors
    /// Fails when a script errors, or when an already applied migration no longer
    /// matches the checksum recorded for it.
    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        sqlx::query(LEDGER_DDL).execute(self.pool).await.context("Creating migration ledger")?;

        let applied = self.applied_migrations().await?;
        let mut report = MigrationReport::default();

        for migration in MIGRATIONS {
            if let Some(existing) = applied.get(&migration.version) {
                ensure_checksum_match(migration, &existing.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply(migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let failed_at = || format!("Migration {:04}_{} failed", migration.version, migration.name);

        let mut tx = self.pool.begin().await.context("Opening migration transaction")?;

        sqlx::raw_sql(migration.script).execute(&mut *tx).await.context(failed_at())?;

        sqlx::query("INSERT INTO _migrations (version, name, checksum) VALUES (?, ?, ?)")
            .bind(migration.version)
            .bind(migration.name)
            .bind(migration.checksum())
            .execute(&mut *tx)
            .await
            .context(failed_at())?;

        tx.commit().await.context(failed_at())?;
        Ok(())
    }

    async fn applied_migrations(&self) -> Result<FxHashMap<i64, AppliedMigration>, DatabaseError> {
        let rows = sqlx::query_as::<_, AppliedMigration>(
            "SELECT version, name, checksum FROM _migrations ORDER BY version",
        )
        .fetch_all(self.pool)
        .await
        .context("Loading applied migrations")?;

        Ok(rows.into_iter().map(|row| (row.version, row)).collect())
    }
}

fn ensure_checksum_match(migration: &Migration, recorded: &str) -> Result<(), DatabaseError> {
    let expected = migration.checksum();
    if recorded != expected {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {:04}_{} (recorded {recorded}, embedded {expected})",
                migration.version, migration.name
            )
            .into(),
            context: Some("Migration already applied with different contents".into()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_strictly_increasing() {
        assert!(MIGRATIONS.windows(2).all(|pair| pair[0].version < pair[1].version));
    }

    #[test]
    fn checksum_is_stable_hex_sha256() {
        let migration = Migration::new(1, "demo", "SELECT 1;");
        assert_eq!(migration.checksum(), migration.checksum());
        assert_eq!(migration.checksum().len(), 64);
    }

    #[test]
    fn checksum_mismatch_is_a_migration_error() {
        let err = ensure_checksum_match(&MIGRATIONS[0], "deadbeef").unwrap_err();
        assert!(matches!(err, DatabaseError::Migration { .. }));
    }
}
