//! # Database Infrastructure
//!
//! Pooled [SQLite](https://sqlite.org) access for the workspace through [`sqlx`].
//!
//! ## Key Features
//! - **File or memory**: accepts `sqlite://path.db` and `sqlite::memory:` URLs.
//! - **Resilient Connectivity**: health check retries with backoff during startup.
//! - **Embedded migrations**: versioned scripts tracked in a `_migrations` ledger with checksums.
//! - **Builder Pattern**: fluent API for pool sizing and demo seeding.
//!
//! ## Example
//!
//! ```rust
//! use hhub_database::{Database, DatabaseError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder().url("sqlite::memory:").seed(true).init().await?;
//!     db.health().await?;
//!     Ok(())
//! }
//! ```

mod error;
mod migrations;
mod seed;

pub use error::{DatabaseError, DatabaseErrorExt};
pub use migrations::{AppliedMigration, MigrationReport};
pub use sqlx::{Sqlite, SqlitePool, Transaction};

use migrations::MigrationRunner;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, trace, warn};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const HEALTH_ATTEMPTS: u32 = 3;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Inner state of the [`Database`] wrapper.
#[derive(Debug)]
pub struct DatabaseInner {
    pool: SqlitePool,
    url: String,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        info!(url = %self.url, "SQLite pool handle dropped");
    }
}

/// Cloneable handle to the connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Creates a new [`DatabaseBuilder`].
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Runs a trivial query against the pool.
    pub async fn health(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.inner.pool).await.context("Health check")?;
        Ok(())
    }

    /// Loads the demo data set when the heroes table is empty.
    ///
    /// Returns whether anything was inserted.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<bool, DatabaseError> {
        let seeded = seed::seed_demo(&self.inner.pool).await?;
        if seeded {
            info!("Demo data seeded");
        } else {
            trace!("Heroes already present, demo seed skipped");
        }
        Ok(seeded)
    }

    /// Begins a transaction that holds the write lock from its first statement.
    ///
    /// A deferred transaction that reads before writing cannot upgrade its lock while
    /// another writer is active and fails with `SQLITE_BUSY` instead of waiting.
    /// `BEGIN IMMEDIATE` takes the lock up front, so concurrent writers queue on the
    /// connection's busy timeout.
    pub async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, DatabaseError> {
        self.inner.pool.begin_with("BEGIN IMMEDIATE").await.context("Opening write transaction")
    }
}

impl Deref for Database {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.inner.pool
    }
}

/// A fluent builder for configuring and opening the `SQLite` pool.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    url: Option<String>,
    max_connections: Option<u32>,
    seed: bool,
}

impl DatabaseBuilder {
    /// Creates a new [`DatabaseBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the connection URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Upper bound on pooled connections. Ignored for in-memory databases.
    pub const fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Loads the demo data set after migrating.
    pub const fn seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// Consumes the builder and opens the pool.
    ///
    /// # Process
    /// 1. **Validation**: the URL must be present and parse as a `SQLite` URL.
    /// 2. **Pool**: foreign keys are enforced on every connection. A memory database lives
    ///    in a single connection that is never recycled.
    /// 3. **Resilience**: up to 3 health checks, retrying with exponential backoff from 500ms.
    /// 4. **Migrations**: pending scripts are applied in version order.
    /// 5. **Seed**: demo data is loaded when requested and the heroes table is empty.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] if the URL is missing or malformed.
    /// * [`DatabaseError::Connection`] if the pool stays unhealthy.
    /// * [`DatabaseError::Migration`] or [`DatabaseError::Sqlx`] if migrating or seeding fails.
    #[instrument(skip(self), fields(url = self.url))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let url = self.url.ok_or(DatabaseError::Validation {
            message: "URL is required".into(),
            context: None,
        })?;

        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| DatabaseError::Validation {
                message: e.to_string().into(),
                context: Some(url.clone().into()),
            })?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool_options = if is_memory_url(&url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS).max(1))
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            DatabaseError::Connection {
                message: e.to_string().into(),
                context: Some("Opening pool".into()),
            }
        })?;

        let mut delay = Duration::from_millis(500);
        for attempt in 1..=HEALTH_ATTEMPTS {
            if sqlx::query("SELECT 1").execute(&pool).await.is_ok() {
                break;
            }
            if attempt == HEALTH_ATTEMPTS {
                return Err(DatabaseError::Connection {
                    message: "Unhealthy after retries".into(),
                    context: Some(url.into()),
                });
            }
            warn!(attempt, ?delay, "Database not ready, retrying...");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        let version: (String,) = sqlx::query_as("SELECT sqlite_version()")
            .fetch_one(&pool)
            .await
            .context("Reading SQLite version")?;
        info!(version = %version.0, "SQLite connection established");

        info!("Applying database migrations...");
        let report = MigrationRunner::new(&pool).run().await?;
        for skipped in &report.skipped {
            trace!(version = skipped.version, name = %skipped.name, "Skipping migration");
        }
        for applied in &report.applied {
            info!(version = applied.version, name = %applied.name, "Applied migration");
        }
        info!("Database migrations applied successfully");

        let database = Database { inner: Arc::new(DatabaseInner { pool, url }) };

        if self.seed {
            database.seed().await?;
        }

        Ok(database)
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::is_memory_url;

    #[test]
    fn detects_memory_urls() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite://file:heroes?mode=memory&cache=shared"));
        assert!(!is_memory_url("sqlite://app.db"));
    }
}
