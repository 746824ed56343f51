use crate::error::{DatabaseError, DatabaseErrorExt};
use sqlx::SqlitePool;

static DEMO_SEED: &str = include_str!("../seeds/demo.sql");

/// Loads the demo heroes, powers and hero-powers.
///
/// Returns `false` without touching the database when heroes already exist.
pub(crate) async fn seed_demo(pool: &SqlitePool) -> Result<bool, DatabaseError> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await.context("Opening seed transaction")?;

    let (heroes,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM heroes")
        .fetch_one(&mut *tx)
        .await
        .context("Counting heroes before seeding")?;

    if heroes > 0 {
        return Ok(false);
    }

    sqlx::raw_sql(DEMO_SEED).execute(&mut *tx).await.context("Applying demo seed")?;
    tx.commit().await.context("Committing demo seed")?;

    Ok(true)
}
