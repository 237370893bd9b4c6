use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

/// DbConnection owns the SQLite pool and the schema.
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if necessary) the database at `url` and ensure the
    /// schema exists. Foreign keys are enabled so that deleting a flight
    /// record cascades to its galley and crew detail rows.
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url: {url}"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Open a uniquely named shared in-memory database for one test.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS flight_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                loading_index_doc TEXT NOT NULL UNIQUE,
                weight_report_doc TEXT NOT NULL,
                report_date TEXT NOT NULL,
                aircraft_reg TEXT,
                empty_weight REAL NOT NULL,
                empty_weight_index REAL NOT NULL,
                dow_domestic REAL NOT NULL,
                doi_domestic REAL NOT NULL,
                dow_international REAL NOT NULL,
                doi_international REAL NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS galley_details (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                flight_record_id INTEGER NOT NULL
                    REFERENCES flight_records(id) ON DELETE CASCADE,
                galley_no TEXT NOT NULL,
                arm_m REAL NOT NULL,
                domestic_weight_kg REAL NOT NULL,
                domestic_index REAL NOT NULL,
                international_weight_kg REAL NOT NULL,
                international_index REAL NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        // "index" is a keyword in SQLite and has to stay quoted everywhere.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS crew_details (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                flight_record_id INTEGER NOT NULL
                    REFERENCES flight_records(id) ON DELETE CASCADE,
                description TEXT NOT NULL,
                qty INTEGER NOT NULL,
                arm_m REAL NOT NULL,
                weight_kg REAL NOT NULL,
                "index" REAL NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Get the underlying SQLite pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Read a numeric column as f64. SQLite columns are dynamically typed,
/// so a value may come back as a float, an integer, or text; text is
/// parsed at this boundary so callers always see a number.
pub fn numeric_column(row: &SqliteRow, column: &str) -> Result<f64> {
    if let Ok(value) = row.try_get::<f64, _>(column) {
        return Ok(value);
    }
    if let Ok(value) = row.try_get::<i64, _>(column) {
        return Ok(value as f64);
    }
    let text: String = row
        .try_get(column)
        .with_context(|| format!("column `{column}` is neither numeric nor text"))?;
    text.trim()
        .parse()
        .with_context(|| format!("column `{column}` holds non-numeric text"))
}

/// Read an integer column, accepting text storage the same way.
pub fn integer_column(row: &SqliteRow, column: &str) -> Result<i64> {
    if let Ok(value) = row.try_get::<i64, _>(column) {
        return Ok(value);
    }
    let text: String = row
        .try_get(column)
        .with_context(|| format!("column `{column}` is neither integer nor text"))?;
    text.trim()
        .parse()
        .with_context(|| format!("column `{column}` holds non-integer text"))
}
