use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use estrella_ingest::{SqlStore, StoreError};

/// Postgres-backed store over a sqlx pool.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(connection_string: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(connection_string)
            .await
            .map_err(db_error)?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl SqlStore for PgStore {
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(rows
            .iter()
            .map(|row| (0..row.len()).map(|index| column_text(row, index)).collect())
            .collect())
    }

    async fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

fn db_error(err: sqlx::Error) -> StoreError {
    StoreError::Db(err.to_string())
}

/// Best-effort text rendering of one column; the read-back surface only
/// deals in integers and strings.
fn column_text(row: &PgRow, index: usize) -> String {
    if let Ok(value) = row.try_get::<Option<i32>, _>(index) {
        return render_option(value);
    }
    if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
        return render_option(value);
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(index) {
        return render_option(value);
    }
    if let Ok(value) = row.try_get::<Option<bool>, _>(index) {
        return render_option(value);
    }
    match row.try_get::<Option<String>, _>(index) {
        Ok(value) => render_option(value),
        Err(_) => "?".to_string(),
    }
}

fn render_option<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "null".to_string(),
    }
}
