//! SQLite Rate Store
//!
//! Persists rate tables (one row per base currency) and the singleton code
//! list. Rate maps and code lists are stored as JSON text columns.

use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::error::{ConverterError, Result};
use crate::store::{CurrencyCodeListRecord, CurrencyRateRecord, RateTable, CODE_LIST_ID};

// == Rate Store ==
/// Handle to the SQLite database. Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct RateStore {
    pool: SqlitePool,
}

impl RateStore {
    // == Constructors ==
    /// Opens (creating if needed) the database file at `path` and ensures the schema exists.
    pub async fn connect(path: &str) -> Result<Self> {
        let url = format!("sqlite://{}", path);

        if !Sqlite::database_exists(&url).await? {
            info!("Creating database at {}", path);
            Sqlite::create_database(&url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        Self::from_pool(pool).await
    }

    /// Opens a private in-memory database.
    ///
    /// Pinned to a single long-lived connection: every SQLite memory
    /// connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool and runs the schema migrations on it.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    // == Migrations ==
    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS currencies (
                currency_code TEXT PRIMARY KEY NOT NULL,
                last_updated INTEGER NOT NULL,
                rates TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS currencyCodes (
                id TEXT PRIMARY KEY NOT NULL,
                currency_codes TEXT NOT NULL DEFAULT '[]',
                last_updated INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        debug!("database schema ready");
        Ok(())
    }

    // == Rate Records ==
    /// Loads the cached rate table for `currency_code`, if any.
    pub async fn get_rate_record(&self, currency_code: &str) -> Result<Option<CurrencyRateRecord>> {
        let row = sqlx::query_as::<_, (String, i64, String)>(
            r#"
            SELECT currency_code, last_updated, rates
            FROM currencies
            WHERE currency_code = ?
            "#,
        )
        .bind(currency_code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(code, last_updated, rates)| {
            let rates: RateTable = serde_json::from_str(&rates).map_err(|e| {
                ConverterError::Store(format!("corrupt rates for {}: {}", code, e))
            })?;
            Ok(CurrencyRateRecord::new(code, rates, last_updated))
        })
        .transpose()
    }

    /// Inserts or overwrites the rate table for the record's currency.
    pub async fn put_rate_record(&self, record: &CurrencyRateRecord) -> Result<()> {
        let rates = serde_json::to_string(&record.rates)
            .map_err(|e| ConverterError::Store(format!("cannot encode rates: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO currencies (currency_code, last_updated, rates)
            VALUES (?, ?, ?)
            ON CONFLICT(currency_code) DO UPDATE SET
                last_updated = excluded.last_updated,
                rates = excluded.rates
            "#,
        )
        .bind(&record.currency_code)
        .bind(record.last_updated)
        .bind(rates)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Number of cached rate tables.
    pub async fn rate_record_count(&self) -> Result<i64> {
        let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM currencies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // == Code List Record ==
    /// Loads the singleton code list, if it has been stored.
    pub async fn get_code_list(&self) -> Result<Option<CurrencyCodeListRecord>> {
        let row = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT currency_codes, last_updated
            FROM currencyCodes
            WHERE id = ?
            "#,
        )
        .bind(CODE_LIST_ID)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(codes, last_updated)| {
            let codes: Vec<String> = serde_json::from_str(&codes)
                .map_err(|e| ConverterError::Store(format!("corrupt currency code list: {}", e)))?;
            Ok(CurrencyCodeListRecord::new(codes, last_updated))
        })
        .transpose()
    }

    /// Inserts or overwrites the singleton code list.
    pub async fn put_code_list(&self, record: &CurrencyCodeListRecord) -> Result<()> {
        let codes = serde_json::to_string(&record.currency_codes)
            .map_err(|e| ConverterError::Store(format!("cannot encode code list: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO currencyCodes (id, currency_codes, last_updated)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                currency_codes = excluded.currency_codes,
                last_updated = excluded.last_updated
            "#,
        )
        .bind(CODE_LIST_ID)
        .bind(codes)
        .bind(record.last_updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rates() -> RateTable {
        RateTable::from([("GBP".to_string(), 0.79), ("EUR".to_string(), 0.91)])
    }

    #[tokio::test]
    async fn test_missing_rate_record() {
        let store = RateStore::in_memory().await.unwrap();
        assert!(store.get_rate_record("USD").await.unwrap().is_none());
        assert_eq!(store.rate_record_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_put_and_get_rate_record() {
        let store = RateStore::in_memory().await.unwrap();
        let record = CurrencyRateRecord::new("USD", sample_rates(), 1_000);

        store.put_rate_record(&record).await.unwrap();

        let loaded = store.get_rate_record("USD").await.unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_rate_table_order_survives_round_trip() {
        let store = RateStore::in_memory().await.unwrap();
        let rates = RateTable::from([
            ("USD".to_string(), 1.0),
            ("AED".to_string(), 3.67),
            ("GBP".to_string(), 0.79),
        ]);
        store
            .put_rate_record(&CurrencyRateRecord::new("USD", rates, 1_000))
            .await
            .unwrap();

        let loaded = store.get_rate_record("USD").await.unwrap().unwrap();
        let codes: Vec<&str> = loaded.rates.keys().map(String::as_str).collect();
        assert_eq!(codes, vec!["USD", "AED", "GBP"]);
    }

    #[tokio::test]
    async fn test_put_rate_record_overwrites_in_place() {
        let store = RateStore::in_memory().await.unwrap();

        store
            .put_rate_record(&CurrencyRateRecord::new("USD", sample_rates(), 1_000))
            .await
            .unwrap();
        let updated = RateTable::from([("GBP".to_string(), 0.8)]);
        store
            .put_rate_record(&CurrencyRateRecord::new("USD", updated.clone(), 2_000))
            .await
            .unwrap();

        let loaded = store.get_rate_record("USD").await.unwrap().unwrap();
        assert_eq!(loaded.rates, updated);
        assert_eq!(loaded.last_updated, 2_000);
        assert_eq!(store.rate_record_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_code_list_singleton() {
        let store = RateStore::in_memory().await.unwrap();
        assert!(store.get_code_list().await.unwrap().is_none());

        let first = CurrencyCodeListRecord::new(vec!["EUR".into(), "USD".into()], 10);
        store.put_code_list(&first).await.unwrap();
        let second = CurrencyCodeListRecord::new(vec!["GBP".into()], 20);
        store.put_code_list(&second).await.unwrap();

        assert_eq!(store.get_code_list().await.unwrap(), Some(second));

        let (rows,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM currencyCodes")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_corrupt_rates_surface_as_store_error() {
        let store = RateStore::in_memory().await.unwrap();
        sqlx::query("INSERT INTO currencies (currency_code, last_updated, rates) VALUES ('USD', 0, 'nope')")
            .execute(&store.pool)
            .await
            .unwrap();

        let result = store.get_rate_record("USD").await;
        assert!(matches!(result, Err(ConverterError::Store(_))));
    }

    #[tokio::test]
    async fn test_file_backed_store_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.db");
        let path = path.to_str().unwrap();

        {
            let store = RateStore::connect(path).await.unwrap();
            store
                .put_rate_record(&CurrencyRateRecord::new("EUR", sample_rates(), 5))
                .await
                .unwrap();
        }

        let reopened = RateStore::connect(path).await.unwrap();
        let loaded = reopened.get_rate_record("EUR").await.unwrap().unwrap();
        assert_eq!(loaded.last_updated, 5);
    }

    #[tokio::test]
    async fn test_connect_reports_unusable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let path = blocker.join("rates.db");

        let result = RateStore::connect(path.to_str().unwrap()).await;

        assert!(matches!(result, Err(ConverterError::Store(_))));
    }
}
