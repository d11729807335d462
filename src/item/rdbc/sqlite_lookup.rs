use sqlx::{Pool, Sqlite};

use crate::core::item::{DuplicateLookup, LookupResult};
use crate::error::ImportError;

/// Duplicate lookup against a key column of a SQLite table.
///
/// Registration is left to the store: once a record is inserted the next
/// `exists` call sees it.
pub struct SqliteCodeLookup<'a> {
    pool: &'a Pool<Sqlite>,
    table: &'a str,
    column: &'a str,
}

impl<'a> SqliteCodeLookup<'a> {
    pub fn new(pool: &'a Pool<Sqlite>, table: &'a str, column: &'a str) -> Self {
        Self {
            pool,
            table,
            column,
        }
    }
}

impl DuplicateLookup for SqliteCodeLookup<'_> {
    fn exists(&self, code: &str) -> LookupResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?)",
            self.table, self.column
        );

        let found = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                sqlx::query_scalar::<_, i64>(&sql)
                    .bind(code)
                    .fetch_one(self.pool)
                    .await
            })
        })
        .map_err(|error| ImportError::Lookup(error.to_string()))?;

        Ok(found != 0)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::SqliteCodeLookup;
    use crate::{core::item::DuplicateLookup, error::ImportError};

    #[tokio::test(flavor = "multi_thread")]
    async fn finds_existing_codes() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("CREATE TABLE items (code TEXT NOT NULL UNIQUE)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO items (code) VALUES ('P0001')")
            .execute(&pool)
            .await
            .unwrap();

        let lookup = SqliteCodeLookup::new(&pool, "items", "code");

        assert!(lookup.exists("P0001").unwrap());
        assert!(!lookup.exists("P0002").unwrap());
        lookup.register("P0002").unwrap();
        assert!(!lookup.exists("P0002").unwrap());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_table_is_a_lookup_error() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let lookup = SqliteCodeLookup::new(&pool, "items", "code");

        assert!(matches!(lookup.exists("P0001"), Err(ImportError::Lookup(_))));
    }
}
