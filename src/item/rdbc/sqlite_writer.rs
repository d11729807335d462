use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::core::item::{ItemWriter, ItemWriterResult};
use crate::error::ImportError;
use crate::item::rdbc::DatabaseItemBinder;

// SQLITE_MAX_VARIABLE_NUMBER since SQLite 3.32
const BIND_LIMIT: usize = 32766;

/// A writer for inserting items into a SQLite database using SQLx.
///
/// Items are inserted with multi-row `INSERT` statements, split so that no
/// statement binds more than [`BIND_LIMIT`] parameters. A UNIQUE or PRIMARY KEY
/// violation is reported as [`ImportError::DuplicateKey`] so callers can tell
/// a duplicate apart from a real failure.
///
/// The writer bridges to the async pool with `block_in_place`, so it must run
/// inside a multi-threaded tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use product_import::item::rdbc::{DatabaseItemBinder, sqlite_writer::SqliteItemWriter};
/// use sqlx::{SqlitePool, query_builder::Separated, Sqlite};
///
/// struct Tag {
///     id: i64,
///     label: String,
/// }
///
/// struct TagBinder;
/// impl DatabaseItemBinder<Tag, Sqlite> for TagBinder {
///     fn bind(&self, item: &Tag, mut query_builder: Separated<Sqlite, &str>) {
///         query_builder.push_bind(item.id);
///         query_builder.push_bind(item.label.clone());
///     }
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = SqlitePool::connect("sqlite://database.db").await?;
/// let binder = TagBinder;
///
/// let writer = SqliteItemWriter::<Tag>::new()
///     .pool(&pool)
///     .table("tags")
///     .add_column("id")
///     .add_column("label")
///     .item_binder(&binder);
/// # Ok(())
/// # }
/// ```
pub struct SqliteItemWriter<'a, O> {
    pool: Option<&'a Pool<Sqlite>>,
    table: Option<&'a str>,
    columns: Vec<&'a str>,
    item_binder: Option<&'a dyn DatabaseItemBinder<O, Sqlite>>,
}

impl<O> Default for SqliteItemWriter<'_, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, O> SqliteItemWriter<'a, O> {
    pub fn new() -> Self {
        Self {
            pool: None,
            table: None,
            columns: Vec::new(),
            item_binder: None,
        }
    }

    /// Sets the database connection pool. Required.
    pub fn pool(mut self, pool: &'a Pool<Sqlite>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Sets the target table. Required.
    pub fn table(mut self, table: &'a str) -> Self {
        self.table = Some(table);
        self
    }

    /// Adds a column. Columns are bound in the order they were added.
    pub fn add_column(mut self, column: &'a str) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the binder that maps an item onto the columns. Required.
    pub fn item_binder(mut self, item_binder: &'a dyn DatabaseItemBinder<O, Sqlite>) -> Self {
        self.item_binder = Some(item_binder);
        self
    }

    fn insert(
        &self,
        pool: &Pool<Sqlite>,
        table: &str,
        item_binder: &dyn DatabaseItemBinder<O, Sqlite>,
        items: &[O],
    ) -> Result<(), sqlx::Error> {
        let mut query_builder = QueryBuilder::new("INSERT INTO ");
        query_builder.push(table);
        query_builder.push(" (");
        query_builder.push(self.columns.join(","));
        query_builder.push(") ");

        query_builder.push_values(items, |b, item| {
            item_binder.bind(item, b);
        });

        let query = query_builder.build();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async { query.execute(pool).await })
        })?;

        Ok(())
    }
}

impl<O> ItemWriter<O> for SqliteItemWriter<'_, O> {
    fn write(&self, items: &[O]) -> ItemWriterResult {
        if items.is_empty() {
            return Ok(());
        }

        let (Some(pool), Some(table), Some(item_binder)) = (self.pool, self.table, self.item_binder)
        else {
            return Err(ImportError::ItemWriter(
                "SQLite writer needs a pool, a table and an item binder".to_string(),
            ));
        };
        if self.columns.is_empty() {
            return Err(ImportError::ItemWriter(
                "SQLite writer needs at least one column".to_string(),
            ));
        }

        for batch in items.chunks(BIND_LIMIT / self.columns.len()) {
            match self.insert(pool, table, item_binder, batch) {
                Ok(()) => {
                    log::debug!(
                        "Successfully wrote {} items to SQLite table {}",
                        batch.len(),
                        table
                    );
                }
                Err(sqlx::Error::Database(error)) if error.is_unique_violation() => {
                    return Err(ImportError::DuplicateKey(error.message().to_string()));
                }
                Err(error) => {
                    log::error!("Failed to write items to SQLite table {}: {}", table, error);
                    return Err(ImportError::ItemWriter(format!(
                        "SQLite write failed: {}",
                        error
                    )));
                }
            }
        }

        Ok(())
    }
}
