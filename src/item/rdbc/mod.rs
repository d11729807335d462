use sqlx::{Database, migrate::Migrator, query_builder::Separated};

/// Product-specific table layout, binder and constructors.
pub mod product;

/// Duplicate lookup over a SQLite key column.
pub mod sqlite_lookup;

/// Batch insert writer for SQLite.
pub mod sqlite_writer;

/// Migrations creating the product table.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Trait for binding item data to database query parameters.
///
/// # Type Parameters
///
/// * `O` - The item type to bind
/// * `DB` - The SQLx database type
///
/// # Examples
///
/// ```no_run
/// use product_import::item::rdbc::DatabaseItemBinder;
/// use sqlx::{query_builder::Separated, Sqlite};
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
/// ```
pub trait DatabaseItemBinder<O, DB: Database> {
    /// Binds the properties of an item to a separated query builder.
    fn bind(&self, item: &O, query_builder: Separated<DB, &str>);
}

pub use product::{ProductRecordBinder, product_lookup, product_writer};
pub use sqlite_lookup::SqliteCodeLookup;
pub use sqlite_writer::SqliteItemWriter;
