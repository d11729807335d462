use sqlx::{Pool, Sqlite, query_builder::Separated};

use crate::{
    item::rdbc::{
        DatabaseItemBinder, sqlite_lookup::SqliteCodeLookup, sqlite_writer::SqliteItemWriter,
    },
    product::ProductRecord,
};

/// Table created by the embedded migrations.
pub const PRODUCT_TABLE: &str = "product_data";

/// Unique key column.
pub const CODE_COLUMN: &str = "code";

/// Columns written for every record, in binding order.
pub const PRODUCT_COLUMNS: [&str; 7] = [
    CODE_COLUMN,
    "name",
    "description",
    "added_at",
    "discontinued_at",
    "stock_level",
    "price",
];

/// Binds a [`ProductRecord`] in [`PRODUCT_COLUMNS`] order.
pub struct ProductRecordBinder;

impl DatabaseItemBinder<ProductRecord, Sqlite> for ProductRecordBinder {
    fn bind(&self, item: &ProductRecord, mut query_builder: Separated<Sqlite, &str>) {
        query_builder.push_bind(item.code.clone());
        query_builder.push_bind(item.name.clone());
        query_builder.push_bind(item.description.clone());
        query_builder.push_bind(item.added_at);
        query_builder.push_bind(item.discontinued_at);
        query_builder.push_bind(item.stock_level);
        query_builder.push_bind(item.price);
    }
}

static PRODUCT_BINDER: ProductRecordBinder = ProductRecordBinder;

/// Record sink writing into [`PRODUCT_TABLE`].
pub fn product_writer(pool: &Pool<Sqlite>) -> SqliteItemWriter<'_, ProductRecord> {
    PRODUCT_COLUMNS.iter().fold(
        SqliteItemWriter::new()
            .pool(pool)
            .table(PRODUCT_TABLE)
            .item_binder(&PRODUCT_BINDER),
        |writer, column| writer.add_column(column),
    )
}

/// Duplicate lookup on [`CODE_COLUMN`] of [`PRODUCT_TABLE`].
pub fn product_lookup(pool: &Pool<Sqlite>) -> SqliteCodeLookup<'_> {
    SqliteCodeLookup::new(pool, PRODUCT_TABLE, CODE_COLUMN)
}
