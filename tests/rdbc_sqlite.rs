mod common;

use common::{HEADER, fixture, temp_input};

use product_import::{
    core::job::{Job, JobBuilder},
    item::rdbc::{MIGRATOR, product_lookup, product_writer},
};
use sqlx::{
    Row, Sqlite, SqlitePool,
    migrate::MigrateDatabase,
};
use tempfile::NamedTempFile;

async fn prepare_database(database_file: &NamedTempFile) -> Result<SqlitePool, sqlx::Error> {
    let database_path = database_file.path().to_str().unwrap();
    let connection_uri = format!("sqlite://{}", database_path);

    if !Sqlite::database_exists(&connection_uri)
        .await
        .unwrap_or(false)
    {
        Sqlite::create_database(&connection_uri).await?;
    }

    let pool = SqlitePool::connect(&connection_uri).await?;
    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

#[tokio::test(flavor = "multi_thread")]
async fn live_import_persists_accepted_rows() -> Result<(), sqlx::Error> {
    let database_file = NamedTempFile::new()?;
    let pool = prepare_database(&database_file).await?;

    let writer = product_writer(&pool);
    let lookup = product_lookup(&pool);

    let report = JobBuilder::new()
        .path(fixture("sample.csv"))
        .lookup(&lookup)
        .writer(&writer)
        .build()
        .unwrap()
        .run()
        .unwrap()
        .report;

    assert!(!report.dry_run);
    assert_eq!(report.processed, 10);
    assert_eq!(report.imported, 6);
    assert_eq!(report.skipped, 4);
    assert!(!report.to_string().contains("Dry run"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product_data")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 6);

    let row = sqlx::query("SELECT name, discontinued_at FROM product_data WHERE code = 'P0001'")
        .fetch_one(&pool)
        .await?;
    // the duplicate later in the file must not overwrite the first row
    assert_eq!(row.get::<String, _>("name"), "TV");
    assert!(row.get::<Option<String>, _>("discontinued_at").is_none());

    let discontinued: Option<String> =
        sqlx::query_scalar("SELECT discontinued_at FROM product_data WHERE code = 'P0002'")
            .fetch_one(&pool)
            .await?;
    assert!(discontinued.is_some());

    let description: String =
        sqlx::query_scalar("SELECT description FROM product_data WHERE code = 'P0008'")
            .fetch_one(&pool)
            .await?;
    assert_eq!(description, "No description available");

    let price: f64 = sqlx::query_scalar("SELECT price FROM product_data WHERE code = 'P0009'")
        .fetch_one(&pool)
        .await?;
    assert_eq!(price, 7.5);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn second_live_import_only_finds_duplicates() -> Result<(), sqlx::Error> {
    let database_file = NamedTempFile::new()?;
    let pool = prepare_database(&database_file).await?;

    let writer = product_writer(&pool);
    let lookup = product_lookup(&pool);

    let run = || {
        JobBuilder::new()
            .path(fixture("sample_with_duplicates.csv"))
            .lookup(&lookup)
            .writer(&writer)
            .build()
            .unwrap()
            .run()
            .unwrap()
            .report
    };

    let first = run();
    assert_eq!(first.imported, 3);
    assert_eq!(first.skipped, 2);

    let second = run();
    assert_eq!(second.imported, 0);
    assert_eq!(second.skipped, 5);
    assert!(
        second
            .errors
            .iter()
            .all(|message| message.ends_with("due to duplicate code."))
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product_data")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 3);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn dry_run_does_not_consult_the_database() -> Result<(), sqlx::Error> {
    let database_file = NamedTempFile::new()?;
    let pool = prepare_database(&database_file).await?;

    sqlx::query("INSERT INTO product_data (code, name, description) VALUES ('D0001', 'Kettle', 'Old')")
        .execute(&pool)
        .await?;

    let writer = product_writer(&pool);
    let lookup = product_lookup(&pool);

    // lookup and writer are ignored in dry-run mode
    let dry = JobBuilder::new()
        .path(fixture("sample_with_duplicates.csv"))
        .dry_run(true)
        .lookup(&lookup)
        .writer(&writer)
        .build()
        .unwrap()
        .run()
        .unwrap()
        .report;

    assert_eq!(dry.imported, 3);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product_data")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 1);

    let live = JobBuilder::new()
        .path(fixture("sample_with_duplicates.csv"))
        .lookup(&lookup)
        .writer(&writer)
        .build()
        .unwrap()
        .run()
        .unwrap()
        .report;

    assert_eq!(live.imported, 2);
    assert_eq!(
        live.errors.first().map(String::as_str),
        Some("Skipped product: Kettle due to duplicate code.")
    );

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn added_at_column_is_stored() -> Result<(), sqlx::Error> {
    let database_file = NamedTempFile::new()?;
    let pool = prepare_database(&database_file).await?;

    let content = format!(
        "{},Date Added\nA0001,Sofa,Green,12,300.00,,2024-10-07 09:30:00\nA0002,Rug,Red,12,80.00,,not a date\n",
        HEADER
    );
    let file = temp_input(content.as_bytes());

    let writer = product_writer(&pool);
    let lookup = product_lookup(&pool);

    let report = JobBuilder::new()
        .path(file.path())
        .lookup(&lookup)
        .writer(&writer)
        .build()
        .unwrap()
        .run()
        .unwrap()
        .report;

    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(
        report.errors,
        vec!["Failed to import product: Rug. Error: Unable to parse timestamp 'not a date'"]
    );

    let added_at: Option<chrono::NaiveDateTime> =
        sqlx::query_scalar("SELECT added_at FROM product_data WHERE code = 'A0001'")
            .fetch_one(&pool)
            .await?;
    assert_eq!(
        added_at.map(|at| at.to_string()).as_deref(),
        Some("2024-10-07 09:30:00")
    );

    Ok(())
}
