//! Load conversion factors from a CSV export into the database
//! Usage: cargo run --bin import_conversions -- <file.csv>

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("unitconv=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(csv_path) = args.get(1) else {
        eprintln!("Usage: import_conversions <file.csv>");
        std::process::exit(2);
    };

    let db_path = unitconv::db::default_database_path();
    println!("Database: {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = unitconv::db::Database::new(&db_path)?;
    database.with_conn(|conn| {
        unitconv::db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    let result = unitconv::tools::import::import_conversion_csv(&database, csv_path)?;

    println!("Imported {} of {} rows from {}", result.imported, result.total_rows, result.file_path);
    for error in &result.errors {
        println!("  skipped {}", error);
    }

    Ok(())
}
