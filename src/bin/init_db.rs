//! Utility to create or upgrade the diary database schema

use foodtrack::config::Config;
use foodtrack::db::{migrations, Database};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    println!("Database path: {}", config.database_path.display());

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::new(&config.database_path)?;

    database.with_conn(|conn| {
        if !migrations::needs_migration(conn)? {
            println!("Schema is up to date");
        }
        migrations::run_migrations(conn)?;
        println!("Schema version: {}", migrations::get_schema_version(conn)?);
        Ok(())
    })?;

    Ok(())
}
