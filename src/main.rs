//! FoodTrack console
//!
//! Reads diary commands from stdin and writes one JSON reply per line to
//! stdout. Logging goes to stderr.

use chrono::{Local, Utc};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use foodtrack::config::Config;
use foodtrack::console::Console;
use foodtrack::db::{self, Database};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to keep stdout for replies)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("foodtrack=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    tracing::info!(path = %config.database_path.display(), "opening database");

    // Ensure data directory exists
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::new(&config.database_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        tracing::info!(version, "database ready");
        Ok(())
    })?;

    let user_id = config.user_id;
    let console = Console::new(database, config, Local);
    eprintln!("FoodTrack ready for user {}. Type /help for commands.", user_id);

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if let Some(reply) = console.handle_line(&line, Utc::now()) {
                    println!("{}", serde_json::to_string(&reply)?);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
