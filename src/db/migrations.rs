//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!(version = 1, "applied schema migration");
    }

    Ok(())
}

/// Migration v1: users and food entries
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- USERS
        -- One row per chat user, keyed by platform id
        -- ============================================
        CREATE TABLE users (
            user_id INTEGER PRIMARY KEY,
            username TEXT,
            first_name TEXT,
            last_name TEXT,
            language_code TEXT NOT NULL DEFAULT 'en',
            is_bot INTEGER NOT NULL DEFAULT 0,
            daily_calorie_goal REAL NOT NULL DEFAULT 2000,
            preferences TEXT NOT NULL,           -- JSON object
            created_at TEXT NOT NULL,            -- RFC 3339, UTC
            updated_at TEXT NOT NULL
        );

        -- ============================================
        -- FOOD ENTRIES
        -- Nutrition values are per unit; totals are value * quantity
        -- ============================================
        CREATE TABLE food_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,            -- lookup only, no cascade
            food_name TEXT NOT NULL,
            quantity REAL NOT NULL DEFAULT 1 CHECK(quantity > 0),
            unit TEXT NOT NULL DEFAULT 'serving'
                CHECK(unit IN ('serving', 'g', 'kg', 'ml', 'l',
                               'cup', 'tbsp', 'tsp', 'piece', 'slice')),

            calories REAL NOT NULL DEFAULT 0,
            protein REAL NOT NULL DEFAULT 0,     -- grams
            carbs REAL NOT NULL DEFAULT 0,       -- grams
            fat REAL NOT NULL DEFAULT 0,         -- grams
            fiber REAL NOT NULL DEFAULT 0,       -- grams
            sugar REAL NOT NULL DEFAULT 0,       -- grams

            meal_type TEXT NOT NULL DEFAULT 'snack'
                CHECK(meal_type IN ('breakfast', 'lunch', 'dinner', 'snack')),
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL             -- RFC 3339, UTC, millisecond precision
        );

        CREATE INDEX idx_food_entries_user ON food_entries(user_id);
        CREATE INDEX idx_food_entries_created ON food_entries(created_at);
        CREATE INDEX idx_food_entries_user_created ON food_entries(user_id, created_at);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
