//! SQLite user storage

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use super::store::{timestamp_from_row, timestamp_to_db, UserStore};
use super::{Database, DbError, DbResult};
use crate::models::{Preferences, User};

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    let raw_preferences: String = row.get("preferences")?;
    let preferences: Preferences = serde_json::from_str(&raw_preferences).map_err(|e| {
        let idx = row.as_ref().column_index("preferences").unwrap_or_default();
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })?;

    Ok(User {
        user_id: row.get("user_id")?,
        username: row.get("username")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        language_code: row.get("language_code")?,
        is_bot: row.get("is_bot")?,
        daily_calorie_goal: row.get("daily_calorie_goal")?,
        preferences,
        created_at: timestamp_from_row(row, "created_at")?,
        updated_at: timestamp_from_row(row, "updated_at")?,
    })
}

fn get_user(conn: &Connection, user_id: i64) -> DbResult<Option<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users WHERE user_id = ?1")?;

    let result = stmt.query_row([user_id], user_from_row);
    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl UserStore for Database {
    fn create_user(&self, user: &User) -> DbResult<User> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO users (
                    user_id, username, first_name, last_name, language_code,
                    is_bot, daily_calorie_goal, preferences, created_at, updated_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
                params![
                    user.user_id,
                    user.username,
                    user.first_name,
                    user.last_name,
                    user.language_code,
                    user.is_bot,
                    user.daily_calorie_goal,
                    serde_json::to_string(&user.preferences)?,
                    timestamp_to_db(&user.created_at),
                    timestamp_to_db(&user.updated_at),
                ],
            )?;

            tracing::debug!(user_id = user.user_id, "created user");
            get_user(conn, user.user_id)?
                .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
        })
    }

    fn get_user(&self, user_id: i64) -> DbResult<Option<User>> {
        self.with_conn(|conn| get_user(conn, user_id))
    }

    fn update_user(&self, user: &User) -> DbResult<bool> {
        self.with_conn(|conn| {
            let rows = conn.execute(
                r#"
                UPDATE users SET
                    username = ?1,
                    first_name = ?2,
                    last_name = ?3,
                    language_code = ?4,
                    is_bot = ?5,
                    daily_calorie_goal = ?6,
                    preferences = ?7,
                    updated_at = ?8
                WHERE user_id = ?9
                "#,
                params![
                    user.username,
                    user.first_name,
                    user.last_name,
                    user.language_code,
                    user.is_bot,
                    user.daily_calorie_goal,
                    serde_json::to_string(&user.preferences)?,
                    timestamp_to_db(&user.updated_at),
                    user.user_id,
                ],
            )?;
            Ok(rows > 0)
        })
    }

    fn delete_user(&self, user_id: i64) -> DbResult<bool> {
        self.with_conn(|conn| {
            let rows = conn.execute("DELETE FROM users WHERE user_id = ?1", [user_id])?;
            Ok(rows > 0)
        })
    }
}
