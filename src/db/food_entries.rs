//! SQLite food entry storage

use rusqlite::{params, Connection, Row};

use super::store::{timestamp_from_row, timestamp_to_db, FoodEntryStore};
use super::{Database, DbError, DbResult};
use crate::models::{EntryId, FoodEntry, MealType, Nutrition, Unit};
use crate::reports::{DailyTotals, TimeRange};

fn entry_from_row(row: &Row) -> rusqlite::Result<FoodEntry> {
    let unit: String = row.get("unit")?;
    let meal_type: String = row.get("meal_type")?;
    Ok(FoodEntry {
        id: Some(EntryId(row.get("id")?)),
        user_id: row.get("user_id")?,
        food_name: row.get("food_name")?,
        quantity: row.get("quantity")?,
        unit: Unit::from_name(&unit).unwrap_or_default(),
        nutrition: Nutrition {
            calories: row.get("calories")?,
            protein: row.get("protein")?,
            carbs: row.get("carbs")?,
            fat: row.get("fat")?,
            fiber: row.get("fiber")?,
            sugar: row.get("sugar")?,
        },
        meal_type: MealType::from_name(&meal_type).unwrap_or_default(),
        notes: row.get("notes")?,
        created_at: timestamp_from_row(row, "created_at")?,
    })
}

fn get_entry(conn: &Connection, user_id: i64, id: EntryId) -> DbResult<Option<FoodEntry>> {
    let mut stmt = conn.prepare("SELECT * FROM food_entries WHERE id = ?1 AND user_id = ?2")?;

    let result = stmt.query_row(params![id.0, user_id], entry_from_row);
    match result {
        Ok(entry) => Ok(Some(entry)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl FoodEntryStore for Database {
    fn create_entry(&self, entry: &FoodEntry) -> DbResult<FoodEntry> {
        self.with_conn(|conn| {
            let n = &entry.nutrition;
            conn.execute(
                r#"
                INSERT INTO food_entries (
                    user_id, food_name, quantity, unit,
                    calories, protein, carbs, fat, fiber, sugar,
                    meal_type, notes, created_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                "#,
                params![
                    entry.user_id,
                    entry.food_name,
                    entry.quantity,
                    entry.unit.as_str(),
                    n.calories,
                    n.protein,
                    n.carbs,
                    n.fat,
                    n.fiber,
                    n.sugar,
                    entry.meal_type.as_str(),
                    entry.notes,
                    timestamp_to_db(&entry.created_at),
                ],
            )?;

            let id = EntryId(conn.last_insert_rowid());
            tracing::debug!(user_id = entry.user_id, entry_id = %id, "created food entry");
            get_entry(conn, entry.user_id, id)?
                .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
        })
    }

    fn get_entry(&self, user_id: i64, id: EntryId) -> DbResult<Option<FoodEntry>> {
        self.with_conn(|conn| get_entry(conn, user_id, id))
    }

    fn list_entries(&self, user_id: i64, range: Option<TimeRange>) -> DbResult<Vec<FoodEntry>> {
        self.with_conn(|conn| {
            let mut sql = String::from("SELECT * FROM food_entries WHERE user_id = ?1");
            let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id)];

            if let Some(range) = range {
                params_vec.push(Box::new(timestamp_to_db(&range.start)));
                sql.push_str(&format!(" AND created_at >= ?{}", params_vec.len()));
                params_vec.push(Box::new(timestamp_to_db(&range.end)));
                sql.push_str(&format!(" AND created_at <= ?{}", params_vec.len()));
            }

            sql.push_str(" ORDER BY created_at DESC, id DESC");

            let mut stmt = conn.prepare(&sql)?;
            let params_refs: Vec<&dyn rusqlite::ToSql> =
                params_vec.iter().map(|p| p.as_ref()).collect();

            let entries = stmt
                .query_map(params_refs.as_slice(), entry_from_row)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(entries)
        })
    }

    fn update_entry(&self, entry: &FoodEntry) -> DbResult<bool> {
        let Some(id) = entry.id else {
            return Ok(false);
        };

        self.with_conn(|conn| {
            let n = &entry.nutrition;
            let rows = conn.execute(
                r#"
                UPDATE food_entries SET
                    food_name = ?1,
                    quantity = ?2,
                    unit = ?3,
                    calories = ?4,
                    protein = ?5,
                    carbs = ?6,
                    fat = ?7,
                    fiber = ?8,
                    sugar = ?9,
                    meal_type = ?10,
                    notes = ?11
                WHERE id = ?12 AND user_id = ?13
                "#,
                params![
                    entry.food_name,
                    entry.quantity,
                    entry.unit.as_str(),
                    n.calories,
                    n.protein,
                    n.carbs,
                    n.fat,
                    n.fiber,
                    n.sugar,
                    entry.meal_type.as_str(),
                    entry.notes,
                    id.0,
                    entry.user_id,
                ],
            )?;
            Ok(rows > 0)
        })
    }

    fn delete_entry(&self, user_id: i64, id: EntryId) -> DbResult<bool> {
        self.with_conn(|conn| {
            let rows = conn.execute(
                "DELETE FROM food_entries WHERE id = ?1 AND user_id = ?2",
                params![id.0, user_id],
            )?;
            Ok(rows > 0)
        })
    }

    fn sum_entries(&self, user_id: i64, range: TimeRange) -> DbResult<DailyTotals> {
        self.with_conn(|conn| {
            let totals = conn.query_row(
                r#"
                SELECT
                    COALESCE(SUM(calories * quantity), 0),
                    COALESCE(SUM(protein * quantity), 0),
                    COALESCE(SUM(carbs * quantity), 0),
                    COALESCE(SUM(fat * quantity), 0),
                    COALESCE(SUM(fiber * quantity), 0),
                    COALESCE(SUM(sugar * quantity), 0),
                    COUNT(*)
                FROM food_entries
                WHERE user_id = ?1 AND created_at >= ?2 AND created_at <= ?3
                "#,
                params![
                    user_id,
                    timestamp_to_db(&range.start),
                    timestamp_to_db(&range.end),
                ],
                |row| {
                    let count: i64 = row.get(6)?;
                    Ok(DailyTotals {
                        nutrition: Nutrition {
                            calories: row.get(0)?,
                            protein: row.get(1)?,
                            carbs: row.get(2)?,
                            fat: row.get(3)?,
                            fiber: row.get(4)?,
                            sugar: row.get(5)?,
                        },
                        entry_count: usize::try_from(count).unwrap_or_default(),
                    })
                },
            )?;
            Ok(totals)
        })
    }
}
