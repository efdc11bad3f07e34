//! Diary Tools
//!
//! Logging food from free text and the day, period and history reports.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::db::{FoodEntryStore, UserStore};
use crate::error::{DiaryError, DiaryResult};
use crate::models::{EntryId, FoodEntry, FoodEntryCreate, FoodEntryUpdate};
use crate::nutrition::{self, ParsedFood};
use crate::reports::{
    calorie_progress, daily_breakdown, day_view, first_of_last_days, history_stats, period_stats,
    CalorieProgress, DaySummary, DayView, HistoryStats, PeriodStats, TimeRange,
};

/// Response for log_food
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFoodResponse {
    pub entry: FoodEntry,
    pub parsed: ParsedFood,
}

/// Response for period_report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    #[serde(flatten)]
    pub stats: PeriodStats,
    pub breakdown: Vec<DaySummary>,
}

/// Response for daily_progress
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub progress: CalorieProgress,
    pub entry_count: usize,
}

/// Local calendar date of `now` in `tz`
pub fn today<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}

/// Parse a free-text description, estimate its nutrition and store it
pub fn log_food<S: FoodEntryStore>(
    store: &S,
    user_id: i64,
    text: &str,
    now: DateTime<Utc>,
) -> DiaryResult<LogFoodResponse> {
    let parsed = nutrition::parse(text);
    let estimated = nutrition::estimate(&parsed.food_name);

    let entry = add_entry(
        store,
        FoodEntryCreate {
            user_id,
            food_name: parsed.food_name.clone(),
            nutrition: estimated,
            meal_type: Some(parsed.meal_type),
            ..Default::default()
        },
        now,
    )?;

    tracing::info!(
        user_id,
        entry_id = ?entry.id,
        meal_type = %entry.meal_type,
        calories = entry.nutrition.calories,
        "logged food"
    );

    Ok(LogFoodResponse { entry, parsed })
}

/// Validate and store an entry with caller-supplied nutrition
pub fn add_entry<S: FoodEntryStore>(
    store: &S,
    data: FoodEntryCreate,
    now: DateTime<Utc>,
) -> DiaryResult<FoodEntry> {
    let entry = FoodEntry::create(data, now)?;
    Ok(store.create_entry(&entry)?)
}

pub fn get_entry<S: FoodEntryStore>(
    store: &S,
    user_id: i64,
    id: EntryId,
) -> DiaryResult<FoodEntry> {
    store
        .get_entry(user_id, id)?
        .ok_or(DiaryError::EntryNotFound(id))
}

/// Change the mutable fields of an entry
///
/// Unknown meal type and unit names in `update` are ignored.
pub fn update_entry<S: FoodEntryStore>(
    store: &S,
    user_id: i64,
    id: EntryId,
    update: &FoodEntryUpdate,
) -> DiaryResult<FoodEntry> {
    let entry = get_entry(store, user_id, id)?.apply_update(update)?;
    if !store.update_entry(&entry)? {
        return Err(DiaryError::EntryNotFound(id));
    }
    Ok(entry)
}

pub fn delete_entry<S: FoodEntryStore>(store: &S, user_id: i64, id: EntryId) -> DiaryResult<()> {
    if !store.delete_entry(user_id, id)? {
        return Err(DiaryError::EntryNotFound(id));
    }
    tracing::info!(user_id, entry_id = %id, "deleted food entry");
    Ok(())
}

/// Entries of one local calendar day, or `None` when nothing was logged
pub fn view_day<S: FoodEntryStore, Tz: TimeZone>(
    store: &S,
    user_id: i64,
    date: NaiveDate,
    tz: &Tz,
) -> DiaryResult<Option<DayView>> {
    let entries = store.list_entries(user_id, Some(TimeRange::for_day(date, tz)))?;
    Ok(day_view(date, &entries))
}

/// Statistics for the `days` calendar days ending with `today`
pub fn period_report<S: FoodEntryStore, Tz: TimeZone>(
    store: &S,
    user_id: i64,
    today: NaiveDate,
    days: u32,
    tz: &Tz,
    recent_limit: usize,
) -> DiaryResult<Option<PeriodReport>> {
    let from = first_of_last_days(today, days);
    let entries = store.list_entries(user_id, Some(TimeRange::for_days(from, today, tz)))?;

    let Some(stats) = period_stats(&entries, tz, recent_limit) else {
        return Ok(None);
    };

    Ok(Some(PeriodReport {
        from,
        to: today,
        stats,
        breakdown: daily_breakdown(&entries, tz),
    }))
}

/// Whole-diary statistics with the most recent days grouped
pub fn history<S: FoodEntryStore, Tz: TimeZone>(
    store: &S,
    user_id: i64,
    tz: &Tz,
    recent_days: usize,
) -> DiaryResult<Option<HistoryStats>> {
    let entries = store.list_entries(user_id, None)?;
    Ok(history_stats(&entries, tz, recent_days))
}

/// Calories eaten on `date` against the user's goal
pub fn daily_progress<S, Tz>(
    store: &S,
    user_id: i64,
    date: NaiveDate,
    tz: &Tz,
) -> DiaryResult<DailyProgress>
where
    S: UserStore + FoodEntryStore,
    Tz: TimeZone,
{
    let user = store
        .get_user(user_id)?
        .ok_or(DiaryError::UserNotFound(user_id))?;
    let totals = store.sum_entries(user_id, TimeRange::for_day(date, tz))?;

    Ok(DailyProgress {
        date,
        progress: calorie_progress(user.daily_calorie_goal, &totals),
        entry_count: totals.entry_count,
    })
}
