//! Multi-day statistics
//!
//! Two recency views exist side by side: a flat list of the most recent
//! entries (period reports) and the most recent calendar days with their
//! entries (history report). They are separate operations on purpose.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::totals::{daily_totals, DailyTotals};
use crate::models::FoodEntry;

/// Entries in flat period reports
pub const DEFAULT_RECENT_ENTRIES: usize = 5;
/// Calendar days in the history report
pub const DEFAULT_RECENT_DAYS: usize = 3;

/// Statistics over a date window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub totals: DailyTotals,
    pub days_with_entries: usize,
    pub average_per_day: f64,
    pub recent_entries: Vec<FoodEntry>,
}

/// Entries of one calendar day, in logging order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    pub date: NaiveDate,
    pub entries: Vec<FoodEntry>,
}

/// Diary-wide statistics with the most recent days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub days_with_entries: usize,
    pub entry_count: usize,
    pub average_per_day: f64,
    pub recent_days: Vec<DayGroup>,
}

/// Totals for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    pub totals: DailyTotals,
}

/// Entry count divided by day count; zero days yields zero
pub fn average_per_day(entry_count: usize, days: usize) -> f64 {
    if days == 0 {
        return 0.0;
    }
    entry_count as f64 / days as f64
}

/// Group entries by local calendar date, each day in chronological order
pub fn group_by_day<'a, Tz: TimeZone>(
    entries: &'a [FoodEntry],
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<&'a FoodEntry>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&FoodEntry>> = BTreeMap::new();
    for entry in entries {
        by_date.entry(entry.local_date(tz)).or_default().push(entry);
    }
    for day in by_date.values_mut() {
        day.sort_by_key(|e| e.created_at);
    }
    by_date
}

/// Number of distinct local calendar dates
pub fn days_with_entries<Tz: TimeZone>(entries: &[FoodEntry], tz: &Tz) -> usize {
    group_by_day(entries, tz).len()
}

/// The `limit` newest entries, newest first
pub fn recent_entries(entries: &[FoodEntry], limit: usize) -> Vec<FoodEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}

/// The `days` most recent calendar days, oldest of them first
pub fn recent_days<Tz: TimeZone>(entries: &[FoodEntry], tz: &Tz, days: usize) -> Vec<DayGroup> {
    let grouped = group_by_day(entries, tz);
    let skip = grouped.len().saturating_sub(days);
    grouped
        .into_iter()
        .skip(skip)
        .map(|(date, day)| DayGroup {
            date,
            entries: day.into_iter().cloned().collect(),
        })
        .collect()
}

/// Statistics for entries already filtered to a window
///
/// Returns `None` when there are no entries.
pub fn period_stats<Tz: TimeZone>(
    entries: &[FoodEntry],
    tz: &Tz,
    recent_limit: usize,
) -> Option<PeriodStats> {
    if entries.is_empty() {
        return None;
    }

    let totals = daily_totals(entries);
    let days = days_with_entries(entries, tz);

    Some(PeriodStats {
        totals,
        days_with_entries: days,
        average_per_day: average_per_day(totals.entry_count, days),
        recent_entries: recent_entries(entries, recent_limit),
    })
}

/// Whole-diary statistics with the last `recent_day_count` days listed
///
/// Returns `None` when there are no entries.
pub fn history_stats<Tz: TimeZone>(
    entries: &[FoodEntry],
    tz: &Tz,
    recent_day_count: usize,
) -> Option<HistoryStats> {
    if entries.is_empty() {
        return None;
    }

    let days = days_with_entries(entries, tz);
    Some(HistoryStats {
        days_with_entries: days,
        entry_count: entries.len(),
        average_per_day: average_per_day(entries.len(), days),
        recent_days: recent_days(entries, tz, recent_day_count),
    })
}

/// Per-day totals in ascending date order
pub fn daily_breakdown<Tz: TimeZone>(entries: &[FoodEntry], tz: &Tz) -> Vec<DaySummary> {
    group_by_day(entries, tz)
        .into_iter()
        .map(|(date, day)| DaySummary {
            date,
            totals: daily_totals(day),
        })
        .collect()
}
