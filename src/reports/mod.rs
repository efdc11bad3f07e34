//! Aggregation and reporting
//!
//! Stateless computations over entries fetched by the caller. An empty input
//! is reported as `None` ("no data") rather than an error.

pub mod day;
pub mod period;
pub mod totals;

pub use day::{day_bounds, day_view, first_of_last_days, DayView, TimeRange};
pub use period::{
    average_per_day, daily_breakdown, days_with_entries, group_by_day, history_stats,
    period_stats, recent_days, recent_entries, DayGroup, DaySummary, HistoryStats, PeriodStats,
    DEFAULT_RECENT_DAYS, DEFAULT_RECENT_ENTRIES,
};
pub use totals::{calorie_progress, daily_totals, CalorieProgress, DailyTotals};
