//! Calendar day windows and the single-day view

use chrono::{
    DateTime, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

use crate::models::FoodEntry;

/// Inclusive creation-time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// 00:00:00.000 through 23:59:59.999 of `date` in `tz`
    pub fn for_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        Self::for_days(date, date, tz)
    }

    /// Start of `first` through end of `last`, both local dates in `tz`
    pub fn for_days<Tz: TimeZone>(first: NaiveDate, last: NaiveDate, tz: &Tz) -> Self {
        Self {
            start: start_of_day(first, tz),
            end: end_of_day(last, tz),
        }
    }

    /// The `days` calendar days ending with `today`, inclusive
    pub fn last_days<Tz: TimeZone>(today: NaiveDate, days: u32, tz: &Tz) -> Self {
        Self::for_days(first_of_last_days(today, days), today, tz)
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }
}

/// First date of the `days` calendar days ending with `today`
///
/// Zero counts as one day. Windows reaching past the supported calendar stop
/// one day after its first date, so any zone offset stays representable.
pub fn first_of_last_days(today: NaiveDate, days: u32) -> NaiveDate {
    let floor = NaiveDate::MIN.succ_opt().unwrap_or(NaiveDate::MIN);
    let span = Days::new(u64::from(days.max(1) - 1));
    today
        .checked_sub_days(span)
        .map_or(floor, |first| first.max(floor))
        .min(today)
}

/// Day bounds for `date` in `tz` as UTC instants
pub fn day_bounds<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    (start_of_day(date, tz), end_of_day(date, tz))
}

fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    resolve_local(tz, date.and_time(NaiveTime::MIN), true)
}

fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let last_milli = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    resolve_local(tz, date.and_time(last_milli), false)
}

/// Map a wall-clock time to an instant
///
/// Ambiguous times (clocks going back) take the earliest or latest instant;
/// times inside a gap (clocks going forward) move past the gap.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime, earliest: bool) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(first, last) => {
            if earliest {
                first.with_timezone(&Utc)
            } else {
                last.with_timezone(&Utc)
            }
        }
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

/// Entries of one calendar day, latest first, with a calorie total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub date: NaiveDate,
    pub entries: Vec<FoodEntry>,
    pub total_calories: f64,
}

/// Build the view for `date` from entries already filtered to that day
///
/// Returns `None` when there is nothing to show.
pub fn day_view(date: NaiveDate, entries: &[FoodEntry]) -> Option<DayView> {
    if entries.is_empty() {
        return None;
    }

    let mut entries = entries.to_vec();
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let total_calories = entries.iter().map(FoodEntry::total_calories).sum();

    Some(DayView {
        date,
        entries,
        total_calories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodEntryCreate, Nutrition};
    use chrono::{FixedOffset, Timelike};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry_at(created_at: DateTime<Utc>, calories: f64, quantity: f64) -> FoodEntry {
        FoodEntry::create(
            FoodEntryCreate {
                user_id: 5,
                food_name: "toast".to_string(),
                quantity: Some(quantity),
                nutrition: Nutrition {
                    calories,
                    ..Nutrition::zero()
                },
                ..Default::default()
            },
            created_at,
        )
        .unwrap()
    }

    #[test]
    fn test_day_bounds_in_utc() {
        let (start, end) = day_bounds(date(2025, 6, 15), &Utc);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap());
        assert_eq!(end.date_naive(), date(2025, 6, 15));
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert_eq!(end.nanosecond(), 999_000_000);
    }

    #[test]
    fn test_day_bounds_follow_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let (start, end) = day_bounds(date(2025, 6, 15), &tz);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 6, 14, 22, 0, 0).unwrap());
        assert_eq!(end.hour(), 21);
        assert_eq!(end.date_naive(), date(2025, 6, 15));
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = TimeRange::for_day(date(2025, 6, 15), &Utc);
        assert!(range.contains(&range.start));
        assert!(range.contains(&range.end));
        assert!(!range.contains(&(range.end + Duration::milliseconds(1))));
        assert!(!range.contains(&(range.start - Duration::milliseconds(1))));
    }

    #[test]
    fn test_last_days_window() {
        let range = TimeRange::last_days(date(2025, 6, 15), 7, &Utc);
        assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 6, 9, 0, 0, 0).unwrap());
        assert_eq!(range.end.date_naive(), date(2025, 6, 15));

        // Zero days still covers today
        let today_only = TimeRange::last_days(date(2025, 6, 15), 0, &Utc);
        assert_eq!(today_only, TimeRange::for_day(date(2025, 6, 15), &Utc));
    }

    #[test]
    fn test_last_days_beyond_the_calendar_saturates() {
        let today = date(2025, 6, 15);
        let first = first_of_last_days(today, u32::MAX);
        assert!(first < date(-200_000, 1, 1));

        let tz = FixedOffset::east_opt(14 * 3600).unwrap();
        let range = TimeRange::last_days(today, u32::MAX, &tz);
        assert!(range.contains(&Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()));
        assert_eq!(range.end, TimeRange::for_day(today, &tz).end);
    }

    /// Zone whose offset changes from `before` to `after` at `switch` (UTC)
    #[derive(Debug, Clone)]
    struct SwitchingZone {
        switch: NaiveDateTime,
        before: FixedOffset,
        after: FixedOffset,
    }

    impl SwitchingZone {
        fn new(switch: DateTime<Utc>, before_hours: i32, after_hours: i32) -> Self {
            Self {
                switch: switch.naive_utc(),
                before: FixedOffset::east_opt(before_hours * 3600).unwrap(),
                after: FixedOffset::east_opt(after_hours * 3600).unwrap(),
            }
        }
    }

    impl TimeZone for SwitchingZone {
        type Offset = FixedOffset;

        fn from_offset(offset: &FixedOffset) -> Self {
            Self {
                switch: NaiveDateTime::MIN,
                before: *offset,
                after: *offset,
            }
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let as_utc = |offset: FixedOffset| {
                *local - Duration::seconds(i64::from(offset.local_minus_utc()))
            };
            let fits_before = as_utc(self.before) < self.switch;
            let fits_after = as_utc(self.after) >= self.switch;
            match (fits_before, fits_after) {
                (true, true) => LocalResult::Ambiguous(self.before, self.after),
                (true, false) => LocalResult::Single(self.before),
                (false, true) => LocalResult::Single(self.after),
                (false, false) => LocalResult::None,
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < self.switch {
                self.before
            } else {
                self.after
            }
        }
    }

    #[test]
    fn test_repeated_midnight_widens_the_day() {
        // Clocks go back from UTC+1 to UTC+0 at 23:30 UTC, so local times
        // from 23:30 to 00:30 around midnight occur twice
        let tz = SwitchingZone::new(Utc.with_ymd_and_hms(2025, 10, 25, 23, 30, 0).unwrap(), 1, 0);

        let (start, _) = day_bounds(date(2025, 10, 26), &tz);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 10, 25, 23, 0, 0).unwrap());

        let (_, end) = day_bounds(date(2025, 10, 25), &tz);
        assert_eq!(end.date_naive(), date(2025, 10, 25));
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
    }

    #[test]
    fn test_skipped_midnight_starts_after_the_gap() {
        // Clocks jump from UTC+0 to UTC+1 at midnight, local 00:00 never happens
        let tz = SwitchingZone::new(Utc.with_ymd_and_hms(2025, 3, 30, 0, 0, 0).unwrap(), 0, 1);

        let (start, end) = day_bounds(date(2025, 3, 30), &tz);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 30, 0, 0, 0).unwrap());
        assert_eq!(end.hour(), 22);
    }

    #[test]
    fn test_day_view_lists_latest_first_with_total() {
        let entries = vec![
            entry_at(Utc.with_ymd_and_hms(2025, 6, 15, 8, 0, 0).unwrap(), 150.0, 1.0),
            entry_at(Utc.with_ymd_and_hms(2025, 6, 15, 19, 0, 0).unwrap(), 400.0, 1.0),
            entry_at(Utc.with_ymd_and_hms(2025, 6, 15, 13, 0, 0).unwrap(), 250.0, 2.0),
        ];
        let view = day_view(date(2025, 6, 15), &entries).unwrap();
        let hours: Vec<u32> = view.entries.iter().map(|e| e.created_at.hour()).collect();
        assert_eq!(hours, vec![19, 13, 8]);
        assert_eq!(view.total_calories, 1050.0);
    }

    #[test]
    fn test_day_view_without_entries_is_no_data() {
        assert!(day_view(date(2025, 6, 15), &[]).is_none());
    }
}
