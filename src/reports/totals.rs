//! Nutrition totals over a set of entries

use serde::{Deserialize, Serialize};

use crate::models::{FoodEntry, Nutrition};

/// Summed nutrition for a set of entries
///
/// A plain fold: callers pre-filter to the window they want summed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    #[serde(flatten)]
    pub nutrition: Nutrition,
    pub entry_count: usize,
}

impl DailyTotals {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Fold one entry's per-unit values times quantity into the totals
    pub fn add_entry(&self, entry: &FoodEntry) -> Self {
        Self {
            nutrition: self.nutrition + entry.nutritional_summary(),
            entry_count: self.entry_count + 1,
        }
    }
}

impl std::ops::Add for DailyTotals {
    type Output = DailyTotals;

    fn add(self, other: DailyTotals) -> DailyTotals {
        DailyTotals {
            nutrition: self.nutrition + other.nutrition,
            entry_count: self.entry_count + other.entry_count,
        }
    }
}

impl std::iter::Sum for DailyTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(DailyTotals::zero(), |acc, t| acc + t)
    }
}

/// Sum every entry's nutrition; an empty input yields all zeros
pub fn daily_totals<'a, I>(entries: I) -> DailyTotals
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    entries
        .into_iter()
        .fold(DailyTotals::zero(), |totals, entry| totals.add_entry(entry))
}

/// Consumption against a daily calorie goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieProgress {
    pub goal: f64,
    pub consumed: f64,
    /// Negative once the goal is exceeded
    pub remaining: f64,
    pub percent: f64,
}

pub fn calorie_progress(goal: f64, totals: &DailyTotals) -> CalorieProgress {
    let consumed = totals.nutrition.calories;
    let percent = if goal > 0.0 { consumed / goal * 100.0 } else { 0.0 };
    CalorieProgress {
        goal,
        consumed,
        remaining: goal - consumed,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodEntryCreate;
    use chrono::{TimeZone, Utc};

    fn entry(calories: f64, protein: f64, quantity: f64) -> FoodEntry {
        FoodEntry::create(
            FoodEntryCreate {
                user_id: 1,
                food_name: "food".to_string(),
                quantity: Some(quantity),
                nutrition: Nutrition {
                    calories,
                    protein,
                    carbs: 1.0,
                    fat: 1.0,
                    fiber: 0.5,
                    sugar: 0.25,
                },
                ..Default::default()
            },
            Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let totals = daily_totals(&[] as &[FoodEntry]);
        assert_eq!(totals, DailyTotals::zero());
        assert_eq!(totals.entry_count, 0);
    }

    #[test]
    fn test_sums_quantity_scaled_values() {
        let entries = vec![entry(100.0, 10.0, 2.0), entry(50.0, 4.0, 1.0)];
        let totals = daily_totals(&entries);
        assert_eq!(totals.nutrition.calories, 250.0);
        assert_eq!(totals.nutrition.protein, 24.0);
        assert_eq!(totals.nutrition.carbs, 3.0);
        assert_eq!(totals.nutrition.fiber, 1.5);
        assert_eq!(totals.nutrition.sugar, 0.75);
        assert_eq!(totals.entry_count, 2);
    }

    #[test]
    fn test_split_sums_combine_to_whole() {
        let entries = vec![
            entry(100.0, 10.0, 2.0),
            entry(50.0, 4.0, 1.0),
            entry(320.0, 12.0, 0.5),
            entry(80.0, 3.0, 3.0),
        ];
        let (left, right) = entries.split_at(1);
        let combined = daily_totals(left) + daily_totals(right);
        assert_eq!(combined, daily_totals(&entries));

        let reversed: Vec<FoodEntry> = entries.iter().rev().cloned().collect();
        assert_eq!(daily_totals(&reversed), daily_totals(&entries));
    }

    #[test]
    fn test_serializes_flat() {
        let json = serde_json::to_value(daily_totals(&[entry(10.0, 1.0, 1.0)])).unwrap();
        assert_eq!(json["calories"], 10.0);
        assert_eq!(json["entryCount"], 1);
    }

    #[test]
    fn test_calorie_progress() {
        let totals = daily_totals(&[entry(500.0, 0.0, 1.0), entry(1000.0, 0.0, 1.0)]);
        let progress = calorie_progress(2000.0, &totals);
        assert_eq!(progress.consumed, 1500.0);
        assert_eq!(progress.remaining, 500.0);
        assert_eq!(progress.percent, 75.0);

        let over = calorie_progress(1000.0, &totals);
        assert_eq!(over.remaining, -500.0);
    }
}
