//! Keyword tables
//!
//! Matching policy for the parser and estimator lives here as ordered data.
//! Earlier rows win, so more specific foods come first.

use crate::models::MealType;

/// Meal type trigger words (English, Russian, transliterated Russian)
pub struct MealKeywords {
    pub meal_type: MealType,
    pub keywords: &'static [&'static str],
}

/// Checked in order; snack has no triggers and is the fallback
pub const MEAL_KEYWORDS: &[MealKeywords] = &[
    MealKeywords {
        meal_type: MealType::Breakfast,
        keywords: &["breakfast", "завтрак", "zavtrak"],
    },
    MealKeywords {
        meal_type: MealType::Lunch,
        keywords: &["lunch", "обед", "obed"],
    },
    MealKeywords {
        meal_type: MealType::Dinner,
        keywords: &["dinner", "supper", "ужин", "uzhin"],
    },
];

/// Approximate per-serving values for a family of foods
pub struct FoodProfile {
    /// Lower-case substrings, matched anywhere in the food name
    pub keywords: &'static [&'static str],
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

const fn food(
    keywords: &'static [&'static str],
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
) -> FoodProfile {
    FoodProfile {
        keywords,
        calories,
        protein,
        carbs,
        fat,
    }
}

pub const FOOD_PROFILES: &[FoodProfile] = &[
    food(&["chicken", "курица", "курин"], 165.0, 31.0, 0.0, 3.6),
    food(&["beef", "steak", "говядин", "стейк"], 250.0, 26.0, 0.0, 15.0),
    food(&["pork", "свинин"], 242.0, 27.0, 0.0, 14.0),
    food(&["fish", "salmon", "рыба", "лосось"], 206.0, 22.0, 0.0, 12.0),
    food(&["egg", "яйц", "яичниц"], 78.0, 6.0, 0.6, 5.0),
    food(&["oatmeal", "porridge", "овсянк", "каша"], 150.0, 5.0, 27.0, 3.0),
    food(&["rice", "рис"], 205.0, 4.3, 45.0, 0.4),
    food(&["pasta", "spaghetti", "макарон", "паста"], 220.0, 8.0, 43.0, 1.3),
    food(&["pizza", "пицц"], 285.0, 12.0, 36.0, 10.0),
    food(&["burger", "бургер"], 354.0, 17.0, 29.0, 19.0),
    food(&["sandwich", "бутерброд", "сэндвич"], 250.0, 11.0, 30.0, 9.0),
    food(&["bread", "toast", "хлеб", "тост"], 80.0, 3.0, 15.0, 1.0),
    food(&["cheese", "сыр"], 113.0, 7.0, 0.4, 9.0),
    food(&["yogurt", "йогурт"], 100.0, 9.0, 12.0, 2.0),
    food(&["milk", "молок"], 103.0, 8.0, 12.0, 2.4),
    food(&["salad", "салат"], 150.0, 3.0, 10.0, 10.0),
    food(&["soup", "суп", "борщ"], 120.0, 6.0, 14.0, 4.0),
    food(&["banana", "банан"], 105.0, 1.3, 27.0, 0.4),
    food(&["apple", "яблок"], 95.0, 0.5, 25.0, 0.3),
    food(&["coffee", "кофе"], 5.0, 0.3, 0.0, 0.0),
    food(&["tea", "чай"], 2.0, 0.0, 0.5, 0.0),
];

/// Length-based fallback: `clamp(chars * factor, min, max)`
#[derive(Debug, Clone, Copy)]
pub struct Fallback {
    pub factor: f64,
    pub min: f64,
    pub max: f64,
}

impl Fallback {
    pub fn apply(&self, food_name: &str) -> f64 {
        let length = food_name.chars().count() as f64;
        (length * self.factor).clamp(self.min, self.max)
    }
}

pub const CALORIES_FALLBACK: Fallback = Fallback {
    factor: 10.0,
    min: 50.0,
    max: 500.0,
};
pub const PROTEIN_FALLBACK: Fallback = Fallback {
    factor: 0.5,
    min: 2.0,
    max: 30.0,
};
pub const CARBS_FALLBACK: Fallback = Fallback {
    factor: 0.8,
    min: 5.0,
    max: 50.0,
};
pub const FAT_FALLBACK: Fallback = Fallback {
    factor: 0.3,
    min: 1.0,
    max: 20.0,
};

/// Every meal keyword across all sets
pub fn all_meal_keywords() -> impl Iterator<Item = &'static str> {
    MEAL_KEYWORDS.iter().flat_map(|set| set.keywords.iter().copied())
}
