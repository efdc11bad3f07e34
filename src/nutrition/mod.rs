//! Text interpretation module
//!
//! Turns free-text food descriptions into meal types, food names and
//! estimated nutrition.

pub mod estimator;
pub mod keywords;
pub mod parser;

pub use estimator::{
    estimate, estimate_calories, estimate_carbs, estimate_fat, estimate_protein, lookup,
};
pub use keywords::{FoodProfile, MealKeywords, FOOD_PROFILES, MEAL_KEYWORDS};
pub use parser::{detect_meal_type, parse, strip_meal_keywords, ParsedFood};
