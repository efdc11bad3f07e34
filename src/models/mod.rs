//! Data models
//!
//! Plain value types for diary users and food entries.

mod food_entry;
mod nutrition;
mod user;
mod validation;

pub use food_entry::{
    EntryId, FoodEntry, FoodEntryCreate, FoodEntryUpdate, MealType, NutritionUpdate, Unit,
};
pub use nutrition::Nutrition;
pub use user::{
    Preferences, PreferencesUpdate, ProfileUpdate, UnitSystem, User, UserCreate,
    DEFAULT_CALORIE_GOAL, DEFAULT_LANGUAGE_CODE, DEFAULT_REMINDER_TIME,
};
pub use validation::ValidationError;
