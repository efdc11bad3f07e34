//! Model validation errors

use thiserror::Error;

/// Reasons a user or food entry fails its invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("user id is required")]
    MissingUserId,

    #[error("food name must not be empty")]
    EmptyFoodName,

    #[error("quantity must be a positive number, got {0}")]
    InvalidQuantity(f64),

    #[error("{nutrient} must be a non-negative number, got {value}")]
    InvalidNutrient { nutrient: &'static str, value: f64 },

    #[error("daily calorie goal must be a positive number, got {0}")]
    InvalidCalorieGoal(f64),
}
