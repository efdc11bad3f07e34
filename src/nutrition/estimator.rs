//! Nutrition estimator
//!
//! Deterministic placeholder for a real nutrition source: a keyword lookup in
//! [`FOOD_PROFILES`] with a length-based fallback when nothing matches.

use super::keywords::{
    FoodProfile, CALORIES_FALLBACK, CARBS_FALLBACK, FAT_FALLBACK, FOOD_PROFILES, PROTEIN_FALLBACK,
};
use crate::models::Nutrition;

/// First profile whose keyword occurs in the lower-cased food name
pub fn lookup(food_name: &str) -> Option<&'static FoodProfile> {
    let lower = food_name.to_lowercase();
    FOOD_PROFILES
        .iter()
        .find(|profile| profile.keywords.iter().any(|kw| lower.contains(kw)))
}

pub fn estimate_calories(food_name: &str) -> f64 {
    lookup(food_name)
        .map(|p| p.calories)
        .unwrap_or_else(|| CALORIES_FALLBACK.apply(food_name))
}

pub fn estimate_protein(food_name: &str) -> f64 {
    lookup(food_name)
        .map(|p| p.protein)
        .unwrap_or_else(|| PROTEIN_FALLBACK.apply(food_name))
}

pub fn estimate_carbs(food_name: &str) -> f64 {
    lookup(food_name)
        .map(|p| p.carbs)
        .unwrap_or_else(|| CARBS_FALLBACK.apply(food_name))
}

pub fn estimate_fat(food_name: &str) -> f64 {
    lookup(food_name)
        .map(|p| p.fat)
        .unwrap_or_else(|| FAT_FALLBACK.apply(food_name))
}

/// Full estimate; fiber and sugar are not modeled and stay at zero
pub fn estimate(food_name: &str) -> Nutrition {
    let nutrition = Nutrition {
        calories: estimate_calories(food_name),
        protein: estimate_protein(food_name),
        carbs: estimate_carbs(food_name),
        fat: estimate_fat(food_name),
        ..Nutrition::zero()
    };
    tracing::debug!(food_name, calories = nutrition.calories, "estimated nutrition");
    nutrition
}
