//! Food description parser
//!
//! Splits free text such as "breakfast oatmeal with fruits" into a meal type
//! and a cleaned food name.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::keywords::{all_meal_keywords, MEAL_KEYWORDS};
use crate::models::MealType;

/// Result of parsing a food description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFood {
    pub meal_type: MealType,
    pub food_name: String,
}

fn build_meal_keyword_pattern() -> String {
    let alternatives: Vec<String> = all_meal_keywords().map(regex::escape).collect();
    format!(r"(?i)\b(?:{})\b", alternatives.join("|"))
}

lazy_static! {
    static ref MEAL_KEYWORD_REGEX: Regex = Regex::new(&build_meal_keyword_pattern())
        .expect("meal keyword pattern should be valid");
}

/// Detect the meal type by keyword presence, first matching set wins
pub fn detect_meal_type(text: &str) -> MealType {
    let lower = text.to_lowercase();
    MEAL_KEYWORDS
        .iter()
        .find(|set| set.keywords.iter().any(|kw| lower.contains(kw)))
        .map(|set| set.meal_type)
        .unwrap_or_default()
}

/// Remove whole-word meal keywords from the text
///
/// Falls back to the untouched input when nothing else remains.
pub fn strip_meal_keywords(text: &str) -> String {
    if !MEAL_KEYWORD_REGEX.is_match(text) {
        return text.trim().to_string();
    }

    let stripped = MEAL_KEYWORD_REGEX.replace_all(text, "");
    let cleaned = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        text.to_string()
    } else {
        cleaned
    }
}

/// Parse a free-text food description
pub fn parse(text: &str) -> ParsedFood {
    ParsedFood {
        meal_type: detect_meal_type(text),
        food_name: strip_meal_keywords(text),
    }
}
