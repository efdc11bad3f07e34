//! Food Entry model
//!
//! One logged meal with per-unit nutrition. Entries are plain values: every
//! change goes through a `with_*` constructor that returns a new entry.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::{Nutrition, ValidationError};

/// Meal type enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Look up a meal type by name; unknown names yield `None`
    pub fn from_name(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|m| m.as_str() == lower)
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit a quantity is measured in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Serving,
    G,
    Kg,
    Ml,
    L,
    Cup,
    Tbsp,
    Tsp,
    Piece,
    Slice,
}

impl Unit {
    pub const ALL: [Unit; 10] = [
        Unit::Serving,
        Unit::G,
        Unit::Kg,
        Unit::Ml,
        Unit::L,
        Unit::Cup,
        Unit::Tbsp,
        Unit::Tsp,
        Unit::Piece,
        Unit::Slice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Serving => "serving",
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::Cup => "cup",
            Unit::Tbsp => "tbsp",
            Unit::Tsp => "tsp",
            Unit::Piece => "piece",
            Unit::Slice => "slice",
        }
    }

    /// Look up a unit by name; unknown names yield `None`
    pub fn from_name(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|u| u.as_str() == lower)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A logged food entry
///
/// Nutrition values are per unit; totals are `nutrition * quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    pub user_id: i64,
    pub food_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: Unit,
    #[serde(flatten)]
    pub nutrition: Nutrition,
    #[serde(default)]
    pub meal_type: MealType,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

fn default_quantity() -> f64 {
    1.0
}

/// Data for creating a food entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodEntryCreate {
    pub user_id: i64,
    pub food_name: String,
    pub quantity: Option<f64>,
    pub unit: Option<Unit>,
    #[serde(default)]
    pub nutrition: Nutrition,
    pub meal_type: Option<MealType>,
    pub notes: Option<String>,
}

/// Partial nutrition change; `None` keeps the current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionUpdate {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
}

/// Data for updating a food entry
///
/// Meal type and unit arrive as raw names so that unknown values can be
/// ignored instead of rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodEntryUpdate {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    #[serde(default)]
    pub nutrition: NutritionUpdate,
    pub meal_type: Option<String>,
    pub notes: Option<String>,
}

impl FoodEntry {
    /// Build and validate a new entry stamped with `created_at`
    pub fn create(
        data: FoodEntryCreate,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let entry = Self {
            id: None,
            user_id: data.user_id,
            food_name: data.food_name,
            quantity: data.quantity.unwrap_or_else(default_quantity),
            unit: data.unit.unwrap_or_default(),
            nutrition: data.nutrition,
            meal_type: data.meal_type.unwrap_or_default(),
            notes: data.notes.unwrap_or_default(),
            created_at,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Check the entry invariants
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id == 0 {
            return Err(ValidationError::MissingUserId);
        }
        if self.food_name.trim().is_empty() {
            return Err(ValidationError::EmptyFoodName);
        }
        if !(self.quantity.is_finite() && self.quantity > 0.0) {
            return Err(ValidationError::InvalidQuantity(self.quantity));
        }
        for (nutrient, value) in self.nutrition.fields() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ValidationError::InvalidNutrient { nutrient, value });
            }
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    // ------------------------------------------------------------------
    // Derived totals
    // ------------------------------------------------------------------

    pub fn total_calories(&self) -> f64 {
        self.nutrition.calories * self.quantity
    }

    pub fn total_protein(&self) -> f64 {
        self.nutrition.protein * self.quantity
    }

    pub fn total_carbs(&self) -> f64 {
        self.nutrition.carbs * self.quantity
    }

    pub fn total_fat(&self) -> f64 {
        self.nutrition.fat * self.quantity
    }

    pub fn total_fiber(&self) -> f64 {
        self.nutrition.fiber * self.quantity
    }

    pub fn total_sugar(&self) -> f64 {
        self.nutrition.sugar * self.quantity
    }

    /// All six totals for this entry
    pub fn nutritional_summary(&self) -> Nutrition {
        self.nutrition.scale(self.quantity)
    }

    /// Calendar date of creation as seen in `tz`
    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.created_at.with_timezone(tz).date_naive()
    }

    // ------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------

    pub fn with_id(self, id: EntryId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    pub fn with_quantity(&self, quantity: f64) -> Result<Self, ValidationError> {
        if !(quantity.is_finite() && quantity > 0.0) {
            return Err(ValidationError::InvalidQuantity(quantity));
        }
        Ok(Self {
            quantity,
            ..self.clone()
        })
    }

    pub fn with_nutrition(&self, update: &NutritionUpdate) -> Result<Self, ValidationError> {
        let current = self.nutrition;
        let nutrition = Nutrition {
            calories: update.calories.unwrap_or(current.calories),
            protein: update.protein.unwrap_or(current.protein),
            carbs: update.carbs.unwrap_or(current.carbs),
            fat: update.fat.unwrap_or(current.fat),
            fiber: update.fiber.unwrap_or(current.fiber),
            sugar: update.sugar.unwrap_or(current.sugar),
        };
        let updated = Self {
            nutrition,
            ..self.clone()
        };
        updated.validate()?;
        Ok(updated)
    }

    /// Unknown meal type names keep the current meal type
    pub fn with_meal_type(&self, name: &str) -> Self {
        let meal_type = MealType::from_name(name).unwrap_or(self.meal_type);
        Self {
            meal_type,
            ..self.clone()
        }
    }

    /// Unknown unit names keep the current unit
    pub fn with_unit(&self, name: &str) -> Self {
        let unit = Unit::from_name(name).unwrap_or(self.unit);
        Self {
            unit,
            ..self.clone()
        }
    }

    pub fn with_notes(&self, notes: impl Into<String>) -> Self {
        Self {
            notes: notes.into(),
            ..self.clone()
        }
    }

    /// Apply every field present in `update`
    pub fn apply_update(&self, update: &FoodEntryUpdate) -> Result<Self, ValidationError> {
        let mut entry = self.with_nutrition(&update.nutrition)?;
        if let Some(quantity) = update.quantity {
            entry = entry.with_quantity(quantity)?;
        }
        if let Some(ref meal_type) = update.meal_type {
            entry = entry.with_meal_type(meal_type);
        }
        if let Some(ref unit) = update.unit {
            entry = entry.with_unit(unit);
        }
        if let Some(ref notes) = update.notes {
            entry = entry.with_notes(notes.clone());
        }
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, 0, 0).unwrap()
    }

    fn sample() -> FoodEntry {
        FoodEntry::create(
            FoodEntryCreate {
                user_id: 42,
                food_name: "oatmeal".to_string(),
                quantity: Some(2.0),
                nutrition: Nutrition {
                    calories: 150.0,
                    protein: 5.0,
                    carbs: 27.0,
                    fat: 3.0,
                    fiber: 4.0,
                    sugar: 1.0,
                },
                meal_type: Some(MealType::Breakfast),
                ..Default::default()
            },
            at(8),
        )
        .unwrap()
    }

    #[test]
    fn test_create_applies_defaults() {
        let entry = FoodEntry::create(
            FoodEntryCreate {
                user_id: 1,
                food_name: "apple".to_string(),
                ..Default::default()
            },
            at(12),
        )
        .unwrap();
        assert_eq!(entry.quantity, 1.0);
        assert_eq!(entry.unit, Unit::Serving);
        assert_eq!(entry.meal_type, MealType::Snack);
        assert_eq!(entry.notes, "");
        assert_eq!(entry.nutrition, Nutrition::zero());
        assert!(entry.id.is_none());
    }

    #[test]
    fn test_totals_are_per_unit_times_quantity() {
        let entry = sample();
        assert_eq!(entry.total_calories(), 300.0);
        assert_eq!(entry.total_protein(), 10.0);
        assert_eq!(entry.total_carbs(), 54.0);
        assert_eq!(entry.total_fat(), 6.0);
        assert_eq!(entry.total_fiber(), 8.0);
        assert_eq!(entry.total_sugar(), 2.0);
        assert_eq!(entry.nutritional_summary().calories, entry.total_calories());
        // Stored values stay per unit
        assert_eq!(entry.nutrition.calories, 150.0);
    }

    #[test]
    fn test_validation_rejects_broken_entries() {
        let entry = sample();
        assert!(entry.is_valid());

        let no_user = FoodEntry {
            user_id: 0,
            ..entry.clone()
        };
        assert_eq!(no_user.validate(), Err(ValidationError::MissingUserId));

        let blank = FoodEntry {
            food_name: "   ".to_string(),
            ..entry.clone()
        };
        assert_eq!(blank.validate(), Err(ValidationError::EmptyFoodName));

        let zero_qty = FoodEntry {
            quantity: 0.0,
            ..entry.clone()
        };
        assert_eq!(zero_qty.validate(), Err(ValidationError::InvalidQuantity(0.0)));

        let negative = FoodEntry {
            nutrition: Nutrition {
                calories: -1.0,
                ..entry.nutrition
            },
            ..entry
        };
        assert_eq!(
            negative.validate(),
            Err(ValidationError::InvalidNutrient {
                nutrient: "calories",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_meal_type_update_ignores_unknown_names() {
        let entry = sample();
        assert_eq!(entry.with_meal_type("brunch").meal_type, MealType::Breakfast);
        assert_eq!(entry.with_meal_type("dinner").meal_type, MealType::Dinner);
        assert_eq!(entry.with_meal_type("LUNCH").meal_type, MealType::Lunch);
    }

    #[test]
    fn test_unit_update_ignores_unknown_names() {
        let entry = sample();
        assert_eq!(entry.with_unit("bucket").unit, Unit::Serving);
        assert_eq!(entry.with_unit("tbsp").unit, Unit::Tbsp);
    }

    #[test]
    fn test_quantity_update_rejects_non_positive() {
        let entry = sample();
        assert!(entry.with_quantity(-3.0).is_err());
        assert!(entry.with_quantity(f64::NAN).is_err());
        let updated = entry.with_quantity(0.5).unwrap();
        assert_eq!(updated.quantity, 0.5);
        assert_eq!(updated.total_calories(), 75.0);
        // The original value is untouched
        assert_eq!(entry.quantity, 2.0);
    }

    #[test]
    fn test_nutrition_update_overlays_present_fields() {
        let entry = sample();
        let updated = entry
            .with_nutrition(&NutritionUpdate {
                calories: Some(200.0),
                fat: Some(0.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.nutrition.calories, 200.0);
        assert_eq!(updated.nutrition.fat, 0.0);
        assert_eq!(updated.nutrition.protein, 5.0);

        let rejected = entry.with_nutrition(&NutritionUpdate {
            sugar: Some(-2.0),
            ..Default::default()
        });
        assert!(rejected.is_err());
    }

    #[test]
    fn test_apply_update_keeps_created_at() {
        let entry = sample();
        let updated = entry
            .apply_update(&FoodEntryUpdate {
                quantity: Some(3.0),
                meal_type: Some("nonsense".to_string()),
                unit: Some("cup".to_string()),
                notes: Some("with honey".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.quantity, 3.0);
        assert_eq!(updated.meal_type, MealType::Breakfast);
        assert_eq!(updated.unit, Unit::Cup);
        assert_eq!(updated.notes, "with honey");
        assert_eq!(updated.created_at, entry.created_at);
    }

    #[test]
    fn test_local_date_uses_time_zone() {
        let entry = FoodEntry {
            created_at: at(23),
            ..sample()
        };
        let utc = FixedOffset::east_opt(0).unwrap();
        let plus3 = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(entry.local_date(&utc), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(entry.local_date(&plus3), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
    }

    #[test]
    fn test_record_shape_is_flat_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["userId"], 42);
        assert_eq!(json["foodName"], "oatmeal");
        assert_eq!(json["mealType"], "breakfast");
        assert_eq!(json["unit"], "serving");
        assert_eq!(json["calories"], 150.0);
        assert!(json.get("id").is_none());
        assert!(json.get("nutrition").is_none());
    }
}
