//! User model
//!
//! A diary owner with profile data, preferences and a calorie goal.
//! Mutations return a new `User` with `updated_at` set to the supplied clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

pub const DEFAULT_CALORIE_GOAL: f64 = 2000.0;
pub const DEFAULT_LANGUAGE_CODE: &str = "en";
pub const DEFAULT_REMINDER_TIME: &str = "20:00";

/// Measurement system used when presenting quantities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        [UnitSystem::Metric, UnitSystem::Imperial]
            .into_iter()
            .find(|u| u.as_str() == lower)
    }
}

/// Stored user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub notifications: bool,
    pub reminder_time: String,
    pub units: UnitSystem,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            reminder_time: DEFAULT_REMINDER_TIME.to_string(),
            units: UnitSystem::Metric,
        }
    }
}

/// Preference keys to overlay; absent keys keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub notifications: Option<bool>,
    pub reminder_time: Option<String>,
    pub units: Option<UnitSystem>,
}

impl Preferences {
    /// Shallow merge: supplied keys replace, absent keys are retained
    pub fn merge(&self, update: &PreferencesUpdate) -> Self {
        Self {
            notifications: update.notifications.unwrap_or(self.notifications),
            reminder_time: update
                .reminder_time
                .clone()
                .unwrap_or_else(|| self.reminder_time.clone()),
            units: update.units.unwrap_or(self.units),
        }
    }
}

/// A diary user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: String,
    pub is_bot: bool,
    pub daily_calorie_goal: f64,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile data supplied on first contact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    #[serde(default)]
    pub is_bot: bool,
}

/// Profile fields to change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
}

impl User {
    /// Create a user with default goal and preferences
    pub fn create(
        user_id: i64,
        data: UserCreate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let user = Self {
            user_id,
            username: data.username,
            first_name: data.first_name,
            last_name: data.last_name,
            language_code: data
                .language_code
                .unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_string()),
            is_bot: data.is_bot,
            daily_calorie_goal: DEFAULT_CALORIE_GOAL,
            preferences: Preferences::default(),
            created_at: now,
            updated_at: now,
        };
        user.validate()?;
        Ok(user)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id == 0 {
            return Err(ValidationError::MissingUserId);
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn with_profile(&self, update: &ProfileUpdate, now: DateTime<Utc>) -> Self {
        let mut user = self.clone();
        if let Some(ref username) = update.username {
            user.username = Some(username.clone());
        }
        if let Some(ref first_name) = update.first_name {
            user.first_name = Some(first_name.clone());
        }
        if let Some(ref last_name) = update.last_name {
            user.last_name = Some(last_name.clone());
        }
        if let Some(ref language_code) = update.language_code {
            user.language_code = language_code.clone();
        }
        user.updated_at = now;
        user
    }

    pub fn with_preferences(&self, update: &PreferencesUpdate, now: DateTime<Utc>) -> Self {
        Self {
            preferences: self.preferences.merge(update),
            updated_at: now,
            ..self.clone()
        }
    }

    pub fn with_calorie_goal(
        &self,
        goal: f64,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if !(goal.is_finite() && goal > 0.0) {
            return Err(ValidationError::InvalidCalorieGoal(goal));
        }
        Ok(Self {
            daily_calorie_goal: goal,
            updated_at: now,
            ..self.clone()
        })
    }

    /// First and last name, falling back to username and then the id
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();

        if !parts.is_empty() {
            return parts.join(" ");
        }
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => username.to_string(),
            _ => format!("User {}", self.user_id),
        }
    }

    pub fn display_name(&self) -> String {
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => format!("@{}", username),
            _ => self.full_name(),
        }
    }
}
