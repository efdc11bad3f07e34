//! User Tools
//!
//! Registration on first contact, profile and preference changes and the
//! daily calorie goal.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::UserStore;
use crate::error::{DiaryError, DiaryResult};
use crate::models::{PreferencesUpdate, ProfileUpdate, User, UserCreate};

/// Response for start
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub user: User,
    pub greeting_name: String,
    pub created: bool, // true if newly registered, false if already known
}

/// Register the user on first contact; known users are returned unchanged
pub fn start<S: UserStore>(
    store: &S,
    user_id: i64,
    data: UserCreate,
    now: DateTime<Utc>,
) -> DiaryResult<StartResponse> {
    if let Some(user) = store.get_user(user_id)? {
        return Ok(StartResponse {
            greeting_name: user.display_name(),
            user,
            created: false,
        });
    }

    let user = store.create_user(&User::create(user_id, data, now)?)?;
    tracing::info!(user_id, "registered new user");

    Ok(StartResponse {
        greeting_name: user.display_name(),
        user,
        created: true,
    })
}

pub fn get_user<S: UserStore>(store: &S, user_id: i64) -> DiaryResult<User> {
    store
        .get_user(user_id)?
        .ok_or(DiaryError::UserNotFound(user_id))
}

pub fn update_profile<S: UserStore>(
    store: &S,
    user_id: i64,
    update: &ProfileUpdate,
    now: DateTime<Utc>,
) -> DiaryResult<User> {
    let user = get_user(store, user_id)?.with_profile(update, now);
    save(store, user)
}

/// Shallow-merge preference changes into the stored preferences
pub fn update_preferences<S: UserStore>(
    store: &S,
    user_id: i64,
    update: &PreferencesUpdate,
    now: DateTime<Utc>,
) -> DiaryResult<User> {
    let user = get_user(store, user_id)?.with_preferences(update, now);
    save(store, user)
}

pub fn set_calorie_goal<S: UserStore>(
    store: &S,
    user_id: i64,
    goal: f64,
    now: DateTime<Utc>,
) -> DiaryResult<User> {
    let user = get_user(store, user_id)?.with_calorie_goal(goal, now)?;
    tracing::info!(user_id, goal, "calorie goal changed");
    save(store, user)
}

/// Remove the user record; their entries are left in place
pub fn delete_user<S: UserStore>(store: &S, user_id: i64) -> DiaryResult<()> {
    if !store.delete_user(user_id)? {
        return Err(DiaryError::UserNotFound(user_id));
    }
    Ok(())
}

fn save<S: UserStore>(store: &S, user: User) -> DiaryResult<User> {
    if !store.update_user(&user)? {
        return Err(DiaryError::UserNotFound(user.user_id));
    }
    Ok(user)
}
