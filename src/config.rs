//! Runtime configuration from environment variables

use std::path::PathBuf;
use std::str::FromStr;

use crate::reports::{DEFAULT_RECENT_DAYS, DEFAULT_RECENT_ENTRIES};

pub const DATABASE_PATH_VAR: &str = "FOODTRACK_DATABASE_PATH";
pub const USER_ID_VAR: &str = "FOODTRACK_USER_ID";
pub const STATS_DAYS_VAR: &str = "FOODTRACK_STATS_DAYS";
pub const RECENT_LIMIT_VAR: &str = "FOODTRACK_RECENT_LIMIT";
pub const RECENT_DAYS_VAR: &str = "FOODTRACK_RECENT_DAYS";

pub const DEFAULT_USER_ID: i64 = 1;
pub const DEFAULT_STATS_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    /// Identity the console acts as
    pub user_id: i64,
    /// Window for `/stats` without an argument
    pub stats_days: u32,
    pub recent_limit: usize,
    pub recent_days: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset or unparsable values use defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = lookup(DATABASE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        Self {
            database_path,
            user_id: parse_or(&lookup, USER_ID_VAR, DEFAULT_USER_ID),
            stats_days: parse_or(&lookup, STATS_DAYS_VAR, DEFAULT_STATS_DAYS),
            recent_limit: parse_or(&lookup, RECENT_LIMIT_VAR, DEFAULT_RECENT_ENTRIES),
            recent_days: parse_or(&lookup, RECENT_DAYS_VAR, DEFAULT_RECENT_DAYS),
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, "ignoring unparsable setting");
            default
        }),
        None => default,
    }
}

/// `<project>/data/foodtrack.db`, where the project root is found from the
/// executable location
pub fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("foodtrack.db");
    path
}
