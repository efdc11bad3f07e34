//! FoodTrack Library
//!
//! Core of a conversational food diary: entry and user models, free-text
//! parsing, nutrition estimation, reporting and SQLite persistence.

pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod models;
pub mod nutrition;
pub mod reports;
pub mod tools;
