//! Database module
//!
//! SQLite connection pool, schema migrations and the store implementations.

pub mod connection;
mod food_entries;
pub mod migrations;
pub mod store;
mod users;

pub use connection::{Database, DbError, DbResult};
pub use store::{FoodEntryStore, UserStore};
