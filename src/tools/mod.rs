//! FoodTrack Tools module
//!
//! Service operations over the stores: each takes its collaborators and the
//! current clock explicitly and returns plain serializable data.

pub mod diary;
pub mod users;
