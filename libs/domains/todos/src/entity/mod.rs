//! SeaORM entities for the `todos` and `users` tables

pub mod todo;
pub mod user;
