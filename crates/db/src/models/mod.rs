//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and updates where the API writes the table

pub mod talk;
pub mod talk_comment;
pub mod talk_meta;
pub mod user;
