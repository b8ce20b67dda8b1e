//! Request handlers.
//!
//! Each submodule provides async handler functions for one area of the API.
//! Handlers delegate to the repositories in `opencfp_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod admin;
pub mod auth;
pub mod profile;
pub mod reviewer;
pub mod speakers;
pub mod talks;
