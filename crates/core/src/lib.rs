//! Domain logic for the OpenCFP backend.
//!
//! This crate has no database or HTTP dependencies so the rules it encodes
//! (talk listing specs, signup validation, ratings) can be unit-tested in
//! isolation and shared by the repository and API layers.

pub mod error;
pub mod rating;
pub mod roles;
pub mod sanitize;
pub mod signup;
pub mod speaker_search;
pub mod talk_query;
pub mod types;
