//! Tyredex: vehicle tyre-fitment catalog toolkit
//!
//! A Unix-style CLI for maintaining vehicle tyre data as plain text
//! YAML files: size search, a tyre geometry calculator, and a review
//! workflow for user-submitted vehicles.

pub mod calc;
pub mod cli;
pub mod core;
pub mod entities;
pub mod yaml;
