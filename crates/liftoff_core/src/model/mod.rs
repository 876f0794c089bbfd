//! Domain model for the content library and personalization state.
//!
//! # Responsibility
//! - Define the persisted document shapes (library, folders, items).
//! - Define the closed enumerations for theme, text size, tier and feature.
//!
//! # Invariants
//! - Every enumerated id has exactly one stable wire string.
//! - Unknown wire strings never panic; parsers return `None`/errors and
//!   callers pick the documented fallback.

pub mod library;
pub mod plan;
pub mod preference;
pub mod tier;
