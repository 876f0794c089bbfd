//! Repository layer over the key/value port.
//!
//! # Responsibility
//! - Own whole-document read-modify-write cycles for persisted documents.
//! - Keep JSON encoding details out of services and presentation code.
//!
//! # Invariants
//! - Every mutation serializes and writes the entire document.
//! - Corrupt or absent documents are repaired to defaults, never surfaced.

pub mod library_repo;
