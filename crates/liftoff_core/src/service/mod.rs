//! Personalization use-case services.
//!
//! # Responsibility
//! - Own the theme/text-size state machine and the subscription tier gate.
//! - Keep presentation code decoupled from store keys and encodings.
//!
//! # Invariants
//! - Reads never fail: every lookup has a total default.
//! - Writes persist before any visible effect is applied.

pub mod personalization;
pub mod tier_gate;
