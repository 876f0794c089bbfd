//! Subscription tier gate.
//!
//! # Responsibility
//! - Read and record the locally stored tier label.
//! - Answer feature-availability questions from the capability table.
//!
//! # Invariants
//! - Reads degrade to `Tier::Free` when the label is missing, unreadable
//!   or unknown; they never fail.
//! - No change notification exists: consumers re-query on demand.

use crate::model::tier::{parse_feature, Feature, Tier};
use crate::store::{keys, KeyValueStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from recording a tier.
#[derive(Debug)]
pub enum TierError {
    /// Label is not one of `free|pro|ultra`.
    UnknownTier(String),
    Store(StoreError),
}

impl Display for TierError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTier(label) => {
                write!(f, "unknown tier `{label}`; expected free|pro|ultra")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TierError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownTier(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for TierError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Tier lookups over the shared store.
pub struct TierGate<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TierGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persisted tier, `free` when absent or invalid.
    pub fn current_tier(&self) -> Tier {
        match self.store.get(keys::TIER) {
            Ok(Some(label)) => Tier::parse(&label).unwrap_or_default(),
            Ok(None) => Tier::default(),
            Err(err) => {
                warn!("event=tier_read module=tier status=degraded fallback=free error={err}");
                Tier::default()
            }
        }
    }

    /// Records `label` as the active tier. Takes effect on the next read.
    pub fn set_tier(&self, label: &str) -> Result<Tier, TierError> {
        let tier = Tier::parse(label).ok_or_else(|| TierError::UnknownTier(label.to_string()))?;
        self.store.set(keys::TIER, tier.as_str())?;
        info!("event=tier_set module=tier status=ok tier={tier}");
        Ok(tier)
    }

    pub fn is_feature_allowed(&self, feature: Feature) -> bool {
        self.current_tier().allows(feature)
    }

    /// String-keyed variant for presentation code. Unknown names are denied.
    pub fn is_feature_name_allowed(&self, feature_name: &str) -> bool {
        match parse_feature(feature_name) {
            Ok(feature) => self.is_feature_allowed(feature),
            Err(err) => {
                warn!("event=feature_check module=tier status=denied reason=\"{err}\"");
                false
            }
        }
    }
}
