//! Personalization and content-library core for LiftOff.
//! This crate is the single source of truth for the library document,
//! theme/text-size selection and subscription tier gating.

pub mod config;
pub mod logging;
pub mod model;
pub mod net;
pub mod repo;
pub mod service;
pub mod store;
pub mod style;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::library::{Folder, Item, ItemId, ItemType, Library, LibraryEntry};
pub use model::plan::{plan_catalog, DailyQuotas, PlanDescriptor};
pub use model::preference::{TextSize, ThemeId, ThemePalette};
pub use model::tier::{parse_feature, Feature, FeatureParseError, Tier};
pub use net::{
    HttpTransport, MultipartForm, OutboundRequest, RequestBody, RequestMiddleware, TierAnnotator,
    TieredTransport, Transport, TransportError, TransportResponse, DEFAULT_API_PATH_MARKER,
    TIER_HEADER,
};
pub use repo::library_repo::{
    LibraryError, LibraryRepository, LibraryResult, SaveOutcome, SaveRequest,
};
pub use service::personalization::PersonalizationState;
pub use service::tier_gate::{TierError, TierGate};
pub use store::{
    open_db, open_db_in_memory, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore,
    StoreError, StoreResult,
};
pub use style::{StyleHost, StyleSheetRegistry, StyleSlot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
