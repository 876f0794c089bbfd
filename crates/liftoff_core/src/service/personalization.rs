//! Theme and text-size state machine.
//!
//! # Responsibility
//! - Single source of truth for the active theme and text size.
//! - Install the matching rule-sets into the style host.
//!
//! # Invariants
//! - Unknown ids are corrected (`ocean` / `normal`), never rejected.
//! - After any apply call at most one rule-set per slot is installed;
//!   the baseline theme leaves the theme slot empty.
//! - The selection is persisted before the host is touched, so a failed
//!   write leaves the visible state unchanged.
//! - Entitlement is not checked here; callers gate theme choice by tier.

use crate::model::preference::{TextSize, ThemeId};
use crate::model::tier::{Feature, Tier};
use crate::store::{keys, KeyValueStore, StoreResult};
use crate::style::{render_text_size_rules, render_theme_rules, StyleHost, StyleSlot};
use log::{info, warn};

/// Active personalization state bound to a store and a style host.
pub struct PersonalizationState<S: KeyValueStore, H: StyleHost> {
    store: S,
    host: H,
}

impl<S: KeyValueStore, H: StyleHost> PersonalizationState<S, H> {
    pub fn new(store: S, host: H) -> Self {
        Self { store, host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Page-load bootstrap: applies the stored theme and text size.
    ///
    /// Must run before the first paint so stored preferences never flash
    /// from the default look. Invalid stored ids are rewritten with their
    /// fallback.
    pub fn restore(&mut self) -> StoreResult<(ThemeId, TextSize)> {
        let theme = self.apply_theme_id(self.current_theme())?;
        let size = self.apply_text_size_id(self.current_text_size())?;
        info!(
            "event=preferences_restore module=personalization status=ok theme={} text_size={}",
            theme, size
        );
        Ok((theme, size))
    }

    /// Persisted theme, `ocean` when unset or invalid.
    pub fn current_theme(&self) -> ThemeId {
        self.read_selection(keys::THEME)
            .map_or_else(ThemeId::default, |raw| ThemeId::resolve(&raw))
    }

    /// Persisted text size, `normal` when unset or invalid.
    pub fn current_text_size(&self) -> TextSize {
        self.read_selection(keys::TEXT_SIZE)
            .map_or_else(TextSize::default, |raw| TextSize::resolve(&raw))
    }

    /// Validates, persists and installs `theme_id`.
    ///
    /// Unknown ids behave exactly like `ocean`. Returns the applied theme.
    pub fn apply_theme(&mut self, theme_id: &str) -> StoreResult<ThemeId> {
        let theme = match ThemeId::parse(theme_id) {
            Some(theme) => theme,
            None => {
                warn!("event=theme_apply module=personalization status=corrected fallback=ocean");
                ThemeId::default()
            }
        };
        self.apply_theme_id(theme)
    }

    /// Validates, persists and installs `size_id`. Unknown ids become `normal`.
    pub fn apply_text_size(&mut self, size_id: &str) -> StoreResult<TextSize> {
        let size = match TextSize::parse(size_id) {
            Some(size) => size,
            None => {
                warn!(
                    "event=text_size_apply module=personalization status=corrected fallback=normal"
                );
                TextSize::default()
            }
        };
        self.apply_text_size_id(size)
    }

    /// Themes the given tier may pick from.
    pub fn available_themes(tier: Tier) -> Vec<ThemeId> {
        if tier.allows(Feature::AllThemes) {
            ThemeId::ALL.to_vec()
        } else {
            vec![ThemeId::Ocean]
        }
    }

    fn apply_theme_id(&mut self, theme: ThemeId) -> StoreResult<ThemeId> {
        self.store.set(keys::THEME, theme.as_str())?;

        self.host.remove(StyleSlot::Theme);
        if let Some(rules) = render_theme_rules(theme) {
            self.host.install(StyleSlot::Theme, rules);
        }

        info!("event=theme_apply module=personalization status=ok theme={theme}");
        Ok(theme)
    }

    fn apply_text_size_id(&mut self, size: TextSize) -> StoreResult<TextSize> {
        self.store.set(keys::TEXT_SIZE, size.as_str())?;

        self.host.remove(StyleSlot::TextSize);
        self.host
            .install(StyleSlot::TextSize, render_text_size_rules(size));

        info!("event=text_size_apply module=personalization status=ok text_size={size}");
        Ok(size)
    }

    fn read_selection(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=preference_read module=personalization status=degraded key={} error={}",
                    key, err
                );
                None
            }
        }
    }
}
