use liftoff_core::store::keys;
use liftoff_core::{
    KeyValueStore, MemoryKeyValueStore, PersonalizationState, StoreError, StyleSheetRegistry,
    StyleSlot, TextSize, ThemeId, Tier,
};

fn state(
    store: &MemoryKeyValueStore,
) -> PersonalizationState<&MemoryKeyValueStore, StyleSheetRegistry> {
    PersonalizationState::new(store, StyleSheetRegistry::new())
}

#[test]
fn every_valid_theme_roundtrips_with_one_rule_set() {
    let store = MemoryKeyValueStore::new();
    let mut personalization = state(&store);

    for theme in ThemeId::ALL {
        let applied = personalization.apply_theme(theme.as_str()).unwrap();
        assert_eq!(applied, theme);
        assert_eq!(personalization.current_theme(), theme);

        let installed = personalization.host().rules(StyleSlot::Theme);
        if theme.is_baseline() {
            assert!(installed.is_none());
        } else {
            let rules = installed.expect("non-baseline theme installs rules");
            assert!(rules.contains(theme.palette().primary));
        }
    }
}

#[test]
fn invalid_theme_behaves_like_ocean() {
    let store = MemoryKeyValueStore::new();
    let mut personalization = state(&store);
    personalization.apply_theme("sakura").unwrap();

    let applied = personalization.apply_theme("midnight").unwrap();
    assert_eq!(applied, ThemeId::Ocean);
    assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("ocean"));
    assert_eq!(personalization.host().rules(StyleSlot::Theme), None);
}

#[test]
fn reapplying_the_same_theme_is_idempotent() {
    let store = MemoryKeyValueStore::new();
    let mut personalization = state(&store);

    personalization.apply_theme("amber").unwrap();
    let first = personalization.host().clone();
    personalization.apply_theme("amber").unwrap();

    assert_eq!(personalization.host(), &first);
    assert_eq!(personalization.host().installed_count(), 1);
}

#[test]
fn switching_themes_replaces_the_previous_rule_set() {
    let store = MemoryKeyValueStore::new();
    let mut personalization = state(&store);

    personalization.apply_theme("crimson").unwrap();
    personalization.apply_theme("arctic").unwrap();

    let rules = personalization.host().rules(StyleSlot::Theme).unwrap();
    assert!(rules.contains("#06b6d4"));
    assert!(!rules.contains("#ef4444"));
    assert_eq!(personalization.host().installed_count(), 1);
}

#[test]
fn current_selection_defaults_when_unset_or_invalid() {
    let store = MemoryKeyValueStore::new();
    let personalization = state(&store);
    assert_eq!(personalization.current_theme(), ThemeId::Ocean);
    assert_eq!(personalization.current_text_size(), TextSize::Normal);

    store.set(keys::THEME, "plaid").unwrap();
    store.set(keys::TEXT_SIZE, "gigantic").unwrap();
    assert_eq!(personalization.current_theme(), ThemeId::Ocean);
    assert_eq!(personalization.current_text_size(), TextSize::Normal);
}

#[test]
fn text_size_apply_persists_and_replaces_rules() {
    let store = MemoryKeyValueStore::new();
    let mut personalization = state(&store);

    personalization.apply_text_size("big").unwrap();
    assert_eq!(store.get(keys::TEXT_SIZE).unwrap().as_deref(), Some("big"));
    assert!(personalization
        .host()
        .rules(StyleSlot::TextSize)
        .unwrap()
        .contains("font-size:18px"));

    let applied = personalization.apply_text_size("tiny").unwrap();
    assert_eq!(applied, TextSize::Normal);
    let rules = personalization.host().rules(StyleSlot::TextSize).unwrap();
    assert!(rules.contains("font-size:15px"));
    assert!(!rules.contains("font-size:18px"));
}

#[test]
fn restore_applies_stored_preferences_before_render() {
    let store = MemoryKeyValueStore::new();
    store.set(keys::THEME, "lavender").unwrap();
    store.set(keys::TEXT_SIZE, "small").unwrap();

    let mut personalization = state(&store);
    assert_eq!(personalization.host().installed_count(), 0);

    let restored = personalization.restore().unwrap();
    assert_eq!(restored, (ThemeId::Lavender, TextSize::Small));
    let host = personalization.into_host();
    assert!(host.rules(StyleSlot::Theme).unwrap().contains("#d946ef"));
    assert!(host
        .rules(StyleSlot::TextSize)
        .unwrap()
        .contains("font-size:13px"));
    assert!(host.to_html().contains("<style id=\"liftoff-theme-css\">"));
}

#[test]
fn restore_rewrites_invalid_stored_ids() {
    let store = MemoryKeyValueStore::new();
    store.set(keys::THEME, "retro").unwrap();

    let mut personalization = state(&store);
    personalization.restore().unwrap();

    assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("ocean"));
    assert_eq!(store.get(keys::TEXT_SIZE).unwrap().as_deref(), Some("normal"));
    assert_eq!(personalization.host().rules(StyleSlot::Theme), None);
}

#[test]
fn failed_persist_leaves_visible_state_untouched() {
    let store = MemoryKeyValueStore::with_quota(12);
    store.set(keys::THEME, "amber").unwrap();
    let mut personalization = state(&store);
    let before = personalization.host().clone();

    let err = personalization
        .apply_text_size("big")
        .expect_err("write over quota must fail");
    assert!(matches!(err, StoreError::QuotaExceeded { .. }));
    assert_eq!(personalization.host(), &before);
}

#[test]
fn theme_catalog_is_limited_for_free_tier() {
    type State = PersonalizationState<MemoryKeyValueStore, StyleSheetRegistry>;
    assert_eq!(State::available_themes(Tier::Free), vec![ThemeId::Ocean]);
    assert_eq!(State::available_themes(Tier::Pro).len(), 8);
    assert_eq!(State::available_themes(Tier::Ultra), ThemeId::ALL.to_vec());
}
