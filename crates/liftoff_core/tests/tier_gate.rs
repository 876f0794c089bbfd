use liftoff_core::store::keys;
use liftoff_core::{
    Feature, KeyValueStore, MemoryKeyValueStore, StoreError, Tier, TierError, TierGate,
};

#[test]
fn tier_defaults_to_free() {
    let store = MemoryKeyValueStore::new();
    assert_eq!(TierGate::new(&store).current_tier(), Tier::Free);
}

#[test]
fn corrupted_label_degrades_to_free() {
    let store = MemoryKeyValueStore::new();
    store.set(keys::TIER, "diamond").unwrap();
    let gate = TierGate::new(&store);
    assert_eq!(gate.current_tier(), Tier::Free);
    assert!(!gate.is_feature_allowed(Feature::AdvancedMode));
}

#[test]
fn set_tier_takes_effect_on_next_read() {
    let store = MemoryKeyValueStore::new();
    let gate = TierGate::new(&store);
    let other_reader = TierGate::new(&store);

    assert_eq!(gate.set_tier("Ultra").unwrap(), Tier::Ultra);
    assert_eq!(store.get(keys::TIER).unwrap().as_deref(), Some("ultra"));
    assert_eq!(other_reader.current_tier(), Tier::Ultra);
}

#[test]
fn unknown_tier_label_is_rejected_without_writing() {
    let store = MemoryKeyValueStore::new();
    let gate = TierGate::new(&store);
    gate.set_tier("pro").unwrap();

    let err = gate.set_tier("enterprise").expect_err("unknown tier");
    assert!(matches!(err, TierError::UnknownTier(label) if label == "enterprise"));
    assert_eq!(gate.current_tier(), Tier::Pro);
}

#[test]
fn set_tier_surfaces_store_failures() {
    let store = MemoryKeyValueStore::with_quota(4);
    let err = TierGate::new(&store).set_tier("pro").expect_err("quota");
    assert!(matches!(err, TierError::Store(StoreError::QuotaExceeded { .. })));
}

#[test]
fn advanced_mode_follows_the_capability_table() {
    let store = MemoryKeyValueStore::new();
    let gate = TierGate::new(&store);

    for (label, expected) in [("free", false), ("pro", true), ("ultra", true)] {
        gate.set_tier(label).unwrap();
        assert_eq!(gate.is_feature_name_allowed("advanced_mode"), expected);
        assert_eq!(gate.is_feature_allowed(Feature::AdvancedMode), expected);
        assert_eq!(gate.is_feature_allowed(Feature::AllThemes), expected);
        assert_eq!(gate.is_feature_allowed(Feature::AssistantEverywhere), expected);
    }
}

#[test]
fn unknown_feature_is_denied_for_every_tier() {
    let store = MemoryKeyValueStore::new();
    let gate = TierGate::new(&store);

    for tier in Tier::ALL {
        gate.set_tier(tier.as_str()).unwrap();
        assert!(!gate.is_feature_name_allowed("nonexistent_feature"));
        assert!(!gate.is_feature_name_allowed(""));
    }
}

#[test]
fn plans_describe_quotas_per_tier() {
    assert_eq!(Tier::Pro.plan().quotas.tests, Some(30));
    assert_eq!(Tier::Pro.plan().badge, Some("POPULAR"));
    assert_eq!(Tier::Free.plan().quotas.assistant_messages, Some(10));
    assert!(Feature::AllThemes.upgrade_message().contains("Pro and Ultra"));
}
