use super::print_json;
use anyhow::Result;
use clap::Subcommand;
use liftoff_core::{plan_catalog, Feature, KeyValueStore, TierGate};
use serde::Serialize;

#[derive(Subcommand)]
pub enum TierCommands {
    /// Show the recorded tier
    Get,
    /// Record a tier (free, pro, ultra)
    Set { label: String },
    /// Show which features the current tier unlocks
    Features,
    /// Show plan prices and daily quotas
    Plans,
}

#[derive(Serialize)]
struct FeatureRow {
    feature: &'static str,
    allowed: bool,
}

pub fn run<S: KeyValueStore>(command: TierCommands, store: S, json: bool) -> Result<()> {
    let gate = TierGate::new(store);

    match command {
        TierCommands::Get => println!("{}", gate.current_tier()),
        TierCommands::Set { label } => {
            let tier = gate.set_tier(&label)?;
            println!("Tier set to {} {}", tier.plan().emoji, tier.plan().name);
        }
        TierCommands::Features => {
            let rows: Vec<FeatureRow> = Feature::ALL
                .into_iter()
                .map(|feature| FeatureRow {
                    feature: feature.as_str(),
                    allowed: gate.is_feature_allowed(feature),
                })
                .collect();
            if json {
                return print_json(&rows);
            }
            println!("tier: {}", gate.current_tier());
            for (row, feature) in rows.iter().zip(Feature::ALL) {
                if row.allowed {
                    println!("  {:<20} yes", row.feature);
                } else {
                    println!("  {:<20} no  ({})", row.feature, feature.upgrade_message());
                }
            }
        }
        TierCommands::Plans => {
            let current = gate.current_tier();
            for plan in plan_catalog() {
                let marker = if plan.tier == current { "*" } else { " " };
                let badge = plan.badge.map(|badge| format!(" [{badge}]")).unwrap_or_default();
                println!("{marker} {} {} {}{}{badge}", plan.emoji, plan.name, plan.price, plan.period);
                let quotas = plan.quotas;
                for (label, limit) in [
                    ("note generations", quotas.note_generations),
                    ("note regenerations", quotas.note_regenerations),
                    ("tests", quotas.tests),
                    ("flashcard sets", quotas.flashcard_generations),
                    ("flowcharts", quotas.flowcharts),
                    ("flowchart regenerations", quotas.flowchart_regenerations),
                    ("assistant messages", quotas.assistant_messages),
                ] {
                    let limit = limit.map_or_else(|| "unlimited".to_string(), |n| n.to_string());
                    println!("    {label:<24} {limit}/day");
                }
            }
        }
    }

    Ok(())
}
