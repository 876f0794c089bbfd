use super::print_json;
use anyhow::{bail, Result};
use clap::Subcommand;
use liftoff_core::{
    Feature, KeyValueStore, PersonalizationState, StyleSheetRegistry, TextSize, ThemeId, TierGate,
};
use serde::Serialize;

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Show the active theme
    Get,
    /// Apply a theme (unknown ids fall back to ocean)
    Set {
        /// Theme id, e.g. emerald
        id: String,
    },
    /// List themes, marking those the current tier may use
    List,
    /// Print the style rules for the stored preferences
    Css,
}

#[derive(Subcommand)]
pub enum TextSizeCommands {
    /// Show the active text size
    Get,
    /// Apply a text size (small, normal, big)
    Set {
        size: String,
    },
}

#[derive(Serialize)]
struct ThemeRow {
    id: &'static str,
    name: &'static str,
    emoji: &'static str,
    primary: &'static str,
    available: bool,
}

pub fn run_theme<S: KeyValueStore + Copy>(
    command: ThemeCommands,
    store: S,
    json: bool,
) -> Result<()> {
    let mut state = PersonalizationState::new(store, StyleSheetRegistry::new());

    match command {
        ThemeCommands::Get => {
            let theme = state.current_theme();
            println!("{} {} ({})", theme.palette().emoji, theme.palette().name, theme);
        }
        ThemeCommands::Set { id } => {
            let theme = ThemeId::parse(&id).unwrap_or_default();
            let tier = TierGate::new(store).current_tier();
            if !PersonalizationState::<S, StyleSheetRegistry>::available_themes(tier)
                .contains(&theme)
            {
                bail!(Feature::AllThemes.upgrade_message());
            }
            let applied = state.apply_theme(&id)?;
            if applied.as_str() != id.trim() {
                eprintln!("Unknown theme `{id}`, using {applied}.");
            }
            println!("Theme set to {} {}", applied.palette().emoji, applied.palette().name);
        }
        ThemeCommands::List => {
            let tier = TierGate::new(store).current_tier();
            let available = PersonalizationState::<S, StyleSheetRegistry>::available_themes(tier);
            let current = state.current_theme();
            let rows: Vec<ThemeRow> = ThemeId::ALL
                .into_iter()
                .map(|theme| ThemeRow {
                    id: theme.as_str(),
                    name: theme.palette().name,
                    emoji: theme.palette().emoji,
                    primary: theme.palette().primary,
                    available: available.contains(&theme),
                })
                .collect();
            if json {
                return print_json(&rows);
            }
            for row in rows {
                let marker = if row.id == current.as_str() { "*" } else { " " };
                let lock = if row.available { "" } else { "  (Pro/Ultra)" };
                println!("{marker} {} {:<9} {}{lock}", row.emoji, row.id, row.primary);
            }
        }
        ThemeCommands::Css => {
            state.restore()?;
            println!("{}", state.into_host().to_html());
        }
    }

    Ok(())
}

pub fn run_text_size<S: KeyValueStore>(command: TextSizeCommands, store: S) -> Result<()> {
    let mut state = PersonalizationState::new(store, StyleSheetRegistry::new());

    match command {
        TextSizeCommands::Get => println!("{}", state.current_text_size()),
        TextSizeCommands::Set { size } => {
            let applied = state.apply_text_size(&size)?;
            if TextSize::parse(&size).is_none() {
                eprintln!("Unknown text size `{size}`, using {applied}.");
            }
            println!("Text size set to {applied}");
        }
    }

    Ok(())
}
