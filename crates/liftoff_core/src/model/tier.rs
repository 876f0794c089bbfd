//! Subscription tier and gated feature declarations.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Locally recorded subscription level. Not a verified entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    Free,
    Pro,
    Ultra,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Self::Free, Self::Pro, Self::Ultra];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Ultra => "ultra",
        }
    }

    /// Case-insensitive parse of a stored or header label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Some(Self::Free),
            "pro" => Some(Self::Pro),
            "ultra" => Some(Self::Ultra),
            _ => None,
        }
    }

    /// Capability set granted to this tier.
    pub fn features(self) -> &'static [Feature] {
        match self {
            Self::Free => &[],
            Self::Pro | Self::Ultra => &[
                Feature::AdvancedMode,
                Feature::AllThemes,
                Feature::AssistantEverywhere,
            ],
        }
    }

    pub fn allows(self, feature: Feature) -> bool {
        self.features().contains(&feature)
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier-gated capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    /// Advanced generation mode.
    AdvancedMode,
    /// Full theme catalog instead of the baseline theme only.
    AllThemes,
    /// Assistant reachable from every page, not only its own tab.
    AssistantEverywhere,
}

/// Wire name for advanced mode.
pub const FEATURE_ADVANCED_MODE: &str = "advanced_mode";
/// Wire name for the full theme catalog.
pub const FEATURE_ALL_THEMES: &str = "all_themes";
/// Wire name for cross-page assistant access.
pub const FEATURE_ASSISTANT_EVERYWHERE: &str = "aviator_everywhere";

impl Feature {
    pub const ALL: [Feature; 3] = [
        Self::AdvancedMode,
        Self::AllThemes,
        Self::AssistantEverywhere,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AdvancedMode => FEATURE_ADVANCED_MODE,
            Self::AllThemes => FEATURE_ALL_THEMES,
            Self::AssistantEverywhere => FEATURE_ASSISTANT_EVERYWHERE,
        }
    }

    /// Message shown when a lower tier hits this gate.
    pub fn upgrade_message(self) -> &'static str {
        match self {
            Self::AdvancedMode => "Advanced Mode is only available in Pro and Ultra plans",
            Self::AllThemes => "Premium themes are only available in Pro and Ultra plans",
            Self::AssistantEverywhere => {
                "Aviator access outside the Aviator tab is only available in Pro and Ultra plans"
            }
        }
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one feature from its wire name. Matching is exact.
pub fn parse_feature(value: &str) -> Result<Feature, FeatureParseError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(FeatureParseError::EmptyFeature);
    }

    match normalized {
        FEATURE_ADVANCED_MODE => Ok(Feature::AdvancedMode),
        FEATURE_ALL_THEMES => Ok(Feature::AllThemes),
        FEATURE_ASSISTANT_EVERYWHERE => Ok(Feature::AssistantEverywhere),
        other => Err(FeatureParseError::UnknownFeature(other.to_string())),
    }
}

/// Feature name parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureParseError {
    EmptyFeature,
    UnknownFeature(String),
}

impl Display for FeatureParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFeature => write!(f, "feature name must not be empty"),
            Self::UnknownFeature(value) => write!(f, "unknown feature: {value}"),
        }
    }
}

impl Error for FeatureParseError {}
