//! Themed override rule-set.
//!
//! Each entry is `(selectors, declarations)`; declarations reference the
//! palette through `{c1}` `{c2}` (primary/secondary), `{c1l}` `{c2l}`
//! (light variants) and `{r1}` `{r2}` (RGB triples for translucent fills).
//! Every rendered declaration is marked `!important`.

use crate::model::preference::{ThemeId, ThemePalette};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(c1l|c2l|c1|c2|r1|r2)\}").expect("valid placeholder regex"));

const GRADIENT: &str = "background:linear-gradient(135deg,{c1},{c2})";
const GRADIENT_TEXT: &str =
    "background:linear-gradient(135deg,{c1l},{c2l});-webkit-background-clip:text;background-clip:text";

const THEMED_RULES: &[(&str, &str)] = &[
    // navigation
    (".nav-item.active", GRADIENT),
    (".nav-item:hover", "background:rgba({r1},0.2)"),
    // gradient text
    (".sidebar h2", GRADIENT_TEXT),
    (".logo-emoji", GRADIENT_TEXT),
    (".header h1", GRADIENT_TEXT),
    (".generating-message h3,.status-overlay h3", GRADIENT_TEXT),
    (".summary-score", GRADIENT_TEXT),
    (".score-percentage", GRADIENT_TEXT),
    // buttons
    (".btn-primary,.btn.btn-primary", GRADIENT),
    (
        ".btn-primary:hover,.btn.btn-primary:hover",
        "box-shadow:0 6px 20px rgba({r1},0.3)",
    ),
    (".chat-send-btn", GRADIENT),
    (
        ".btn-secondary:hover",
        "background:rgba({r1},0.2);border-color:rgba({r1},0.4)",
    ),
    (".btn-next", GRADIENT),
    (".btn-next:hover", "box-shadow:0 5px 15px rgba({r1},0.3)"),
    // chat
    (".message.user .message-bubble", GRADIENT),
    (
        ".message.ai .message-bubble,.message.assistant .message-bubble",
        "border-color:rgba({r1},0.3)",
    ),
    (".chat-header", "border-bottom-color:rgba({r1},0.2)"),
    // upload and input boxes
    (
        ".upload-box,.input-box",
        "border-color:rgba({r1},0.5);background:linear-gradient(135deg,rgba({r1},0.1),rgba({r2},0.1))",
    ),
    (
        ".upload-box:hover,.input-box:hover",
        "border-color:rgba({r1},0.8);background:linear-gradient(135deg,rgba({r1},0.2),rgba({r2},0.2))",
    ),
    // cards
    (".card", "border-color:rgba({r1},0.1)"),
    (
        ".test-card",
        "background:rgba({r1},0.1);border-color:rgba({r1},0.3)",
    ),
    (".test-card:hover", "background:rgba({r1},0.15)"),
    (".test-pdf-name", "color:{c1l}"),
    // progress and loader
    (
        ".progress-fill",
        "background:linear-gradient(90deg,{c1},{c2})",
    ),
    (
        ".loader",
        "border-color:rgba({r1},0.2);border-top-color:{c1l}",
    ),
    // flashcards
    (
        ".flashcard-front",
        "background:linear-gradient(135deg,rgba({r1},0.15),rgba({r2},0.15));border-color:rgba({r1},0.3)",
    ),
    (
        ".know-btn",
        "background:rgba({r1},0.2);border-color:rgba({r1},0.4);color:{c1l}",
    ),
    (".know-btn:hover", "background:rgba({r1},0.3)"),
    (
        ".next-after-reveal",
        "background:rgba({r1},0.2);border-color:rgba({r1},0.5);color:{c1l}",
    ),
    // flowchart
    (
        ".zoom-btn:hover",
        "background:rgba({r1},0.3);border-color:rgba({r1},0.5)",
    ),
    // inputs
    (
        ".input-wrapper textarea:focus,.text-input-wrapper textarea:focus",
        "border-color:rgba({r1},0.5)",
    ),
    // misc accents
    (
        ".upload-tip",
        "border-left-color:rgba({r1},0.4);background:rgba({r1},0.05)",
    ),
    (".or-divider", "color:rgba({r1},0.6)"),
    (".status-dot", "background:{c1}"),
    (
        ".difficulty-btn.selected",
        "border-color:rgba({r1},0.5);background:rgba({r1},0.15)",
    ),
    (
        ".topic-chip.selected",
        "border-color:rgba({r1},0.5);background:rgba({r1},0.15)",
    ),
    (".topic-custom-row input:focus", "border-color:{c1}"),
    // notes
    (".note-content h2", "border-bottom-color:rgba({r1},0.2)"),
    (".tooltip-box", "border-color:rgba({r1},0.3)"),
    (
        ".pdf-loaded-bar",
        "background:rgba({r1},0.1);border-color:rgba({r1},0.3)",
    ),
    // selections
    (
        ".option.selected",
        "border-color:rgba({r1},0.5);background:rgba({r1},0.1)",
    ),
    (
        ".level-btn:hover",
        "background:rgba({r1},0.2);border-color:rgba({r1},0.5)",
    ),
    (
        ".level-btn.selected",
        "background:linear-gradient(135deg,{c1},{c2});border-color:{c1}",
    ),
    // assistant page
    (
        ".aviator-input-area .input-wrapper textarea:focus",
        "border-color:rgba({r1},0.5)",
    ),
    (".message.ai .message-avatar", GRADIENT),
    (
        ".message.ai .message-bubble",
        "background:rgba({r1},0.2);border-color:rgba({r1},0.3)",
    ),
    (".send-btn", GRADIENT),
    (".send-btn:hover", "box-shadow:0 5px 15px rgba({r1},0.4)"),
    ("#chatInput:focus", "border-color:rgba({r1},0.7)"),
    (
        ".spinner",
        "border-color:rgba({r1},0.3);border-top-color:{c1l}",
    ),
    (
        ".info-panel",
        "background:rgba({r1},0.1);border-color:rgba({r1},0.3)",
    ),
    (".info-panel h4", "color:{c1l}"),
    (
        ".messages-area::-webkit-scrollbar-thumb",
        "background:rgba({r1},0.5)",
    ),
    // dashboard stats
    ("#totalTests", "color:{c1}"),
    ("#avgScore", "color:{c1l}"),
    ("#bestScore", "color:{c2l}"),
];

/// Renders the override rule-set for `theme`.
///
/// Returns `None` for the baseline theme, which needs no overrides.
pub fn render_theme_rules(theme: ThemeId) -> Option<String> {
    if theme.is_baseline() {
        return None;
    }

    let palette = theme.palette();
    let rules = THEMED_RULES
        .iter()
        .map(|(selectors, declarations)| {
            let declarations = declarations
                .split(';')
                .map(|declaration| format!("{}!important", fill_palette(declaration, palette)))
                .collect::<Vec<_>>()
                .join(";");
            format!("{selectors}{{{declarations}}}")
        })
        .collect::<Vec<_>>()
        .join("\n");
    Some(rules)
}

fn fill_palette(template: &str, palette: &ThemePalette) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "c1" => palette.primary.to_string(),
            "c2" => palette.secondary.to_string(),
            "c1l" => palette.primary_light.to_string(),
            "c2l" => palette.secondary_light.to_string(),
            "r1" => palette.primary_rgb.to_string(),
            _ => palette.secondary_rgb.to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::{render_theme_rules, THEMED_RULES};
    use crate::model::preference::ThemeId;

    #[test]
    fn baseline_theme_renders_no_rules() {
        assert_eq!(render_theme_rules(ThemeId::Ocean), None);
    }

    #[test]
    fn every_rule_is_filled_from_the_palette() {
        let rules = render_theme_rules(ThemeId::Emerald).expect("emerald has overrides");
        assert_eq!(rules.lines().count(), THEMED_RULES.len());
        for placeholder in ["{c1", "{c2", "{r1", "{r2"] {
            assert!(!rules.contains(placeholder), "unfilled {placeholder}");
        }
        assert!(rules.contains(
            ".nav-item.active{background:linear-gradient(135deg,#10b981,#06b6d4)!important}"
        ));
        assert!(rules.contains(".nav-item:hover{background:rgba(16,185,129,0.2)!important}"));
        assert!(rules.contains("#bestScore{color:#22d3ee!important}"));
    }

    #[test]
    fn multi_declaration_rules_mark_each_declaration_important() {
        let rules = render_theme_rules(ThemeId::Crimson).expect("crimson has overrides");
        assert!(rules.contains(
            ".sidebar h2{background:linear-gradient(135deg,#f87171,#fb923c)!important;-webkit-background-clip:text!important;background-clip:text!important}"
        ));
    }
}
