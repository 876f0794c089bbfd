//! Global presentation rule-sets and the host they are installed into.
//!
//! # Responsibility
//! - Render theme and text-size rule-sets from their typed selections.
//! - Abstract the UI tree as a `StyleHost` with one replaceable slot per
//!   concern, so at most one themed and one sized rule-set is ever active.

use std::collections::BTreeMap;

mod text_size_rules;
mod theme_rules;

pub use text_size_rules::render_text_size_rules;
pub use theme_rules::render_theme_rules;

/// Replaceable rule-set slot in the UI tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleSlot {
    Theme,
    TextSize,
}

impl StyleSlot {
    /// Element id of the `<style>` node holding this slot.
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Theme => "liftoff-theme-css",
            Self::TextSize => "liftoff-textsize-css",
        }
    }
}

/// UI tree that accepts injected rule-sets.
pub trait StyleHost {
    /// Installs `rules` into `slot`.
    fn install(&mut self, slot: StyleSlot, rules: String);
    /// Removes whatever `slot` holds. Removing an empty slot is a no-op.
    fn remove(&mut self, slot: StyleSlot);
}

impl<H: StyleHost + ?Sized> StyleHost for &mut H {
    fn install(&mut self, slot: StyleSlot, rules: String) {
        (**self).install(slot, rules);
    }

    fn remove(&mut self, slot: StyleSlot) {
        (**self).remove(slot);
    }
}

/// In-memory style host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheetRegistry {
    sheets: BTreeMap<StyleSlot, String>,
}

impl StyleSheetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules currently installed in `slot`.
    pub fn rules(&self, slot: StyleSlot) -> Option<&str> {
        self.sheets.get(&slot).map(String::as_str)
    }

    /// Number of installed rule-sets.
    pub fn installed_count(&self) -> usize {
        self.sheets.len()
    }

    /// Renders every installed rule-set as `<style>` elements.
    pub fn to_html(&self) -> String {
        self.sheets
            .iter()
            .map(|(slot, rules)| format!("<style id=\"{}\">\n{}\n</style>", slot.element_id(), rules))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl StyleHost for StyleSheetRegistry {
    fn install(&mut self, slot: StyleSlot, rules: String) {
        self.sheets.insert(slot, rules);
    }

    fn remove(&mut self, slot: StyleSlot) {
        self.sheets.remove(&slot);
    }
}
