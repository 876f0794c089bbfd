use crate::model::preference::TextSize;

const BODY_SELECTORS: &str =
    "body,p,li,td,th,span,div,.note-content,.message-bubble,.test-card,.flashcard-back,.flashcard-front p";
const HEADING_SELECTORS: &str = ".main h1,.header h1";
const SUBHEADING_SELECTORS: &str = "h2,h3,.note-content h2,.note-content h3";

/// Renders the font-size overrides for `size`.
pub fn render_text_size_rules(size: TextSize) -> String {
    let scale = size.font_scale();
    [
        (BODY_SELECTORS, scale.body_px),
        (HEADING_SELECTORS, scale.heading_px),
        (SUBHEADING_SELECTORS, scale.subheading_px),
    ]
    .iter()
    .map(|(selectors, px)| format!("{selectors}{{font-size:{px}px!important}}"))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::render_text_size_rules;
    use crate::model::preference::TextSize;

    #[test]
    fn big_size_scales_body_and_headings() {
        let rules = render_text_size_rules(TextSize::Big);
        assert_eq!(rules.lines().count(), 3);
        assert!(rules.contains("body,p,li,td,th,span,div"));
        assert!(rules.contains("{font-size:18px!important}"));
        assert!(rules.contains(".main h1,.header h1{font-size:24px!important}"));
        assert!(rules.ends_with(".note-content h3{font-size:21px!important}"));
    }
}
