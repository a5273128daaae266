//! Blank-line normalization for generated markdown.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(#+[ \t])").expect("heading pattern is valid"));
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(-|\d+\.)[ \t]").expect("list item pattern is valid"));
static BLANK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("blank run pattern is valid"));

/// Normalizes spacing without touching content:
///
/// 1. one blank line before every heading,
/// 2. one blank line before every list item, with a single space after the marker,
/// 3. runs of three or more newlines collapse to a single blank line,
/// 4. surrounding whitespace is trimmed.
///
/// Applying it twice gives the same result as applying it once.
pub fn format_markdown(content: &str) -> String {
    let spaced = HEADING.replace_all(content, "\n\n${1}");
    let spaced = LIST_ITEM.replace_all(&spaced, "\n\n${1} ");
    let collapsed = BLANK_RUN.replace_all(&spaced, "\n\n");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_blank_line_before_heading() {
        assert_eq!(format_markdown("text\n## Title"), "text\n\n## Title");
    }

    #[test]
    fn test_blank_line_before_list_items() {
        assert_eq!(
            format_markdown("Intro\n- one\n-\ttwo\n1. three"),
            "Intro\n\n- one\n\n- two\n\n1. three"
        );
    }

    #[test]
    fn test_collapses_blank_runs_and_trims() {
        assert_eq!(format_markdown("\n\n a\n\n\n\n\nb \n\n"), "a\n\nb");
    }

    #[test]
    fn test_rules_hold_together() {
        let raw = "# Foo\n\n\n\nBar\n## Usage\nSteps:\n1. build\n2. run\n\n\n";
        assert_eq!(
            format_markdown(raw),
            "# Foo\n\nBar\n\n## Usage\nSteps:\n\n1. build\n\n2. run"
        );
    }

    #[test]
    fn test_marker_without_separator_is_left_alone() {
        assert_eq!(format_markdown("a\n---\nb\n#tag"), "a\n---\nb\n#tag");
    }

    #[test]
    fn test_bare_marker_before_heading_stays_stable() {
        let once = format_markdown("x\n-\n# h");
        assert_eq!(format_markdown(&once), once);
    }

    proptest! {
        #[test]
        fn prop_format_is_idempotent(input in "[-#1. \t\r\nab]{0,64}") {
            let once = format_markdown(&input);
            prop_assert_eq!(format_markdown(&once), once);
        }

        #[test]
        fn prop_format_is_idempotent_on_any_text(input in any::<String>()) {
            let once = format_markdown(&input);
            prop_assert_eq!(format_markdown(&once), once);
        }
    }
}
