// src/ingest/mod.rs
pub mod newsapi;
pub mod types;

use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series carry descriptions).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "ingest_headlines_total",
            "Headlines kept after normalization."
        );
        describe_counter!(
            "ingest_fetch_errors_total",
            "Headline source fetch/parse errors."
        );
        describe_histogram!("ingest_fetch_ms", "Headline fetch time in milliseconds.");
    });
}

/// Normalize a headline: decode HTML entities, strip tags, collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Collapse whitespace
    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_decodes_strips_and_collapses() {
        let s = "  <b>City&nbsp;council</b>   approves\n budget ";
        assert_eq!(normalize_text(s), "City council approves budget");
    }

    #[test]
    fn normalize_keeps_unicode_intact() {
        assert_eq!(normalize_text("Č&eacute;sk&aacute; zpr\u{00e1}va"), "Čéská zpráva");
    }

    #[test]
    fn normalize_reduces_markup_only_input_to_empty() {
        assert_eq!(normalize_text("<br/><p></p>"), "");
    }
}
