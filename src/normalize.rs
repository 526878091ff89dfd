use crate::config::Config;
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static RE_CONTROL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\n\r\t]").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse raw page text into single-space-separated form.
///
/// Line breaks and tabs become spaces, every whitespace run becomes one
/// space, and the ends are trimmed. The result never holds two adjacent
/// spaces, so feeding it back in returns it unchanged.
pub fn normalize(raw: &str) -> String {
    let text = RE_CONTROL.replace_all(raw, " ");
    let text = RE_WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

pub fn normalize_with(raw: &str, config: &Config) -> String {
    if config.unicode_nfkc {
        let folded: String = raw.nfkc().collect();
        normalize(&folded)
    } else {
        normalize(raw)
    }
}
