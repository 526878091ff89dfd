use crate::model::{Outcome, WordCount};

pub const ERROR: &str = "ERROR";
pub const NAVIGATION_CANCELED: &str = "Navigation Canceled";
pub const EMPTY: &str = "EMPTY";

fn emit_word(out: &mut String, entry: &WordCount) {
    out.push_str("[WORD]: ");
    out.push_str(entry.word.trim());
    out.push_str(" [COUNT]: ");
    out.push_str(&entry.count.to_string());
    out.push('\r');
}

pub fn emit_ranking(words: &[WordCount]) -> String {
    let mut out = String::new();
    for entry in words {
        emit_word(&mut out, entry);
    }
    out
}

/// Render an outcome as the plain-text report.
pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Error => ERROR.to_string(),
        Outcome::NavigationCanceled => NAVIGATION_CANCELED.to_string(),
        Outcome::Empty => EMPTY.to_string(),
        Outcome::Ranked { words } => emit_ranking(words),
    }
}

pub fn render_json(outcome: &Outcome) -> String {
    // Outcome holds only strings and integers
    serde_json::to_string(outcome).unwrap_or_else(|_| r#"{"status":"error"}"#.to_string())
}
