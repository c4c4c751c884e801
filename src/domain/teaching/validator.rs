//! Acceptance check for AI student replies.
//!
//! A reply is accepted when it asks something (contains `?`) and the question
//! is a probing one: it opens with, or contains as whole words, "how", "why"
//! or "what happens". The check is a substring match, not a grammar parse,
//! so loosely phrased questions still pass.

use once_cell::sync::Lazy;
use regex::Regex;

const QUESTION_STARTERS: [&str; 3] = ["how", "why", "what happens"];

static PROBING_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(how|why|what happens)\b").expect("probing phrase pattern"));

/// Returns true if `text` satisfies the deep-question contract.
pub fn is_deep_question(text: &str) -> bool {
    if !text.contains('?') {
        return false;
    }

    let lowered = text.trim().to_lowercase();
    QUESTION_STARTERS
        .iter()
        .any(|starter| lowered.starts_with(starter))
        || PROBING_PHRASE.is_match(&lowered)
}
