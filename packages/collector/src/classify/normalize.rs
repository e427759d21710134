//! Text normalization shared by the classification strategies.

use std::sync::OnceLock;

use regex::Regex;

struct Patterns {
    url: Regex,
    mention: Regex,
    hashtag: Regex,
    punct: Regex,
    space: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        url: Regex::new(r"https?://\S+").expect("static regex"),
        mention: Regex::new(r"@\w+").expect("static regex"),
        hashtag: Regex::new(r"#(\w+)").expect("static regex"),
        punct: Regex::new(r"[^\w\s]").expect("static regex"),
        space: Regex::new(r"\s+").expect("static regex"),
    })
}

/// Normalize post text for keyword matching and sentiment scoring.
///
/// Strips URLs and @-mentions, keeps hashtag words without the `#`
/// marker, collapses punctuation and runs of whitespace.
pub fn normalize(text: &str) -> String {
    let p = patterns();
    let text = p.url.replace_all(text, "");
    let text = p.mention.replace_all(&text, "");
    let text = p.hashtag.replace_all(&text, "$1");
    let text = p.punct.replace_all(&text, " ");
    let text = p.space.replace_all(&text, " ");
    text.trim().to_string()
}

/// Count how many of the given indicator terms occur in the text,
/// case-insensitively. Multi-word terms match as substrings.
pub fn count_indicators(text: &str, terms: &[&str]) -> usize {
    let lower = text.to_lowercase();
    terms
        .iter()
        .filter(|term| lower.contains(&term.to_lowercase()))
        .count()
}
