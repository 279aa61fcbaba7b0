use std::sync::OnceLock;

use regex::Regex;

fn punctuation() -> &'static Regex {
    static PUNCTUATION: OnceLock<Regex> = OnceLock::new();
    // `\w` and `\s` are Unicode-aware, so Hangul, CJK and accented letters survive.
    PUNCTUATION.get_or_init(|| Regex::new(r"[^\w\s]").expect("static pattern is valid"))
}

/// Removes every character that is neither a word character nor whitespace.
pub fn normalize(text: &str) -> String {
    punctuation().replace_all(text, "").into_owned()
}
