//! Role and menu administration.
//!
//! The role-menu relation stores its menu ids as one legacy bracket-encoded
//! string ("[11][12]"); both services share the codec below.

pub mod menu;
pub mod role;

use once_cell::sync::Lazy;
use regex::Regex;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid id pattern"));

/// Extracts every integer from a bracket-encoded id string.
pub(crate) fn parse_bracket_ids(raw: &str) -> Vec<i64> {
    ID_PATTERN
        .find_iter(raw)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

pub(crate) fn encode_bracket_ids(ids: &[i64]) -> String {
    ids.iter().map(|id| format!("[{id}]")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_codec_round_trips() {
        assert_eq!(parse_bracket_ids("[11][12][305]"), vec![11, 12, 305]);
        assert_eq!(encode_bracket_ids(&[11, 12, 305]), "[11][12][305]");
        assert!(parse_bracket_ids("").is_empty());
        assert!(parse_bracket_ids("[]").is_empty());
    }
}
