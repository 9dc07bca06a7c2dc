//! Canonical mention selection for coreference groups.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{EventGraphError, Result};
use crate::result::Mention;

/// How to pick the one mention that labels a whole group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CanonicalPolicy {
    /// Longest text; the later mention wins among equal lengths.
    #[default]
    Longest,
    /// Most frequent text; the earliest-seen text wins among equal counts.
    MostCommon,
    /// Whatever was mentioned first.
    First,
}

impl CanonicalPolicy {
    /// Lenient parse: anything other than `longest`/`most_common` means `First`.
    pub fn parse(name: &str) -> Self {
        name.parse().unwrap_or(CanonicalPolicy::First)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalPolicy::Longest => "longest",
            CanonicalPolicy::MostCommon => "most_common",
            CanonicalPolicy::First => "first",
        }
    }
}

impl fmt::Display for CanonicalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalPolicy {
    type Err = EventGraphError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "longest" => Ok(CanonicalPolicy::Longest),
            "most_common" => Ok(CanonicalPolicy::MostCommon),
            "first" => Ok(CanonicalPolicy::First),
            other => Err(EventGraphError::InvalidInput(format!(
                "unknown canonical policy `{}` (expected longest|most_common|first)",
                other
            ))),
        }
    }
}

/// Pick the representative mention of a group.
///
/// Returns a one-element list so callers can iterate over it the same way
/// they iterate over every other mention list.
pub fn get_canonical_mention(mentions: &[Mention], policy: CanonicalPolicy) -> Result<Vec<&Mention>> {
    if mentions.is_empty() {
        return Err(EventGraphError::InvalidInput(
            "cannot pick a canonical mention from an empty group".to_string(),
        ));
    }

    let index = match policy {
        CanonicalPolicy::Longest => {
            // Stable sort by length, take the last one.
            let mut order: Vec<usize> = (0..mentions.len()).collect();
            order.sort_by_key(|&i| mentions[i].text.chars().count());
            order[order.len() - 1]
        }
        CanonicalPolicy::MostCommon => {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for m in mentions {
                *counts.entry(m.text.as_str()).or_insert(0) += 1;
            }
            // First index holding the highest count; ties keep the earlier text.
            let mut best = 0;
            for (i, m) in mentions.iter().enumerate() {
                if counts[m.text.as_str()] > counts[mentions[best].text.as_str()] {
                    best = i;
                }
            }
            best
        }
        CanonicalPolicy::First => 0,
    };

    Ok(vec![&mentions[index]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mention(text: &str) -> Mention {
        Mention {
            text: text.to_string(),
            mention_type: "ORGANIZATION".to_string(),
            score: 0.9,
            group_score: 0.9,
            begin_offset: None,
            end_offset: None,
        }
    }

    fn mentions(texts: &[&str]) -> Vec<Mention> {
        texts.iter().map(|t| mention(t)).collect()
    }

    #[test]
    fn test_longest_picks_max_length() {
        let group = mentions(&["Acme", "Acme Corporation", "it"]);
        let picked = get_canonical_mention(&group, CanonicalPolicy::Longest).unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].text, "Acme Corporation");
    }

    #[test]
    fn test_longest_tie_prefers_later_mention() {
        let mut group = mentions(&["abcd", "x", "wxyz"]);
        group[2].score = 0.1;
        let picked = get_canonical_mention(&group, CanonicalPolicy::Longest).unwrap();
        assert_eq!(picked[0].text, "wxyz");
        assert_eq!(picked[0].score, 0.1);
    }

    #[test]
    fn test_longest_counts_characters_not_bytes() {
        let group = mentions(&["Société", "Societies"]);
        let picked = get_canonical_mention(&group, CanonicalPolicy::Longest).unwrap();
        assert_eq!(picked[0].text, "Societies");
    }

    #[test]
    fn test_most_common_picks_frequent_text() {
        let group = mentions(&["Acme Corp", "Acme", "the company", "Acme"]);
        let picked = get_canonical_mention(&group, CanonicalPolicy::MostCommon).unwrap();
        assert_eq!(picked[0].text, "Acme");
        assert!(std::ptr::eq(picked[0], &group[1]));
    }

    #[test]
    fn test_most_common_tie_prefers_first_seen() {
        let group = mentions(&["b", "a", "a", "b"]);
        let picked = get_canonical_mention(&group, CanonicalPolicy::MostCommon).unwrap();
        assert_eq!(picked[0].text, "b");
        assert!(std::ptr::eq(picked[0], &group[0]));
    }

    #[test]
    fn test_first_picks_index_zero() {
        let group = mentions(&["it", "Acme Corporation"]);
        let picked = get_canonical_mention(&group, CanonicalPolicy::First).unwrap();
        assert_eq!(picked[0].text, "it");
    }

    #[test]
    fn test_empty_group_is_invalid_input() {
        let err = get_canonical_mention(&[], CanonicalPolicy::Longest).unwrap_err();
        assert!(matches!(err, EventGraphError::InvalidInput(_)));
    }

    #[test]
    fn test_lenient_parse_falls_back_to_first() {
        assert_eq!(CanonicalPolicy::parse("longest"), CanonicalPolicy::Longest);
        assert_eq!(CanonicalPolicy::parse("most_common"), CanonicalPolicy::MostCommon);
        assert_eq!(CanonicalPolicy::parse("shortest"), CanonicalPolicy::First);
        assert!("shortest".parse::<CanonicalPolicy>().is_err());
    }
}
