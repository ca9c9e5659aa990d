use crate::vocabulary::Vocabulary;

/// Score for a sub-word found in the dictionary or allowlist.
pub const FULL_MATCH: f64 = 1.0;
/// Score for a sub-word sharing a 3-character substring with a dictionary word.
pub const PARTIAL_MATCH: f64 = 0.5;
/// Score for a sub-word with no dictionary overlap.
pub const NO_MATCH: f64 = 0.0;

/// Minimum length (in characters) for dictionary and partial matching.
const MIN_MATCH_LEN: usize = 3;

/// Scores sub-words against a vocabulary.
#[derive(Debug, Clone)]
pub struct DictionaryMatcher {
    vocabulary: Vocabulary,
}

impl DictionaryMatcher {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Score one sub-word. The allowlist is consulted before the length gate,
    /// so short allowlisted tokens still score a full match.
    pub fn match_score(&self, subword: &str) -> f64 {
        let word = subword.to_lowercase();

        if self.vocabulary.is_allowlisted(&word) {
            return FULL_MATCH;
        }

        let len = word.chars().count();
        if len >= MIN_MATCH_LEN && self.vocabulary.contains(&word) {
            return FULL_MATCH;
        }
        if len < MIN_MATCH_LEN {
            return NO_MATCH;
        }

        if self.vocabulary.shares_trigram(&word) {
            PARTIAL_MATCH
        } else {
            NO_MATCH
        }
    }
}
