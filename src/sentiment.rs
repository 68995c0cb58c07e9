// src/sentiment.rs
// Lexicon-based polarity scoring behind a narrow capability seam so the
// backend stays swappable and testable with fixed input/output pairs.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

/// Largest absolute weight in the lexicon; anchor for normalization.
const MAX_WEIGHT: f64 = 3.0;

/// Capability seam: headline text to a polarity in [-1.0, 1.0].
/// Implementations must be deterministic, side-effect free, and must not
/// panic on empty or non-ASCII input.
pub trait SentimentBackend: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Default backend: lexicon lookup with negation inversion.
///
/// The polarity is the sum of matched word weights, sign-flipped when a
/// negator appears within the three preceding tokens, divided by
/// `MAX_WEIGHT * matched_count` and clamped. Text with no lexicon hits
/// (including empty and punctuation-only input) scores 0.0.
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn word_score(&self, w: &str) -> i32 {
        *LEXICON.get(w).unwrap_or(&0)
    }
}

impl SentimentBackend for LexiconAnalyzer {
    fn polarity(&self, text: &str) -> f64 {
        // Collect so we can index backwards for negation.
        let tokens: Vec<String> = tokenize(text).collect();

        let mut sum: i32 = 0;
        let mut hits: usize = 0;

        for i in 0..tokens.len() {
            let base = self.word_score(tokens[i].as_str());
            if base == 0 {
                continue;
            }
            // Negator in the previous 1..=3 tokens flips the sign.
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            sum += if negated { -base } else { base };
            hits += 1;
        }

        if hits == 0 {
            return 0.0;
        }
        (f64::from(sum) / (MAX_WEIGHT * hits as f64)).clamp(-1.0, 1.0)
    }
}

/// Alphanumeric tokens, lower-cased.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "won't"
            | "can't"
            | "cannot"
            | "without"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_punctuation_only_score_zero() {
        let a = LexiconAnalyzer::new();
        assert_eq!(a.polarity(""), 0.0);
        assert_eq!(a.polarity("?!... ---"), 0.0);
        assert_eq!(a.polarity("the committee met on tuesday"), 0.0);
    }

    #[test]
    fn polarity_stays_in_range_and_is_deterministic() {
        let a = LexiconAnalyzer::new();
        let samples = [
            "City wins award",
            "City in crisis",
            "disaster panic collapse fear",
            "record growth triumph celebrate victory",
            "naměřeno über 施設 mixed unicode input",
        ];
        for s in samples {
            let p = a.polarity(s);
            assert!((-1.0..=1.0).contains(&p), "polarity {p} out of range for {s:?}");
            assert_eq!(p, a.polarity(s), "non-deterministic for {s:?}");
        }
    }

    #[test]
    fn positive_and_negative_words_pull_apart() {
        let a = LexiconAnalyzer::new();
        assert!(a.polarity("City wins award") > 0.1);
        assert!(a.polarity("City in crisis") < -0.1);
        assert_eq!(a.polarity("City weather update"), 0.0);
    }

    #[test]
    fn negation_flips_a_nearby_word() {
        let a = LexiconAnalyzer::new();
        let plain = a.polarity("economy is strong");
        let negated = a.polarity("economy is not strong");
        assert!(plain > 0.0);
        assert!(negated < 0.0);
        assert_eq!(plain, -negated);
    }

    #[test]
    fn negator_outside_the_window_does_not_flip() {
        let a = LexiconAnalyzer::new();
        // "no" sits four tokens before "strong": outside the 3-token window.
        let p = a.polarity("no one in town doubts the strong economy");
        assert!(p > 0.0);
    }
}
