// src/classify.rs
// Polarity -> emotion label assignment. Pure and total over finite floats;
// NaN handling is the caller's job (the orchestrator maps non-finite
// polarity to 0.0 before calling in here).

use serde::{Deserialize, Serialize};

/// Coarse emotional label assigned to one headline.
/// The store contract renders the third label as `"Fear/Anger"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Optimism,
    Neutral,
    #[serde(rename = "Fear/Anger")]
    FearAnger,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Optimism => "Optimism",
            Emotion::Neutral => "Neutral",
            Emotion::FearAnger => "Fear/Anger",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification cutoffs. Invariant: `negative_cutoff < positive_cutoff`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreThresholds {
    positive_cutoff: f64,
    negative_cutoff: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            positive_cutoff: 0.1,
            negative_cutoff: -0.1,
        }
    }
}

impl ScoreThresholds {
    pub fn new(positive_cutoff: f64, negative_cutoff: f64) -> anyhow::Result<Self> {
        anyhow::ensure!(
            negative_cutoff < positive_cutoff,
            "negative cutoff {negative_cutoff} must lie below positive cutoff {positive_cutoff}"
        );
        Ok(Self {
            positive_cutoff,
            negative_cutoff,
        })
    }

    pub fn positive_cutoff(&self) -> f64 {
        self.positive_cutoff
    }

    pub fn negative_cutoff(&self) -> f64 {
        self.negative_cutoff
    }

    /// Strict inequality on both sides: a polarity sitting exactly on either
    /// cutoff stays Neutral.
    pub fn classify(&self, polarity: f64) -> Emotion {
        if polarity > self.positive_cutoff {
            Emotion::Optimism
        } else if polarity < self.negative_cutoff {
            Emotion::FearAnger
        } else {
            Emotion::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_neutral() {
        let t = ScoreThresholds::default();
        assert_eq!(t.classify(0.1), Emotion::Neutral);
        assert_eq!(t.classify(-0.1), Emotion::Neutral);
        assert_eq!(t.classify(0.0), Emotion::Neutral);
    }

    #[test]
    fn strict_inequality_past_the_cutoffs() {
        let t = ScoreThresholds::default();
        assert_eq!(t.classify(0.1000001), Emotion::Optimism);
        assert_eq!(t.classify(-0.1000001), Emotion::FearAnger);
        assert_eq!(t.classify(1.0), Emotion::Optimism);
        assert_eq!(t.classify(-1.0), Emotion::FearAnger);
    }

    #[test]
    fn inverted_cutoffs_are_rejected() {
        assert!(ScoreThresholds::new(-0.1, 0.1).is_err());
        assert!(ScoreThresholds::new(0.1, 0.1).is_err());
        assert!(ScoreThresholds::new(0.1, -0.1).is_ok());
    }

    #[test]
    fn emotion_serializes_with_slash_form() {
        assert_eq!(
            serde_json::to_value(Emotion::FearAnger).unwrap(),
            serde_json::json!("Fear/Anger")
        );
        assert_eq!(
            serde_json::to_value(Emotion::Optimism).unwrap(),
            serde_json::json!("Optimism")
        );
        let back: Emotion = serde_json::from_str(r#""Fear/Anger""#).unwrap();
        assert_eq!(back, Emotion::FearAnger);
    }
}
