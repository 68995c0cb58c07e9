// tests/classify_boundaries.rs
//
// Threshold iff-properties over the whole polarity range, plus the two
// exact boundary cases.

use city_mood_analyzer::{Emotion, ScoreThresholds};

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[test]
fn labels_match_the_cutoff_predicates_across_the_range() {
    let t = ScoreThresholds::default();
    let mut step = 0i32;
    while step <= 200 {
        let p = round2(-1.0 + f64::from(step) * 0.01);
        let expected = if p > 0.1 {
            Emotion::Optimism
        } else if p < -0.1 {
            Emotion::FearAnger
        } else {
            Emotion::Neutral
        };
        assert_eq!(t.classify(p), expected, "polarity {p}");
        step += 1;
    }
}

#[test]
fn both_boundary_values_are_neutral() {
    let t = ScoreThresholds::default();
    assert_eq!(t.classify(0.1), Emotion::Neutral);
    assert_eq!(t.classify(-0.1), Emotion::Neutral);
}

#[test]
fn extremes_get_the_outer_labels() {
    let t = ScoreThresholds::default();
    assert_eq!(t.classify(1.0), Emotion::Optimism);
    assert_eq!(t.classify(-1.0), Emotion::FearAnger);
}

#[test]
fn custom_cutoffs_shift_the_bands() {
    let t = ScoreThresholds::new(0.5, -0.5).unwrap();
    assert_eq!(t.classify(0.4), Emotion::Neutral);
    assert_eq!(t.classify(0.5), Emotion::Neutral);
    assert_eq!(t.classify(0.51), Emotion::Optimism);
    assert_eq!(t.classify(-0.49), Emotion::Neutral);
    assert_eq!(t.classify(-0.51), Emotion::FearAnger);
}
