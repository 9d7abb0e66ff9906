//! Sentence-pair contradiction candidates.
//!
//! A pair of sentences is a candidate when exactly one of them carries a
//! negation marker and they share at least two content words (longer than
//! three characters). The score is `min(candidates / 2, 1)`.

use std::collections::BTreeSet;

use super::{normalize_word, score_text, TextScorer};
use crate::result::MetricResult;

const NEGATION_MARKERS: [&str; 3] = ["not", "never", "don't"];
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];
const MIN_SHARED_WORDS: usize = 2;
const SATURATION: f64 = 2.0;

#[derive(Debug)]
struct Sentence {
    negated: bool,
    content_words: BTreeSet<String>,
}

impl Sentence {
    fn analyze(raw: &str) -> Self {
        let words: Vec<String> = raw
            .split_whitespace()
            .map(normalize_word)
            .filter(|w| !w.is_empty())
            .collect();

        let negated = words.iter().any(|w| NEGATION_MARKERS.contains(&w.as_str()));
        let content_words = words
            .into_iter()
            .filter(|w| w.chars().count() > 3)
            .collect();

        Self {
            negated,
            content_words,
        }
    }

    fn contradicts(&self, other: &Sentence) -> bool {
        self.negated != other.negated
            && self.content_words.intersection(&other.content_words).count() >= MIN_SHARED_WORDS
    }
}

/// Split text into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Index pairs `(i, j)`, `i < j`, of sentences flagged as contradiction
/// candidates.
pub fn candidate_pairs(text: &str) -> Vec<(usize, usize)> {
    let sentences: Vec<Sentence> = split_sentences(text)
        .into_iter()
        .map(Sentence::analyze)
        .collect();

    let mut pairs = Vec::new();
    for (i, first) in sentences.iter().enumerate() {
        for (j, second) in sentences.iter().enumerate().skip(i + 1) {
            if first.contradicts(second) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Built-in contradiction scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContradictionScorer;

impl TextScorer for ContradictionScorer {
    fn name(&self) -> &'static str {
        "contradiction"
    }

    fn score(&self, text: &str) -> MetricResult<f64> {
        score_text(self.name(), text, |text| {
            let candidates = candidate_pairs(text).len() as f64;
            Ok((candidates / SATURATION).min(1.0))
        })
    }
}
