//! Character-distribution entropy.
//!
//! Shannon entropy (base 2) over the case-folded alphanumeric characters of
//! the text, normalized by a fixed reference maximum.

use std::collections::BTreeMap;

use super::{score_text, TextScorer};
use crate::result::MetricResult;

/// Reference maximum in bits per character.
///
/// A fixed policy value rather than a derived bound (log2 of 36 symbols is
/// about 5.17), so highly diverse text saturates at 1.0.
pub const REFERENCE_MAX_BITS: f64 = 4.7;

/// Shannon entropy in bits of the case-folded alphanumeric characters.
///
/// Returns 0.0 when the text has no alphanumeric characters.
pub fn shannon_entropy(text: &str) -> f64 {
    // BTreeMap keeps summation order, and so the result, bit-for-bit stable
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    let mut total = 0usize;
    for c in text
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        // folding can emit combining marks, e.g. 'İ' -> "i\u{307}"
        .filter(|c| c.is_alphanumeric())
    {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }

    if total == 0 {
        return 0.0;
    }

    let n = total as f64;
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            -p * p.log2()
        })
        .sum()
}

/// Built-in entropy scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyScorer;

impl TextScorer for EntropyScorer {
    fn name(&self) -> &'static str {
        "entropy"
    }

    fn score(&self, text: &str) -> MetricResult<f64> {
        score_text(self.name(), text, |text| {
            Ok((shannon_entropy(text) / REFERENCE_MAX_BITS).min(1.0))
        })
    }
}
