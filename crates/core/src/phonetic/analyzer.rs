//! Word-level analysis: variant selection, segmentation, rhyme keys.

use crate::dict::store::{normalize_word, PronunciationStore};
use crate::phonetic::estimate::fallback_analysis;
use crate::phonetic::syllables::{rhyme_key, segment_syllables};
use crate::types::{PhonemeToken, Stress, WordAnalysis};

/// Score bonus for an exact syllable-count match.
const SYLLABLE_MATCH_BONUS: f64 = 10.0;
/// Penalty per syllable of count mismatch.
const SYLLABLE_MISMATCH_PENALTY: f64 = 2.0;
/// Bonus for a monosyllable whose stress matches the preference.
const STRESS_MATCH_BONUS: f64 = 5.0;
/// Lesser bonus when primary stress is wanted and the variant carries
/// any nonzero stress.
const STRESS_NONZERO_BONUS: f64 = 2.0;
/// Per-syllable tie-break favoring the shorter variant.
const BREVITY_WEIGHT: f64 = 0.5;

fn syllable_count(variant: &[PhonemeToken]) -> usize {
    variant.iter().filter(|t| t.is_vowel()).count()
}

fn score_variant(
    variant: &[PhonemeToken],
    preferred_syllables: Option<usize>,
    preferred_stress: Option<Stress>,
) -> f64 {
    let n = syllable_count(variant);
    let mut score = 0.0;

    if let Some(pref) = preferred_syllables {
        if n == pref {
            score += SYLLABLE_MATCH_BONUS;
        } else {
            score -= SYLLABLE_MISMATCH_PENALTY * (n.abs_diff(pref) as f64);
        }
    }

    if n == 1 {
        if let Some(pref) = preferred_stress {
            let actual = variant
                .iter()
                .find_map(|t| t.stress)
                .unwrap_or(Stress::None);
            if actual == pref {
                score += STRESS_MATCH_BONUS;
            } else if pref == Stress::Primary && actual != Stress::None {
                score += STRESS_NONZERO_BONUS;
            }
        }
    }

    score - BREVITY_WEIGHT * n as f64
}

/// Choose the best pronunciation among several variants.
///
/// Scores each variant against the caller's syllable-count and stress
/// preferences; the first-listed variant wins ties, preserving the
/// table's preference order.
pub fn pick_best_variant<'a>(
    variants: &'a [Vec<PhonemeToken>],
    preferred_syllables: Option<usize>,
    preferred_stress: Option<Stress>,
) -> &'a [PhonemeToken] {
    debug_assert!(!variants.is_empty());
    let mut best = &variants[0];
    let mut best_score = score_variant(best, preferred_syllables, preferred_stress);

    for variant in &variants[1..] {
        let score = score_variant(variant, preferred_syllables, preferred_stress);
        if score > best_score {
            best = variant;
            best_score = score;
        }
    }
    best
}

/// Analyze one word through the pronunciation store.
///
/// Absent words route to the spelling heuristic (`found=false`); a
/// single table variant is segmented directly; multiple variants go
/// through [`pick_best_variant`] first.
pub fn analyze_word(
    store: &PronunciationStore,
    word: &str,
    preferred_stress: Option<Stress>,
    preferred_syllables: Option<usize>,
) -> WordAnalysis {
    let normalized = normalize_word(word);

    let variants = match store.resolve_all(&normalized) {
        Some(v) => v,
        None => return fallback_analysis(word, &normalized),
    };

    let seq: &[PhonemeToken] = if variants.len() == 1 {
        &variants[0]
    } else {
        pick_best_variant(variants, preferred_syllables, preferred_stress)
    };

    WordAnalysis {
        word: normalized,
        original_word: word.to_string(),
        syllables: segment_syllables(seq),
        rhyme_key: rhyme_key(seq),
        found: true,
    }
}
