//! Spelling-based fallback for words absent from the pronunciation table.
//!
//! Produces a syllable-count estimate from vowel groups with
//! English-specific corrections, then a synthetic stress pattern and an
//! orthographic rhyme-key approximation. Deliberately rough: a miss is a
//! soft-warning branch, not an error path.

use std::collections::HashMap;

use crate::types::{Stress, Syllable, WordAnalysis};

lazy_static::lazy_static! {
    /// Syllable counts for short archaic and contracted forms the vowel
    /// grouping gets wrong (elided vowels, smoothed diphthongs).
    static ref SYLLABLE_EXCEPTIONS: HashMap<&'static str, usize> = {
        let mut m = HashMap::new();
        m.insert("fire", 1);
        m.insert("hour", 1);
        m.insert("prayer", 1);
        m.insert("o'er", 1);
        m.insert("e'er", 1);
        m.insert("ne'er", 1);
        m.insert("e'en", 1);
        m.insert("'tis", 1);
        m.insert("'twas", 1);
        m.insert("heav'n", 1);
        m.insert("ev'ry", 2);
        m.insert("whate'er", 2);
        m.insert("howe'er", 2);
        m
    };

    /// Suffixes that pull primary stress toward the front of the word,
    /// paired with the stressed syllable's distance from the word end.
    /// Longer suffixes first so "-ical" wins over "-ic".
    static ref STRESS_SHIFT_SUFFIXES: Vec<(&'static str, usize)> = vec![
        ("ical", 3),
        ("ity", 3),
        ("ety", 3),
        ("tion", 2),
        ("sion", 2),
        ("ic", 2),
    ];
}

fn is_vowel_letter(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Count vowel groups in the spelling.
fn vowel_groups(word: &str) -> usize {
    let mut count = 0;
    let mut in_group = false;
    for c in word.chars() {
        if is_vowel_letter(c) {
            if !in_group {
                count += 1;
            }
            in_group = true;
        } else {
            in_group = false;
        }
    }
    count
}

/// Estimate the syllable count of a written word. Never returns 0.
///
/// Vowel-group counting corrected for silent terminal "e" (kept before
/// consonant+"le" endings), non-syllabic "-ed" and "-es", and the
/// "-tion"/"-sion"/"-ious"/"-eous" endings which compress two written
/// vowel letters into a glide plus a full syllable.
pub fn estimate_syllable_count(word: &str) -> usize {
    let w = word.to_ascii_lowercase();

    if let Some(&n) = SYLLABLE_EXCEPTIONS.get(w.as_str()) {
        return n;
    }

    let mut count = vowel_groups(&w);
    let chars: Vec<char> = w.chars().collect();
    let len = chars.len();

    if ["tion", "sion", "ious", "eous"].iter().any(|s| w.ends_with(s)) {
        count += 1;
    } else if w.ends_with("ed") && len >= 3 {
        // Syllabic only after d/t: "wanted" yes, "loved" no
        if !matches!(chars[len - 3], 'd' | 't') {
            count = count.saturating_sub(1);
        }
    } else if w.ends_with("es") && len >= 3 {
        // Syllabic only after a sibilant: "boxes" yes, "makes" no.
        // Indexing is over chars, not bytes, so non-ASCII stems are safe.
        let stem: String = chars[..len - 2].iter().collect();
        let sibilant = stem.ends_with('s')
            || stem.ends_with('z')
            || stem.ends_with('x')
            || stem.ends_with("ch")
            || stem.ends_with("sh");
        if !sibilant {
            count = count.saturating_sub(1);
        }
    } else if w.ends_with('e') && len >= 2 {
        // Silent terminal e, except consonant+le ("table")
        let consonant_le = w.ends_with("le") && len >= 3 && !is_vowel_letter(chars[len - 3]);
        if !consonant_le {
            count = count.saturating_sub(1);
        }
    }

    count.max(1)
}

/// Index of the syllable guessed to carry primary stress.
fn guess_stress_index(word: &str, count: usize) -> usize {
    if count <= 2 {
        return 0;
    }
    for (suffix, from_end) in STRESS_SHIFT_SUFFIXES.iter() {
        if word.ends_with(suffix) {
            return count.saturating_sub(*from_end);
        }
    }
    1
}

/// Build a heuristic [`WordAnalysis`] for a word with no table entry.
///
/// Syllables are synthetic (no phonemes, stress tags only) and the rhyme
/// key is the final one or two letters of the word itself — orthographic,
/// so it only ever matches other heuristic keys.
pub fn fallback_analysis(original_word: &str, normalized: &str) -> WordAnalysis {
    let count = estimate_syllable_count(normalized);
    let stress_index = guess_stress_index(normalized, count);

    let syllables: Vec<Syllable> = (0..count)
        .map(|i| Syllable {
            phonemes: vec![],
            stress: if i == stress_index {
                Stress::Primary
            } else {
                Stress::None
            },
        })
        .collect();

    let tail_len = normalized.chars().count().min(2);
    let rhyme_key: String = normalized
        .chars()
        .skip(normalized.chars().count() - tail_len)
        .collect();

    log::debug!(
        "Fallback analysis for '{}': {} syllables, stress at {}",
        normalized,
        count,
        stress_index
    );

    WordAnalysis {
        word: normalized.to_string(),
        original_word: original_word.to_string(),
        syllables,
        rhyme_key,
        found: false,
    }
}
