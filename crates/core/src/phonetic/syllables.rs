//! Syllable segmentation and rhyme keys from tagged phoneme sequences.
//!
//! Segmentation is stress-driven: each vowel token closes one syllable,
//! so the syllable count always equals the vowel count. This is cruder
//! than a maximum-onset syllabifier but exactly what meter checking
//! needs, since only the per-nucleus stress sequence matters.

use crate::types::{PhonemeToken, Syllable};

/// Separator between symbols in a rhyme key, e.g. "EY-T".
const RHYME_KEY_SEPARATOR: &str = "-";

/// Group a phoneme sequence into syllables.
///
/// Tokens accumulate into a pending syllable; each vowel token closes it
/// with that vowel's stress tag. Trailing consonants with no following
/// vowel are absorbed into the last closed syllable. A sequence with no
/// vowel at all yields no syllables.
pub fn segment_syllables(seq: &[PhonemeToken]) -> Vec<Syllable> {
    let mut syllables: Vec<Syllable> = Vec::new();
    let mut pending: Vec<PhonemeToken> = Vec::new();

    for token in seq {
        pending.push(token.clone());
        if let Some(stress) = token.stress {
            syllables.push(Syllable {
                phonemes: std::mem::take(&mut pending),
                stress,
            });
        }
    }

    if !pending.is_empty() {
        if let Some(last) = syllables.last_mut() {
            last.phonemes.append(&mut pending);
        }
    }

    syllables
}

/// Extract the rhyme key: stress-stripped symbols from the last vowel
/// token (any stress level, including unstressed) to the end.
///
/// Returns an empty string for a pure-consonant sequence; callers then
/// borrow the nearest preceding word's key within the line.
pub fn rhyme_key(seq: &[PhonemeToken]) -> String {
    let start = match seq.iter().rposition(|t| t.is_vowel()) {
        Some(i) => i,
        None => return String::new(),
    };

    seq[start..]
        .iter()
        .map(|t| t.symbol.as_str())
        .collect::<Vec<_>>()
        .join(RHYME_KEY_SEPARATOR)
}
