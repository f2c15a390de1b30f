//! Phonetic analysis: syllable segmentation, rhyme keys, heuristic
//! estimation for out-of-vocabulary words, and variant selection.

pub mod analyzer;
pub mod estimate;
pub mod syllables;

pub use analyzer::{analyze_word, pick_best_variant};
pub use estimate::{estimate_syllable_count, fallback_analysis};
pub use syllables::{rhyme_key, segment_syllables};
