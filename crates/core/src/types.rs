//! Core data model: tagged phoneme tokens, syllables, and analysis records.
//!
//! Pronunciation tables use ARPABET-style tokens where vowel tokens carry
//! a trailing stress digit (e.g. "AH0", "OW1"). The digit is parsed once,
//! here, into a [`Stress`] tag; nothing downstream re-parses string
//! suffixes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stress level of a syllable nucleus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Stress {
    /// Unstressed (digit 0)
    None,
    /// Primary stress (digit 1)
    Primary,
    /// Secondary stress (digit 2)
    Secondary,
}

impl From<Stress> for u8 {
    fn from(s: Stress) -> u8 {
        match s {
            Stress::None => 0,
            Stress::Primary => 1,
            Stress::Secondary => 2,
        }
    }
}

impl TryFrom<u8> for Stress {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Stress::None),
            1 => Ok(Stress::Primary),
            2 => Ok(Stress::Secondary),
            other => Err(format!("invalid stress digit: {}", other)),
        }
    }
}

impl fmt::Display for Stress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// A single phoneme from a pronunciation entry.
///
/// `stress` is `Some` exactly when the raw token carried a trailing
/// stress digit, i.e. when the token is a vowel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonemeToken {
    /// Base symbol with any stress digit stripped (e.g. "AH", "K")
    pub symbol: String,
    /// Stress tag, present on vowel tokens only
    pub stress: Option<Stress>,
}

impl PhonemeToken {
    /// Parse a raw table token like "AH0" or "K".
    ///
    /// A trailing 0/1/2 marks a vowel; anything else is a consonant
    /// token taken verbatim.
    pub fn parse(raw: &str) -> PhonemeToken {
        if let Some(last) = raw.as_bytes().last() {
            if (b'0'..=b'2').contains(last) {
                let stress = Stress::try_from(last - b'0').ok();
                return PhonemeToken {
                    symbol: raw[..raw.len() - 1].to_string(),
                    stress,
                };
            }
        }
        PhonemeToken {
            symbol: raw.to_string(),
            stress: None,
        }
    }

    /// True if this token is a vowel nucleus.
    pub fn is_vowel(&self) -> bool {
        self.stress.is_some()
    }
}

impl fmt::Display for PhonemeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stress {
            Some(s) => write!(f, "{}{}", self.symbol, s),
            None => write!(f, "{}", self.symbol),
        }
    }
}

/// Parse a whole raw phoneme sequence into tagged tokens.
pub fn parse_sequence(raw: &[String]) -> Vec<PhonemeToken> {
    raw.iter().map(|t| PhonemeToken::parse(t)).collect()
}

/// Per-line (and per-word) stress values, one per syllable.
pub type StressPattern = Vec<Stress>;

/// Render a stress pattern as a digit string, e.g. "0101010101".
pub fn pattern_digits(pattern: &[Stress]) -> String {
    pattern.iter().map(|s| s.to_string()).collect()
}

/// One vowel nucleus plus the consonants absorbed around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Syllable {
    pub phonemes: Vec<PhonemeToken>,
    pub stress: Stress,
}

/// Analysis of a single word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordAnalysis {
    /// Normalized word (lowercase, letters + apostrophe)
    pub word: String,
    /// Surface form before lowercasing; the line analyzer strips
    /// punctuation before it gets here
    pub original_word: String,
    pub syllables: Vec<Syllable>,
    /// Phonetic tail used for rhyme testing; empty for pure-consonant words
    pub rhyme_key: String,
    /// True when the word came from the pronunciation table rather than
    /// the spelling heuristic
    pub found: bool,
}

impl WordAnalysis {
    /// Stress tags of this word's syllables, in order.
    pub fn stress_pattern(&self) -> StressPattern {
        self.syllables.iter().map(|s| s.stress).collect()
    }
}

/// Analysis of one poem line. Built in full before being returned; no
/// partially-initialized records escape the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineAnalysis {
    /// 1-based line number among non-blank lines
    pub line_number: usize,
    /// Raw line text
    pub text: String,
    pub words: Vec<WordAnalysis>,
    /// Concatenated stress tags across all words
    pub stress_pattern: StressPattern,
    /// Rhyme key of the last word, or the nearest preceding word with a
    /// nonempty key
    pub rhyme_key: String,
    /// Expected pattern from the target form
    pub expected_stress_pattern: StressPattern,
    pub meter_valid: bool,
}

/// Meter family, selecting the per-position comparison rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterFamily {
    /// Tolerant rule for iambic verse: stressed slots accept secondary
    /// stress, unstressed slots accept anything
    Iambic,
    /// Exact-stress rule used for all other meters
    Strict,
}

/// Expected per-line meter definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterPattern {
    pub name: String,
    pub description: String,
    /// Expected stress per syllable slot (None/Primary only)
    pub stress_pattern: StressPattern,
    /// Expected syllables per line
    pub syllable_count: usize,
    pub family: MeterFamily,
}

/// A poetic form: rhyme scheme plus meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonnetForm {
    pub name: String,
    /// One label per line, e.g. ABABCDCDEFEFGG
    pub rhyme_scheme: Vec<char>,
    pub meter: MeterPattern,
    pub line_count: usize,
}

/// Full report for one analyzed poem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonnetAnalysis {
    pub lines: Vec<LineAnalysis>,
    pub form: SonnetForm,
    pub meter_valid: bool,
    pub rhyme_scheme_valid: bool,
    pub meter_issues: Vec<String>,
    pub rhyme_issues: Vec<String>,
    /// Rhyme label → indices of the lines in that group
    pub rhyme_groups: BTreeMap<char, Vec<usize>>,
    /// Words missing from the pronunciation table, in order of first
    /// appearance (soft warnings, not failures)
    pub unknown_words: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vowel_token() {
        let t = PhonemeToken::parse("OW1");
        assert_eq!(t.symbol, "OW");
        assert_eq!(t.stress, Some(Stress::Primary));
        assert!(t.is_vowel());
    }

    #[test]
    fn test_parse_consonant_token() {
        let t = PhonemeToken::parse("HH");
        assert_eq!(t.symbol, "HH");
        assert_eq!(t.stress, None);
        assert!(!t.is_vowel());
    }

    #[test]
    fn test_parse_unstressed_vowel() {
        let t = PhonemeToken::parse("AH0");
        assert_eq!(t.symbol, "AH");
        assert_eq!(t.stress, Some(Stress::None));
        assert!(t.is_vowel());
    }

    #[test]
    fn test_token_display_roundtrip() {
        for raw in ["AH0", "OW1", "IY2", "K", "TH"] {
            assert_eq!(PhonemeToken::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_parse_sequence_hello() {
        let raw: Vec<String> = ["HH", "AH0", "L", "OW1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let seq = parse_sequence(&raw);
        assert_eq!(seq.len(), 4);
        assert!(!seq[0].is_vowel());
        assert!(seq[1].is_vowel());
        assert!(!seq[2].is_vowel());
        assert_eq!(seq[3].stress, Some(Stress::Primary));
    }

    #[test]
    fn test_stress_serde_as_digit() {
        let json = serde_json::to_string(&Stress::Secondary).unwrap();
        assert_eq!(json, "2");
        let back: Stress = serde_json::from_str("1").unwrap();
        assert_eq!(back, Stress::Primary);
        assert!(serde_json::from_str::<Stress>("3").is_err());
    }

    #[test]
    fn test_word_analysis_stress_pattern() {
        let w = WordAnalysis {
            word: "hello".into(),
            original_word: "Hello".into(),
            syllables: vec![
                Syllable {
                    phonemes: parse_sequence(&["HH".into(), "AH0".into()]),
                    stress: Stress::None,
                },
                Syllable {
                    phonemes: parse_sequence(&["L".into(), "OW1".into()]),
                    stress: Stress::Primary,
                },
            ],
            rhyme_key: "OW".into(),
            found: true,
        };
        assert_eq!(w.stress_pattern(), vec![Stress::None, Stress::Primary]);
    }

    #[test]
    fn test_analysis_serde_roundtrip() {
        let line = LineAnalysis {
            line_number: 1,
            text: "so long".into(),
            words: vec![],
            stress_pattern: vec![Stress::Primary, Stress::Primary],
            rhyme_key: "AO-NG".into(),
            expected_stress_pattern: vec![Stress::None, Stress::Primary],
            meter_valid: false,
        };
        let json = serde_json::to_string(&line).unwrap();
        let back: LineAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(line, back);
    }
}
