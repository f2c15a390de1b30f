//! Sonnet analysis orchestrator.
//!
//! Drives tokenization → per-word phonetic analysis → per-line
//! aggregation → meter matching and rhyme validation, and assembles the
//! final report. Holds the pronunciation store by shared reference for
//! the duration of one analysis; overlay mutation between analyses goes
//! through `&mut` on the store and cannot overlap an in-flight call.

use crate::dict::store::PronunciationStore;
use crate::meter::{check_meter, MatchOutcome, Strictness};
use crate::phonetic::analyzer::analyze_word;
use crate::rhyme::validate_rhyme_scheme;
use crate::text::{split_lines, strip_punctuation, tokenize_line};
use crate::types::{
    pattern_digits, LineAnalysis, MeterFamily, SonnetAnalysis, SonnetForm, StressPattern,
};

/// Length window (in syllables) within which a failing line is reported.
/// Lines further off are carried in the per-line detail but excluded
/// from issue counting to keep reports readable on malformed input.
const ISSUE_WINDOW: usize = 2;

/// Knobs for one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzeOptions {
    pub strictness: Strictness,
    /// Override for the form's meter family; `None` uses the form's own
    pub meter_family: Option<MeterFamily>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        AnalyzeOptions {
            strictness: Strictness::Lenient,
            meter_family: None,
        }
    }
}

/// Poem analysis driver over a loaded pronunciation store.
pub struct SonnetAnalyzer<'a> {
    store: &'a PronunciationStore,
}

impl<'a> SonnetAnalyzer<'a> {
    pub fn new(store: &'a PronunciationStore) -> Self {
        SonnetAnalyzer { store }
    }

    /// Analyze a single line against an expected meter.
    ///
    /// The returned record is complete: expected pattern and meter
    /// verdict are computed before construction, never patched in later.
    pub fn analyze_line(
        &self,
        text: &str,
        line_number: usize,
        expected: &StressPattern,
        family: MeterFamily,
        strictness: Strictness,
    ) -> LineAnalysis {
        let mut words = Vec::new();
        let mut stress_pattern = StressPattern::new();

        for token in tokenize_line(text) {
            // Punctuation goes before analysis; the stripped token keeps
            // its case and becomes the word's surface form
            let cleaned = strip_punctuation(token);
            if cleaned.is_empty() {
                continue;
            }
            let analysis = analyze_word(self.store, &cleaned, None, None);
            stress_pattern.extend(analysis.stress_pattern());
            words.push(analysis);
        }

        // Line rhyme key: last word's, or scanning backward the nearest
        // word that resolved to a nonempty key
        let rhyme_key = words
            .iter()
            .rev()
            .find(|w| !w.rhyme_key.is_empty())
            .map(|w| w.rhyme_key.clone())
            .unwrap_or_default();

        let meter_valid =
            check_meter(&stress_pattern, expected, family, strictness) == MatchOutcome::Pass;

        LineAnalysis {
            line_number,
            text: text.to_string(),
            words,
            stress_pattern,
            rhyme_key,
            expected_stress_pattern: expected.clone(),
            meter_valid,
        }
    }

    /// Analyze a whole poem against a form.
    ///
    /// Blank lines do not count as poem lines. Overall meter validity
    /// means zero reported issue lines; lines with no words or more than
    /// two syllables off the expected length never contribute issues.
    pub fn analyze_sonnet(
        &self,
        text: &str,
        form: &SonnetForm,
        options: AnalyzeOptions,
    ) -> SonnetAnalysis {
        let family = options.meter_family.unwrap_or(form.meter.family);
        let expected = &form.meter.stress_pattern;

        let lines: Vec<LineAnalysis> = split_lines(text)
            .into_iter()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(i, l)| self.analyze_line(l, i + 1, expected, family, options.strictness))
            .collect();

        let rhyme = validate_rhyme_scheme(&lines, &form.rhyme_scheme);

        let mut meter_issues = Vec::new();
        for line in &lines {
            if line.words.is_empty()
                || line.stress_pattern.len().abs_diff(expected.len()) > ISSUE_WINDOW
            {
                continue;
            }
            if !line.meter_valid {
                meter_issues.push(format!(
                    "Line {}: expected {} syllables with pattern {}, got {} syllables with pattern {}",
                    line.line_number,
                    expected.len(),
                    pattern_digits(expected),
                    line.stress_pattern.len(),
                    pattern_digits(&line.stress_pattern),
                ));
            }
        }

        let mut unknown_words = Vec::new();
        for word in lines.iter().flat_map(|l| &l.words) {
            if !word.found && !unknown_words.contains(&word.word) {
                unknown_words.push(word.word.clone());
            }
        }
        if !unknown_words.is_empty() {
            log::warn!(
                "{} word(s) not in the pronunciation table: {}",
                unknown_words.len(),
                unknown_words.join(", ")
            );
        }

        log::info!(
            "Analyzed {} lines against '{}': {} meter issue(s), {} rhyme issue(s)",
            lines.len(),
            form.name,
            meter_issues.len(),
            rhyme.issues.len()
        );

        SonnetAnalysis {
            lines,
            form: form.clone(),
            meter_valid: meter_issues.is_empty(),
            rhyme_scheme_valid: rhyme.valid,
            meter_issues,
            rhyme_issues: rhyme.issues,
            rhyme_groups: rhyme.groups,
            unknown_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms;
    use crate::types::{MeterPattern, Stress};

    fn store() -> PronunciationStore {
        PronunciationStore::from_json_str(
            r#"{
                "the": [["DH", "AH0"]],
                "day": [["D", "EY1"]],
                "way": [["W", "EY1"]],
                "night": [["N", "AY1", "T"]],
                "bright": [["B", "R", "AY1", "T"]],
                "gray": [["G", "R", "EY1"]],
                "is": [["IH0", "Z"]],
                "so": [["S", "OW1"]],
                "tsk": [["T", "S", "K"]]
            }"#,
        )
        .unwrap()
    }

    /// Four-line test form in iambic dimeter (0101), scheme ABAB.
    fn quatrain_form() -> SonnetForm {
        SonnetForm {
            name: "test quatrain".to_string(),
            rhyme_scheme: vec!['A', 'B', 'A', 'B'],
            meter: MeterPattern {
                name: "iambic dimeter".to_string(),
                description: "two iambic feet".to_string(),
                stress_pattern: vec![
                    Stress::None,
                    Stress::Primary,
                    Stress::None,
                    Stress::Primary,
                ],
                syllable_count: 4,
                family: MeterFamily::Iambic,
            },
            line_count: 4,
        }
    }

    #[test]
    fn test_analyze_line_basic() {
        let s = store();
        let analyzer = SonnetAnalyzer::new(&s);
        let form = quatrain_form();
        let line = analyzer.analyze_line(
            "The day is bright,",
            1,
            &form.meter.stress_pattern,
            MeterFamily::Iambic,
            Strictness::Lenient,
        );
        assert_eq!(line.words.len(), 4);
        assert_eq!(
            line.stress_pattern,
            vec![Stress::None, Stress::Primary, Stress::None, Stress::Primary]
        );
        assert_eq!(line.rhyme_key, "AY-T");
        assert!(line.meter_valid);
        // Surface forms keep their case but lose punctuation
        assert_eq!(line.words[0].original_word, "The");
        assert_eq!(line.words[3].original_word, "bright");
        assert_eq!(line.words[3].word, "bright");
    }

    #[test]
    fn test_line_rhyme_key_borrows_backward() {
        let s = store();
        let analyzer = SonnetAnalyzer::new(&s);
        let form = quatrain_form();
        // "tsk" has no vowel: the line borrows "day"'s key
        let line = analyzer.analyze_line(
            "the day tsk",
            1,
            &form.meter.stress_pattern,
            MeterFamily::Iambic,
            Strictness::Lenient,
        );
        assert_eq!(line.rhyme_key, "EY");
    }

    #[test]
    fn test_line_with_no_words() {
        let s = store();
        let analyzer = SonnetAnalyzer::new(&s);
        let form = quatrain_form();
        let line = analyzer.analyze_line(
            "?? !! --",
            1,
            &form.meter.stress_pattern,
            MeterFamily::Iambic,
            Strictness::Lenient,
        );
        assert!(line.words.is_empty());
        assert!(line.stress_pattern.is_empty());
        assert_eq!(line.rhyme_key, "");
    }

    #[test]
    fn test_valid_quatrain() {
        let s = store();
        let analyzer = SonnetAnalyzer::new(&s);
        let poem = "The day is bright\n\
                    The night is gray\n\
                    So bright the night\n\
                    The day the way";
        let report = analyzer.analyze_sonnet(poem, &quatrain_form(), AnalyzeOptions::default());
        assert_eq!(report.lines.len(), 4);
        assert!(report.meter_valid, "issues: {:?}", report.meter_issues);
        assert!(report.rhyme_scheme_valid, "issues: {:?}", report.rhyme_issues);
        assert_eq!(report.rhyme_groups[&'A'], vec![0, 2]);
        assert_eq!(report.rhyme_groups[&'B'], vec![1, 3]);
        assert!(report.unknown_words.is_empty());
    }

    #[test]
    fn test_blank_lines_do_not_count() {
        let s = store();
        let analyzer = SonnetAnalyzer::new(&s);
        let poem = "\nThe day is bright\n\n\nThe night is gray\n  \nSo bright the night\nThe day the way\n";
        let report = analyzer.analyze_sonnet(poem, &quatrain_form(), AnalyzeOptions::default());
        assert_eq!(report.lines.len(), 4);
        assert_eq!(report.lines[3].line_number, 4);
        assert!(report.meter_valid);
    }

    #[test]
    fn test_blank_only_text() {
        let s = store();
        let analyzer = SonnetAnalyzer::new(&s);
        let report = analyzer.analyze_sonnet("\n  \n\t\n", &quatrain_form(), AnalyzeOptions::default());
        assert!(report.lines.is_empty());
        assert!(report.meter_valid);
        assert!(report.rhyme_scheme_valid);
    }

    #[test]
    fn test_meter_issue_message() {
        let s = store();
        let analyzer = SonnetAnalyzer::new(&s);
        // "The day the the": unstressed in the final stressed slot
        let poem = "The day is bright\n\
                    The night is gray\n\
                    The day the the\n\
                    The day the way";
        let report = analyzer.analyze_sonnet(poem, &quatrain_form(), AnalyzeOptions::default());
        assert!(!report.meter_valid);
        assert_eq!(report.meter_issues.len(), 1);
        assert!(report.meter_issues[0].starts_with("Line 3:"));
        assert!(report.meter_issues[0].contains("0101"));
    }

    #[test]
    fn test_far_off_lines_excluded_from_issues() {
        let s = store();
        let analyzer = SonnetAnalyzer::new(&s);
        // One syllable against four expected: three off, unchecked
        let poem = "Day\n\
                    The night is gray\n\
                    So bright the night\n\
                    The day the way";
        let report = analyzer.analyze_sonnet(poem, &quatrain_form(), AnalyzeOptions::default());
        assert!(!report.lines[0].meter_valid);
        // Excluded from issue counting, so the poem as a whole still passes
        assert!(report.meter_valid);
        assert!(report.meter_issues.is_empty());
    }

    #[test]
    fn test_unknown_words_collected_once() {
        let s = store();
        let analyzer = SonnetAnalyzer::new(&s);
        let poem = "The frabjous day\n\
                    The frabjous way\n\
                    So bright the night\n\
                    The day the way";
        let report = analyzer.analyze_sonnet(poem, &quatrain_form(), AnalyzeOptions::default());
        assert_eq!(report.unknown_words, vec!["frabjous".to_string()]);
        assert!(!report.lines[0].words[1].found);
    }

    #[test]
    fn test_exact_strictness_flags_length_drift() {
        let s = store();
        let analyzer = SonnetAnalyzer::new(&s);
        // Five syllables against four: lenient fitting absorbs it,
        // exact mode reports it
        let poem = "The day is so bright\n\
                    The night is gray\n\
                    So bright the night\n\
                    The day the way";
        let lenient = analyzer.analyze_sonnet(poem, &quatrain_form(), AnalyzeOptions::default());
        assert!(lenient.meter_valid, "issues: {:?}", lenient.meter_issues);

        let exact = analyzer.analyze_sonnet(
            poem,
            &quatrain_form(),
            AnalyzeOptions {
                strictness: Strictness::Exact,
                meter_family: None,
            },
        );
        assert!(!exact.meter_valid);
        assert_eq!(exact.meter_issues.len(), 1);
    }

    #[test]
    fn test_full_sonnet_form_wiring() {
        let s = store();
        let analyzer = SonnetAnalyzer::new(&s);
        let form = forms::by_name("shakespearean").unwrap();
        // Two short lines: both far off pentameter, so unchecked; rhyme
        // groups A and B each have one member
        let report = analyzer.analyze_sonnet("The day\nThe night", &form, AnalyzeOptions::default());
        assert_eq!(report.lines.len(), 2);
        assert!(report.meter_valid);
        assert!(report.rhyme_scheme_valid);
        assert_eq!(report.form.name, "shakespearean");
    }
}
