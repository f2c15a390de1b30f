//! State-free meter matching.
//!
//! Compares an observed stress pattern to a form's expected pattern
//! under a family rule (iambic or strict) and a strictness mode. Lenient
//! mode repairs off-by-one length mismatches by trying every single
//! deletion or unstressed insertion ("fitting"). Lines more than one
//! syllable off are never fitted, even in lenient mode; lines more than
//! two syllables off are not judged at all.

use crate::types::{MeterFamily, Stress};

/// Length-difference window beyond which a line is left unchecked.
const CHECK_WINDOW: usize = 2;

/// How length mismatches are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Any length mismatch fails outright
    Exact,
    /// Off-by-one mismatches go through single-syllable fitting
    Lenient,
}

/// Result of a meter comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Pass,
    Fail,
    /// Length difference exceeds the check window; the line is treated
    /// as unchecked rather than failing
    Inapplicable,
}

/// Per-position comparison at equal lengths.
fn family_rule(observed: &[Stress], expected: &[Stress], family: MeterFamily) -> bool {
    debug_assert_eq!(observed.len(), expected.len());
    for (obs, exp) in observed.iter().zip(expected.iter()) {
        let expects_stress = *exp != Stress::None;
        match family {
            MeterFamily::Iambic => {
                // Stressed slot: primary or secondary required.
                // Unstressed slot: anything goes (stressed monosyllables
                // are tolerated in light positions).
                if expects_stress && *obs == Stress::None {
                    return false;
                }
            }
            MeterFamily::Strict => {
                if expects_stress && *obs != Stress::Primary {
                    return false;
                }
                if !expects_stress && *obs == Stress::Primary {
                    return false;
                }
            }
        }
    }
    true
}

/// Try to reconcile an off-by-one length mismatch.
///
/// One extra observed syllable: delete each position in turn. One
/// missing syllable: insert an unstressed syllable at each possible
/// position. Fitted candidates are re-tested under the same family rule,
/// including the strict rule for non-iambic meters.
fn fit_off_by_one(observed: &[Stress], expected: &[Stress], family: MeterFamily) -> bool {
    if observed.len() == expected.len() + 1 {
        for skip in 0..observed.len() {
            let mut fitted = observed.to_vec();
            fitted.remove(skip);
            if family_rule(&fitted, expected, family) {
                return true;
            }
        }
    } else if observed.len() + 1 == expected.len() {
        for insert in 0..=observed.len() {
            let mut fitted = observed.to_vec();
            fitted.insert(insert, Stress::None);
            if family_rule(&fitted, expected, family) {
                return true;
            }
        }
    }
    false
}

/// Compare an observed stress pattern against an expected meter.
pub fn check_meter(
    observed: &[Stress],
    expected: &[Stress],
    family: MeterFamily,
    strictness: Strictness,
) -> MatchOutcome {
    let diff = observed.len().abs_diff(expected.len());

    if diff > CHECK_WINDOW {
        return MatchOutcome::Inapplicable;
    }

    if diff == 0 {
        return if family_rule(observed, expected, family) {
            MatchOutcome::Pass
        } else {
            MatchOutcome::Fail
        };
    }

    // Length mismatch within the window
    if strictness == Strictness::Lenient && diff == 1 {
        return if fit_off_by_one(observed, expected, family) {
            MatchOutcome::Pass
        } else {
            MatchOutcome::Fail
        };
    }

    MatchOutcome::Fail
}
