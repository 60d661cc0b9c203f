use crate::engine::learner::{ExpectationStatus, ExpectedFamilySet, FamilyExpectation};
use itertools::Itertools;
use std::io::{self, Write};

/// Writes the learned expected families, one line per target EC.
///
/// ECs with nothing learned are listed explicitly, distinguishing "no seeds" from
/// "seeds, but no family met the thresholds". With `show_counts`, every family seen
/// among the seeds is listed under its EC with its count and fraction; retained
/// families are marked with `*`.
pub fn write_learned_families(
    expected: &ExpectedFamilySet,
    show_counts: bool,
    mut out: impl Write,
) -> io::Result<()> {
    let thresholds = expected.thresholds();
    writeln!(
        out,
        "Learned expected families per EC (min seed count {}, min seed fraction {}):",
        thresholds.min_seed_count, thresholds.min_seed_fraction
    )?;

    for (ec, expectation) in expected.iter() {
        writeln!(out, "  {ec}: {}", summarize(expectation))?;
        if show_counts {
            write_counts(expectation, &mut out)?;
        }
    }

    if !expected.any_constrained() {
        writeln!(
            out,
            "  (none learned; family expectations will not penalize any record)"
        )?;
    }
    Ok(())
}

pub fn render_learned_families(expected: &ExpectedFamilySet, show_counts: bool) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_learned_families(expected, show_counts, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

fn summarize(expectation: &FamilyExpectation) -> String {
    match expectation.status() {
        ExpectationStatus::Constrained => format!(
            "{} ({} seed records)",
            expectation.families().iter().join(", "),
            expectation.seed_records()
        ),
        ExpectationStatus::NoneQualified => format!(
            "nothing learned ({} seed records, no family met the thresholds)",
            expectation.seed_records()
        ),
        ExpectationStatus::NoSeeds => "nothing learned (no high-confidence seed records)".to_string(),
    }
}

fn write_counts(expectation: &FamilyExpectation, out: &mut impl Write) -> io::Result<()> {
    let ranked = expectation
        .counts()
        .iter()
        .sorted_by(|(a_family, a_count), (b_family, b_count)| {
            b_count.cmp(a_count).then_with(|| a_family.cmp(b_family))
        });
    for (family, count) in ranked {
        let marker = if expectation.families().contains(family) {
            '*'
        } else {
            ' '
        };
        let fraction = expectation.fraction(family).unwrap_or(0.0);
        writeln!(out, "    {marker} {family:<12} {count:>5} {fraction:>7.3}")?;
    }
    Ok(())
}
