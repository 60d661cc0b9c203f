use crate::core::evidence::EvidenceScanner;
use crate::core::models::record::Record;
use crate::engine::config::TieringConfig;
use crate::engine::error::EngineError;
use crate::engine::learner::{self, ExpectedFamilySet};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tier::{self, Classification, Tier};
use itertools::Itertools;
use std::fmt;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of records per tier after a classify pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierSummary {
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
    pub skipped: usize,
}

impl TierSummary {
    pub fn tally<'a>(classifications: impl IntoIterator<Item = &'a Classification>) -> Self {
        let mut summary = Self::default();
        for classification in classifications {
            match classification.tier {
                Tier::Gold => summary.gold += 1,
                Tier::Silver => summary.silver += 1,
                Tier::Bronze => summary.bronze += 1,
                Tier::Skip => summary.skipped += 1,
            }
        }
        summary
    }

    pub fn count(&self, tier: Tier) -> usize {
        match tier {
            Tier::Gold => self.gold,
            Tier::Silver => self.silver,
            Tier::Bronze => self.bronze,
            Tier::Skip => self.skipped,
        }
    }

    /// Records that received a reportable tier.
    pub fn scored(&self) -> usize {
        self.gold + self.silver + self.bronze
    }
}

impl fmt::Display for TierSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_tier = Tier::RANKED
            .iter()
            .map(|tier| format!("{} {tier}", self.count(*tier)))
            .join(", ");
        write!(
            f,
            "{} records tiered ({per_tier}), {} skipped",
            self.scored(),
            self.skipped
        )
    }
}

#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub expected: ExpectedFamilySet,
    /// One entry per input record, in input order.
    pub classifications: Vec<Classification>,
    pub summary: TierSummary,
}

impl ScoreOutcome {
    /// Indices and tiers of the records that were not skipped, in input order.
    pub fn tiered(&self) -> impl Iterator<Item = (usize, Tier)> + '_ {
        self.classifications
            .iter()
            .enumerate()
            .filter(|(_, classification)| classification.tier != Tier::Skip)
            .map(|(index, classification)| (index, classification.tier))
    }
}

fn ensure_targets(config: &TieringConfig) -> Result<(), EngineError> {
    if config.target_ecs.is_empty() {
        return Err(EngineError::Initialization(
            "no target EC numbers were configured".to_string(),
        ));
    }
    Ok(())
}

/// Learn pass on its own, for callers that only want the expected families.
#[instrument(skip_all, name = "learning_workflow")]
pub fn learn(
    records: &[Record],
    scanner: &dyn EvidenceScanner,
    config: &TieringConfig,
    reporter: &ProgressReporter,
) -> Result<ExpectedFamilySet, EngineError> {
    ensure_targets(config)?;
    Ok(reporter.phase("Learning", || {
        learner::learn(records, scanner, config, reporter)
    }))
}

/// Classify pass over every record against a frozen expectation set.
///
/// Records are independent, so with the `parallel` feature the pass runs on the rayon
/// pool; the result order always matches `records`.
pub fn classify_all(
    records: &[Record],
    scanner: &dyn EvidenceScanner,
    expected: &ExpectedFamilySet,
    config: &TieringConfig,
    reporter: &ProgressReporter,
) -> Vec<Classification> {
    reporter.report(Progress::TaskStart {
        total_steps: records.len() as u64,
    });

    let iterator = records.iter();

    #[cfg(feature = "parallel")]
    let iterator = records.par_iter();

    let classifications: Vec<Classification> = iterator
        .map(|record| {
            let classification = tier::classify(record, scanner, expected, config);
            reporter.report(Progress::TaskIncrement);
            classification
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    classifications
}

/// Full two-phase run: learn expected families, then tier every record.
#[instrument(skip_all, name = "scoring_workflow")]
pub fn run(
    records: &[Record],
    scanner: &dyn EvidenceScanner,
    config: &TieringConfig,
    reporter: &ProgressReporter,
) -> Result<ScoreOutcome, EngineError> {
    ensure_targets(config)?;
    info!(
        records = records.len(),
        targets = config.target_ecs.len(),
        "Starting tier scoring."
    );

    let expected = reporter.phase("Learning", || {
        learner::learn(records, scanner, config, reporter)
    });
    if !expected.any_constrained() {
        warn!("No expected families were learned; family checks fall back to independent signals.");
    }

    let classifications = reporter.phase("Classifying", || {
        classify_all(records, scanner, &expected, config, reporter)
    });

    let summary = TierSummary::tally(&classifications);
    info!(
        gold = summary.gold,
        silver = summary.silver,
        bronze = summary.bronze,
        skipped = summary.skipped,
        "Tier scoring complete."
    );
    reporter.report(Progress::Message(summary.to_string()));

    Ok(ScoreOutcome {
        expected,
        classifications,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evidence::uniprot::UniProtScanner;
    use crate::core::models::builder::RecordBuilder;
    use crate::engine::config::{LearningThresholds, TieringConfigBuilder};
    use crate::engine::learner::ExpectationStatus;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CUTINASE: &str = "3.1.1.74";

    fn config() -> TieringConfig {
        TieringConfigBuilder::new()
            .target_ecs([CUTINASE])
            .min_seed_count(2)
            .min_seed_fraction(0.1)
            .use_hydrolase_proxy(true)
            .build()
            .unwrap()
    }

    fn seed_text(ec: &str) -> String {
        format!("CATALYTIC ACTIVITY: Reaction=x; EC={ec}; Xref=RHEA:100; Evidence={{ECO:0000269}};")
    }

    fn corpus() -> Vec<Record> {
        vec![
            RecordBuilder::new("P1")
                .ec(CUTINASE)
                .family("PF00001")
                .catalytic_activity(&seed_text(CUTINASE))
                .build(),
            RecordBuilder::new("P2")
                .ec(CUTINASE)
                .family("PF00001")
                .family("PF00002")
                .catalytic_activity(&seed_text(CUTINASE))
                .build(),
            RecordBuilder::new("P3")
                .ec(CUTINASE)
                .family("PF00009")
                .structure("1ABC")
                .build(),
            RecordBuilder::new("P4").ec(CUTINASE).family("PF00001").build(),
            RecordBuilder::new("P5")
                .ec("3.2.1.1")
                .catalytic_activity(&seed_text("3.2.1.1"))
                .build(),
        ]
    }

    #[test]
    fn run_learns_then_classifies_each_record() {
        let records = corpus();
        let outcome = run(&records, &UniProtScanner::new(), &config(), &ProgressReporter::new())
            .unwrap();

        let expectation = outcome.expected.get(CUTINASE).unwrap();
        assert_eq!(expectation.status(), ExpectationStatus::Constrained);
        assert_eq!(
            expectation.families(),
            &BTreeSet::from(["PF00001".to_string()])
        );

        let tiers: Vec<Tier> = outcome.classifications.iter().map(|c| c.tier).collect();
        assert_eq!(
            tiers,
            vec![Tier::Gold, Tier::Gold, Tier::Bronze, Tier::Bronze, Tier::Skip]
        );
        assert_eq!(
            outcome.summary,
            TierSummary {
                gold: 2,
                silver: 0,
                bronze: 2,
                skipped: 1
            }
        );
        assert_eq!(outcome.summary.count(Tier::Bronze), 2);
        assert_eq!(
            outcome.summary.to_string(),
            "4 records tiered (2 gold, 0 silver, 2 bronze), 1 skipped"
        );
        assert_eq!(
            outcome.tiered().map(|(index, _)| index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn classification_matches_per_record_decisions_in_input_order() {
        let records: Vec<Record> = corpus().into_iter().cycle().take(200).collect();
        let scanner = UniProtScanner::new();
        let config = config();
        let reporter = ProgressReporter::new();
        let expected = learner::learn(&records, &scanner, &config, &reporter);

        let batch = classify_all(&records, &scanner, &expected, &config, &reporter);
        let sequential: Vec<Classification> = records
            .iter()
            .map(|record| tier::classify(record, &scanner, &expected, &config))
            .collect();
        assert_eq!(batch, sequential);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let records = corpus();
        let scanner = UniProtScanner::new();
        let first = run(&records, &scanner, &config(), &ProgressReporter::new()).unwrap();
        let second = run(&records, &scanner, &config(), &ProgressReporter::new()).unwrap();
        assert_eq!(first.classifications, second.classifications);
        assert_eq!(first.expected, second.expected);
    }

    #[test]
    fn empty_target_set_is_rejected() {
        let config = TieringConfig {
            target_ecs: BTreeSet::new(),
            learning: LearningThresholds::default(),
            use_hydrolase_proxy: true,
        };
        let result = run(&corpus(), &UniProtScanner::new(), &config, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Initialization(_))));
    }

    #[test]
    fn classify_pass_reports_one_increment_per_record() {
        let records = corpus();
        let increments = AtomicUsize::new(0);
        let phases = AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskIncrement => {
                increments.fetch_add(1, Ordering::SeqCst);
            }
            Progress::PhaseStart { .. } => {
                phases.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }));

        run(&records, &UniProtScanner::new(), &config(), &reporter).unwrap();
        assert_eq!(increments.load(Ordering::SeqCst), records.len() * 2);
        assert_eq!(phases.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn learn_only_returns_expectation_for_every_target() {
        let records = corpus();
        let expected = learn(&records, &UniProtScanner::new(), &config(), &ProgressReporter::new())
            .unwrap();
        assert_eq!(expected.len(), 1);
        assert!(expected.any_constrained());
    }

    #[test]
    fn empty_input_yields_empty_outcome() {
        let outcome = run(&[], &UniProtScanner::new(), &config(), &ProgressReporter::new()).unwrap();
        assert!(outcome.classifications.is_empty());
        assert_eq!(outcome.summary, TierSummary::default());
        assert_eq!(
            outcome.expected.get(CUTINASE).unwrap().status(),
            ExpectationStatus::NoSeeds
        );
    }
}
