use super::config::{LearningThresholds, TieringConfig};
use super::progress::{Progress, ProgressReporter};
use super::seed::is_high_confidence;
use crate::core::evidence::EvidenceScanner;
use crate::core::models::record::Record;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument};

/// What the learner concluded for one EC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectationStatus {
    /// No record qualified as a high-confidence seed for this EC.
    NoSeeds,
    /// Seeds existed, but no family id met both thresholds.
    NoneQualified,
    /// At least one family id is expected for this EC.
    Constrained,
}

/// Seed statistics and the resulting expected families for one EC.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilyExpectation {
    seed_records: usize,
    counts: BTreeMap<String, usize>,
    families: BTreeSet<String>,
}

impl FamilyExpectation {
    fn finalize(
        seed_records: usize,
        counts: BTreeMap<String, usize>,
        thresholds: &LearningThresholds,
    ) -> Self {
        let total: usize = counts.values().sum();
        let families = counts
            .iter()
            .filter(|(_, count)| thresholds.admits(**count, total))
            .map(|(family, _)| family.clone())
            .collect();
        Self {
            seed_records,
            counts,
            families,
        }
    }

    pub fn families(&self) -> &BTreeSet<String> {
        &self.families
    }

    pub fn seed_records(&self) -> usize {
        self.seed_records
    }

    /// Total family contributions across all seed records (the fraction denominator).
    pub fn contributions(&self) -> usize {
        self.counts.values().sum()
    }

    /// Per-family seed counts, including families that did not qualify.
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn fraction(&self, family: &str) -> Option<f64> {
        let total = self.contributions();
        self.counts
            .get(family)
            .filter(|_| total > 0)
            .map(|count| *count as f64 / total as f64)
    }

    pub fn status(&self) -> ExpectationStatus {
        if self.seed_records == 0 {
            ExpectationStatus::NoSeeds
        } else if self.families.is_empty() {
            ExpectationStatus::NoneQualified
        } else {
            ExpectationStatus::Constrained
        }
    }

    pub fn is_constraint(&self) -> bool {
        !self.families.is_empty()
    }

    /// True if any of `family_ids` is an expected family. Never true for an empty expectation.
    pub fn is_met_by(&self, family_ids: &BTreeSet<String>) -> bool {
        !self.families.is_disjoint(family_ids)
    }
}

/// Expected families per target EC, frozen once learning completes.
///
/// The only way to obtain one is [`learn`], so classification can never observe a
/// partially accumulated state.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedFamilySet {
    by_ec: BTreeMap<String, FamilyExpectation>,
    thresholds: LearningThresholds,
}

impl ExpectedFamilySet {
    pub fn get(&self, ec: &str) -> Option<&FamilyExpectation> {
        self.by_ec.get(ec)
    }

    /// The expectation for `ec`, only when it constrains family membership.
    pub fn constraint_for(&self, ec: &str) -> Option<&FamilyExpectation> {
        self.get(ec).filter(|expectation| expectation.is_constraint())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FamilyExpectation)> {
        self.by_ec.iter()
    }

    pub fn len(&self) -> usize {
        self.by_ec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_ec.is_empty()
    }

    pub fn any_constrained(&self) -> bool {
        self.by_ec.values().any(FamilyExpectation::is_constraint)
    }

    pub fn thresholds(&self) -> &LearningThresholds {
        &self.thresholds
    }

    #[cfg(test)]
    pub(crate) fn from_families<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a [&'a str])>,
    ) -> Self {
        let thresholds = LearningThresholds {
            min_seed_count: 1,
            min_seed_fraction: 0.0,
        };
        let by_ec = entries
            .into_iter()
            .map(|(ec, families)| {
                let counts: BTreeMap<String, usize> =
                    families.iter().map(|family| (family.to_string(), 1)).collect();
                let seeds = if counts.is_empty() { 0 } else { 1 };
                (ec.to_string(), FamilyExpectation::finalize(seeds, counts, &thresholds))
            })
            .collect();
        Self { by_ec, thresholds }
    }
}

#[derive(Default)]
struct SeedAccumulator {
    seed_records: usize,
    counts: BTreeMap<String, usize>,
}

impl SeedAccumulator {
    fn add(&mut self, family_ids: &BTreeSet<String>) {
        self.seed_records += 1;
        for family in family_ids {
            *self.counts.entry(family.clone()).or_insert(0) += 1;
        }
    }
}

/// Learn pass: collects the families of every high-confidence seed record per
/// target EC and keeps those meeting both thresholds.
///
/// Every target EC gets an entry, so an EC without seeds is reported explicitly
/// rather than silently missing.
#[instrument(skip_all, name = "family_learning")]
pub fn learn(
    records: &[Record],
    scanner: &dyn EvidenceScanner,
    config: &TieringConfig,
    reporter: &ProgressReporter,
) -> ExpectedFamilySet {
    info!(
        records = records.len(),
        targets = config.target_ecs.len(),
        "Learning expected families from high-confidence seeds."
    );
    reporter.report(Progress::TaskStart {
        total_steps: records.len() as u64,
    });

    let mut accumulators: BTreeMap<&str, SeedAccumulator> = config
        .target_ecs
        .iter()
        .map(|ec| (ec.as_str(), SeedAccumulator::default()))
        .collect();

    for record in records {
        if record.is_in_scope(&config.target_ecs) {
            let evidence = scanner.scan_catalytic(&record.catalytic_activity, &config.target_ecs);
            for ec in record.target_ecs(&config.target_ecs) {
                if is_high_confidence(&evidence.for_ec(ec), record.reviewed) {
                    if let Some(accumulator) = accumulators.get_mut(ec.as_str()) {
                        accumulator.add(&record.family_ids);
                    }
                }
            }
        }
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    let by_ec: BTreeMap<String, FamilyExpectation> = accumulators
        .into_iter()
        .map(|(ec, acc)| {
            let expectation =
                FamilyExpectation::finalize(acc.seed_records, acc.counts, &config.learning);
            debug!(
                ec,
                seeds = expectation.seed_records(),
                contributions = expectation.contributions(),
                expected = expectation.families().len(),
                "Finalized family expectation."
            );
            (ec.to_string(), expectation)
        })
        .collect();

    ExpectedFamilySet {
        by_ec,
        thresholds: config.learning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evidence::uniprot::UniProtScanner;
    use crate::core::models::builder::RecordBuilder;
    use crate::engine::config::TieringConfigBuilder;

    const SEED_TEXT: &str = "CATALYTIC ACTIVITY: EC=X; RHEA:1; ECO:0000269;";

    fn config(targets: &[&str], min_seed_count: usize, min_seed_fraction: f64) -> TieringConfig {
        TieringConfigBuilder::new()
            .target_ecs(targets.iter().copied())
            .min_seed_count(min_seed_count)
            .min_seed_fraction(min_seed_fraction)
            .use_hydrolase_proxy(true)
            .build()
            .unwrap()
    }

    fn seed(accession: &str, ec: &str, families: &[&str]) -> Record {
        let text = SEED_TEXT.replace("EC=X", &format!("EC={ec}"));
        families
            .iter()
            .fold(
                RecordBuilder::new(accession).ec(ec).catalytic_activity(&text),
                |builder, family| builder.family(family),
            )
            .build()
    }

    fn learn_with(records: &[Record], config: &TieringConfig) -> ExpectedFamilySet {
        learn(records, &UniProtScanner::new(), config, &ProgressReporter::new())
    }

    #[test]
    fn two_seeds_sharing_a_family_make_it_expected() {
        let records = vec![
            seed("P1", "3.1.1.74", &["PF00001"]),
            seed("P2", "3.1.1.74", &["PF00001"]),
        ];
        let learned = learn_with(&records, &config(&["3.1.1.74"], 2, 0.10));
        let expectation = learned.get("3.1.1.74").unwrap();

        assert_eq!(expectation.status(), ExpectationStatus::Constrained);
        assert!(expectation.families().contains("PF00001"));
        assert_eq!(expectation.seed_records(), 2);
        assert_eq!(expectation.contributions(), 2);
        assert_eq!(expectation.fraction("PF00001"), Some(1.0));
    }

    #[test]
    fn family_exactly_at_both_thresholds_is_retained() {
        let mut records = vec![
            seed("P1", "3.1.1.74", &["PF00001"]),
            seed("P2", "3.1.1.74", &["PF00001"]),
        ];
        for i in 0..18 {
            let family = format!("PF9{i:04}");
            records.push(seed(&format!("Q{i}"), "3.1.1.74", &[family.as_str()]));
        }
        let learned = learn_with(&records, &config(&["3.1.1.74"], 2, 0.10));
        let expectation = learned.get("3.1.1.74").unwrap();

        assert_eq!(expectation.contributions(), 20);
        assert_eq!(expectation.families().len(), 1);
        assert!(expectation.families().contains("PF00001"));
    }

    #[test]
    fn family_below_fraction_is_dropped() {
        let mut records = vec![
            seed("P1", "3.1.1.74", &["PF00001"]),
            seed("P2", "3.1.1.74", &["PF00001"]),
        ];
        for i in 0..19 {
            let family = format!("PF9{i:04}");
            records.push(seed(&format!("Q{i}"), "3.1.1.74", &[family.as_str()]));
        }
        let learned = learn_with(&records, &config(&["3.1.1.74"], 2, 0.10));
        let expectation = learned.get("3.1.1.74").unwrap();

        assert_eq!(expectation.status(), ExpectationStatus::NoneQualified);
        assert!(!learned.any_constrained());
    }

    #[test]
    fn target_without_seeds_is_reported_explicitly() {
        let records = vec![
            seed("P1", "3.1.1.74", &["PF00001"]),
            RecordBuilder::new("P2").ec("3.1.1.101").family("PF00002").build(),
        ];
        let learned = learn_with(&records, &config(&["3.1.1.74", "3.1.1.101"], 2, 0.10));

        assert_eq!(learned.len(), 2);
        let empty = learned.get("3.1.1.101").unwrap();
        assert_eq!(empty.status(), ExpectationStatus::NoSeeds);
        assert!(empty.families().is_empty());
        assert!(learned.constraint_for("3.1.1.101").is_none());
    }

    #[test]
    fn seeds_without_families_yield_no_constraint() {
        let records = vec![seed("P1", "3.1.1.74", &[]), seed("P2", "3.1.1.74", &[])];
        let learned = learn_with(&records, &config(&["3.1.1.74"], 1, 0.0));
        let expectation = learned.get("3.1.1.74").unwrap();
        assert_eq!(expectation.seed_records(), 2);
        assert_eq!(expectation.contributions(), 0);
        assert_eq!(expectation.status(), ExpectationStatus::NoneQualified);
        assert_eq!(expectation.fraction("PF00001"), None);
    }

    #[test]
    fn non_seed_records_do_not_contribute() {
        let records = vec![
            seed("P1", "3.1.1.74", &["PF00001"]),
            RecordBuilder::new("P2")
                .ec("3.1.1.74")
                .family("PF00002")
                .catalytic_activity("CATALYTIC ACTIVITY: EC=3.1.1.74; RHEA:1;")
                .build(),
        ];
        let learned = learn_with(&records, &config(&["3.1.1.74"], 1, 0.0));
        let expectation = learned.get("3.1.1.74").unwrap();
        assert_eq!(expectation.seed_records(), 1);
        assert!(!expectation.counts().contains_key("PF00002"));
    }

    #[test]
    fn a_record_seeds_each_of_its_qualifying_ecs() {
        let record = RecordBuilder::new("P1")
            .ec("3.1.1.74")
            .ec("3.1.1.1")
            .family("PF01083")
            .reviewed(true)
            .catalytic_activity(
                "CATALYTIC ACTIVITY: EC=3.1.1.74; RHEA:1; \
                 CATALYTIC ACTIVITY: EC=3.1.1.1; Evidence={ECO:0000269};",
            )
            .build();
        let learned = learn_with(&[record], &config(&["3.1.1.74", "3.1.1.1"], 1, 0.0));
        let families = BTreeSet::from(["PF01083".to_string()]);
        assert!(learned.get("3.1.1.74").unwrap().is_met_by(&families));
        assert!(learned.get("3.1.1.1").unwrap().is_constraint());
    }

    #[test]
    fn learning_reports_progress_per_record() {
        use std::sync::atomic::{AtomicU64, Ordering};
        let increments = AtomicU64::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if matches!(event, Progress::TaskIncrement) {
                increments.fetch_add(1, Ordering::Relaxed);
            }
        }));
        let records = vec![
            seed("P1", "3.1.1.74", &["PF00001"]),
            RecordBuilder::new("P2").ec("9.9.9.9").build(),
        ];
        learn(
            &records,
            &UniProtScanner::new(),
            &config(&["3.1.1.74"], 2, 0.1),
            &reporter,
        );
        assert_eq!(increments.load(Ordering::Relaxed), 2);
    }
}
