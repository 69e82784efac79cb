use course_sequence::analytics::enrollments::{EnrollmentCorpus, EnrollmentImporter};
use course_sequence::analytics::sequence::terms::term_name;
use course_sequence::analytics::sequence::{
    classify, SequenceCounts, SequencePlan, SequenceReport, SequenceReportDocument,
};
use course_sequence::config::ReportConfig;
use course_sequence::error::AppError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// The result of analyzing one course pair.
#[derive(Debug, Clone, Serialize)]
pub struct PairOutcome {
    pub first_course: String,
    pub second_course: String,
    pub counts: SequenceCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

pub fn load_corpus(path: &Path) -> Result<EnrollmentCorpus, AppError> {
    info!(path = %path.display(), "loading enrollment corpus");
    Ok(EnrollmentImporter::from_path(path)?)
}

/// Classifies the corpus for one pair and builds its report. Second-course attempts before the
/// configured start term are ignored.
pub fn analyze(
    corpus: &EnrollmentCorpus,
    plan: &SequencePlan,
    config: &ReportConfig,
) -> SequenceReport {
    info!(
        first = %plan.first_course,
        first_sections = plan.first_sections.label(),
        second = %plan.second_course,
        second_sections = plan.second_sections.label(),
        from = %term_name(config.start_term),
        through = %term_name(config.end_term),
        "analyzing course pair"
    );
    let request = plan.request(config.start_term);
    let outcome = classify(corpus, &request);
    SequenceReport::build(
        &plan.first_course,
        &plan.second_course,
        &outcome,
        config.range(),
    )
}

/// Analyzes one pair and writes its report into the configured output directory.
pub fn write_pair(
    corpus: &EnrollmentCorpus,
    plan: &SequencePlan,
    config: &ReportConfig,
) -> Result<PairOutcome, AppError> {
    let report = analyze(corpus, plan, config);
    let path = SequenceReportDocument::new(&report, &config.institution_label)
        .write_to_dir(&config.output_dir)?;

    Ok(PairOutcome {
        first_course: report.first_course,
        second_course: report.second_course,
        counts: report.counts,
        report_path: Some(path),
    })
}

/// Runs every plan in order against the same corpus.
pub fn write_batch(
    corpus: &EnrollmentCorpus,
    plans: &[SequencePlan],
    config: &ReportConfig,
) -> Result<Vec<PairOutcome>, AppError> {
    let outcomes = plans
        .iter()
        .map(|plan| write_pair(corpus, plan, config))
        .collect::<Result<Vec<_>, _>>()?;
    info!(reports = outcomes.len(), "batch complete");
    Ok(outcomes)
}

pub fn summarize(
    corpus: &EnrollmentCorpus,
    plan: &SequencePlan,
    config: &ReportConfig,
) -> PairOutcome {
    let request = plan.request(config.start_term);
    let outcome = classify(corpus, &request);
    PairOutcome {
        first_course: plan.first_course.clone(),
        second_course: plan.second_course.clone(),
        counts: outcome.counts,
        report_path: None,
    }
}
