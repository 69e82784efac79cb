//! Sequence success analysis: how students fare in a second course as a function of how they
//! completed the first.

pub mod classifier;
pub mod domain;
pub mod equivalence;
pub mod plan;
pub mod report;
pub mod sections;
pub mod store;
pub mod terms;

#[cfg(test)]
mod tests;

pub use classifier::{
    choose_latest, classify, classify_completion, PriorCompletion, SequenceClassifier,
    SequenceCounts, SequenceOutcome, SequenceRequest,
};
pub use domain::{AcademicPeriod, CohortKey, CreditSource, EnrollmentRecord, GradeTier};
pub use plan::{PlanError, SequencePlan};
pub use report::{ReportRange, SequenceReport, SequenceReportDocument};
pub use sections::{SectionPreset, SectionSet};
pub use store::{ClassifiedCohortStore, CohortCells};
