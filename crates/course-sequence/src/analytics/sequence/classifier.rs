use super::domain::{
    AcademicPeriod, CohortKey, CreditSource, EnrollmentRecord, GradeTier,
    LOCAL_COMPLETION_THRESHOLD,
};
use super::equivalence::courses_match;
use super::sections::SectionSet;
use super::store::ClassifiedCohortStore;
use super::terms::{is_immediately_prior, is_recognized};
use crate::analytics::enrollments::EnrollmentCorpus;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// One (first course, second course) analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRequest {
    pub first_course: String,
    pub first_sections: SectionSet,
    pub second_course: String,
    pub second_sections: SectionSet,
    /// Second-course attempts before this term are ignored.
    pub earliest_second_term: AcademicPeriod,
}

/// Run-level tallies reported alongside the cohort stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SequenceCounts {
    /// Students with a qualifying local attempt of the second course.
    pub with_second: usize,
    /// Subset whose canonical first-course completion was in the immediately preceding term.
    pub with_first_prior: usize,
    /// Subset with a canonical first-course completion in any earlier term.
    pub with_first_any: usize,
}

/// Everything produced by classifying a corpus for one request.
#[derive(Debug, Clone, Default)]
pub struct SequenceOutcome {
    pub prior_term: ClassifiedCohortStore,
    pub any_earlier_term: ClassifiedCohortStore,
    pub counts: SequenceCounts,
}

/// A first-course record that qualifies as a completion relative to a second-course attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorCompletion<'r> {
    pub record: &'r EnrollmentRecord,
    pub source: CreditSource,
}

impl<'r> PriorCompletion<'r> {
    pub fn new(record: &'r EnrollmentRecord) -> Self {
        Self {
            record,
            source: record.credit_source(),
        }
    }

    /// Wraps `record` if it counts as a completion of the first course before `second_term`.
    ///
    /// Examination credit needs only to be posted no later than the second term. Transfer credit
    /// additionally needs a grade value. Local completions must carry a passing grade value,
    /// come from a section of interest, and finish strictly before the second term.
    pub fn qualifying(
        record: &'r EnrollmentRecord,
        second_term: AcademicPeriod,
        first_sections: &SectionSet,
    ) -> Option<Self> {
        let term = record.academic_period;
        if !is_recognized(term) {
            return None;
        }

        let completion = Self::new(record);
        let qualifies = match completion.source {
            CreditSource::ApIbClep => term <= second_term,
            CreditSource::Transfer => record.grade_value.is_some() && term <= second_term,
            CreditSource::Local => match record.grade_value {
                Some(value) => {
                    term < second_term
                        && first_sections.contains(&record.section)
                        && value > LOCAL_COMPLETION_THRESHOLD
                }
                None => false,
            },
        };

        qualifies.then_some(completion)
    }

    pub fn term(&self) -> AcademicPeriod {
        self.record.academic_period
    }

    pub fn cohort(&self) -> Option<CohortKey> {
        classify_completion(self.record)
    }

    /// Orders two completions by which should be treated as canonical.
    ///
    /// A later term wins outright. Within a term, examination credit beats a local completion,
    /// which beats a transfer. Between completions of the same source, the higher grade value
    /// wins and a missing grade value loses to any present one.
    pub fn precedence(&self, other: &Self) -> Ordering {
        self.term()
            .cmp(&other.term())
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| compare_grades(self.record.grade_value, other.record.grade_value))
    }
}

fn compare_grades(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.total_cmp(&right),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Picks the canonical completion of two. `current` is the one seen first and keeps its place
/// unless `candidate` strictly outranks it.
pub fn choose_latest<'r>(
    current: Option<PriorCompletion<'r>>,
    candidate: Option<PriorCompletion<'r>>,
) -> Option<PriorCompletion<'r>> {
    match (current, candidate) {
        (Some(current), Some(candidate)) => {
            if candidate.precedence(&current) == Ordering::Greater {
                Some(candidate)
            } else {
                Some(current)
            }
        }
        (current, None) => current,
        (None, candidate) => candidate,
    }
}

/// Maps a completion onto its cohort. Transfer and local completions without a grade value
/// belong to no cohort.
pub fn classify_completion(record: &EnrollmentRecord) -> Option<CohortKey> {
    match record.credit_source() {
        CreditSource::ApIbClep => Some(CohortKey::Ap),
        CreditSource::Transfer => record
            .grade_value
            .map(|value| CohortKey::transfer(GradeTier::from_value(value))),
        CreditSource::Local => record
            .grade_value
            .map(|value| CohortKey::local(GradeTier::from_value(value))),
    }
}

/// Classifies students by how they completed the first course of a sequence.
pub struct SequenceClassifier<'a> {
    request: &'a SequenceRequest,
}

impl<'a> SequenceClassifier<'a> {
    pub fn new(request: &'a SequenceRequest) -> Self {
        Self { request }
    }

    /// The student's earliest local attempt of the second course in a section of interest.
    pub fn earliest_second<'r>(
        &self,
        records: &'r [EnrollmentRecord],
    ) -> Option<&'r EnrollmentRecord> {
        records
            .iter()
            .filter(|record| {
                is_recognized(record.academic_period)
                    && record.academic_period >= self.request.earliest_second_term
                    && !record.transfer
                    && courses_match(&self.request.second_course, &record.course)
                    && self.request.second_sections.contains(&record.section)
            })
            .fold(None, |earliest: Option<&'r EnrollmentRecord>, record| {
                match earliest {
                    Some(existing) if existing.academic_period <= record.academic_period => {
                        Some(existing)
                    }
                    _ => Some(record),
                }
            })
    }

    /// The canonical completion of the first course relative to `second`, if any.
    pub fn canonical_prior<'r>(
        &self,
        second: &EnrollmentRecord,
        records: &'r [EnrollmentRecord],
    ) -> Option<PriorCompletion<'r>> {
        let second_term = second.academic_period;

        records
            .iter()
            .filter(|record| courses_match(&self.request.first_course, &record.course))
            .filter_map(|record| {
                PriorCompletion::qualifying(record, second_term, &self.request.first_sections)
            })
            .fold(None, |latest, candidate| choose_latest(latest, Some(candidate)))
    }

    /// Runs the classification over every student in `corpus`.
    pub fn classify(&self, corpus: &EnrollmentCorpus) -> SequenceOutcome {
        debug!(
            first = %self.request.first_course,
            second = %self.request.second_course,
            "analyzing outcomes in second course with respect to first"
        );

        let mut outcome = SequenceOutcome::default();
        for (_, records) in corpus.students() {
            self.classify_student(records, &mut outcome);
        }

        let counts = outcome.counts;
        info!(
            second = %self.request.second_course,
            students = counts.with_second,
            "found students who took the second course locally"
        );
        info!(
            first = %self.request.first_course,
            students = counts.with_first_prior,
            "students with credit for the first course in the prior term"
        );
        info!(
            first = %self.request.first_course,
            students = counts.with_first_any,
            "students with credit for the first course in any earlier term"
        );

        outcome
    }

    fn classify_student(&self, records: &[EnrollmentRecord], outcome: &mut SequenceOutcome) {
        let Some(second) = self.earliest_second(records) else {
            return;
        };

        let second_term = second.academic_period;
        outcome.counts.with_second += 1;
        outcome.prior_term.register_term(second_term);
        outcome.any_earlier_term.register_term(second_term);

        let Some(prior) = self.canonical_prior(second, records) else {
            return;
        };

        outcome.counts.with_first_any += 1;
        let in_prior_term = is_immediately_prior(prior.term(), second_term);
        if in_prior_term {
            outcome.counts.with_first_prior += 1;
        }

        let Some(cohort) = prior.cohort() else {
            warn!(
                student = %prior.record.student_id,
                term = prior.term(),
                source = prior.source.label(),
                "unable to identify cohort for first-course completion"
            );
            return;
        };
        debug!(
            student = %second.student_id,
            term = second_term,
            cohort = cohort.label(),
            in_prior_term,
            "classified second-course attempt"
        );

        if in_prior_term {
            outcome
                .prior_term
                .record(second_term, cohort, second.clone());
        }
        outcome
            .any_earlier_term
            .record(second_term, cohort, second.clone());
    }
}

/// Convenience wrapper around [`SequenceClassifier::classify`].
pub fn classify(corpus: &EnrollmentCorpus, request: &SequenceRequest) -> SequenceOutcome {
    SequenceClassifier::new(request).classify(corpus)
}
