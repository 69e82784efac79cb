use super::domain::{AcademicPeriod, CohortKey, EnrollmentRecord};
use super::terms::year_of;
use std::collections::BTreeMap;

/// Second-course records attributed to each cohort within a single term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortCells {
    cells: [Vec<EnrollmentRecord>; CohortKey::COUNT],
}

impl CohortCells {
    pub fn get(&self, cohort: CohortKey) -> &[EnrollmentRecord] {
        &self.cells[cohort.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (CohortKey, &[EnrollmentRecord])> {
        CohortKey::ordered()
            .into_iter()
            .map(move |cohort| (cohort, self.get(cohort)))
    }

    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, cohort: CohortKey, record: EnrollmentRecord) {
        self.cells[cohort.index()].push(record);
    }
}

/// Term-indexed, cohort-bucketed second-course outcomes produced by one classification run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedCohortStore {
    terms: BTreeMap<AcademicPeriod, CohortCells>,
}

impl ClassifiedCohortStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the (empty) cells for `term` if they do not already exist.
    pub fn register_term(&mut self, term: AcademicPeriod) {
        self.terms.entry(term).or_default();
    }

    pub fn record(&mut self, term: AcademicPeriod, cohort: CohortKey, record: EnrollmentRecord) {
        self.terms.entry(term).or_default().push(cohort, record);
    }

    pub fn cells(&self, term: AcademicPeriod) -> Option<&CohortCells> {
        self.terms.get(&term)
    }

    pub fn get(&self, term: AcademicPeriod, cohort: CohortKey) -> &[EnrollmentRecord] {
        self.terms
            .get(&term)
            .map(|cells| cells.get(cohort))
            .unwrap_or(&[])
    }

    /// Registered terms in ascending order.
    pub fn terms(&self) -> impl Iterator<Item = AcademicPeriod> + '_ {
        self.terms.keys().copied()
    }

    /// Registered terms whose year falls within `first_year..=last_year`.
    pub fn terms_in_years(
        &self,
        first_year: i32,
        last_year: i32,
    ) -> impl Iterator<Item = (AcademicPeriod, &CohortCells)> + '_ {
        self.terms
            .iter()
            .filter(move |(term, _)| (first_year..=last_year).contains(&year_of(**term)))
            .map(|(term, cells)| (*term, cells))
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Total number of records across every term and cohort.
    pub fn record_count(&self) -> usize {
        self.terms.values().map(CohortCells::len).sum()
    }
}
