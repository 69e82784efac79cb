use super::super::classifier::SequenceOutcome;
use super::super::domain::{AcademicPeriod, CohortKey, EnrollmentRecord};
use super::super::store::{ClassifiedCohortStore, CohortCells};
use super::super::terms::year_of;
use super::views::{
    ColumnStats, PriorScope, ReportBlock, ReportColumn, ReportPeriod, ReportRow, SequenceReport,
};

/// Running totals for a set of second-course records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CohortTally {
    pub count: usize,
    pub passed: usize,
    /// Sum of every non-null grade value, passed or not.
    pub grade_sum: f64,
}

impl CohortTally {
    pub fn add(&mut self, record: &EnrollmentRecord) {
        self.count += 1;
        if let Some(value) = record.grade_value {
            self.grade_sum += value;
        }
        if record.passed {
            self.passed += 1;
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            passed: self.passed + other.passed,
            grade_sum: self.grade_sum + other.grade_sum,
        }
    }

    /// Pass rate is `100 * passed / count`; average grade divides the grade sum by the number
    /// of passing records. Either is absent when its denominator is zero.
    pub fn stats(&self) -> ColumnStats {
        let pass_rate = (self.count > 0).then(|| 100.0 * self.passed as f64 / self.count as f64);
        let average_grade = (self.passed > 0).then(|| self.grade_sum / self.passed as f64);

        ColumnStats {
            count: self.count,
            pass_rate,
            average_grade,
        }
    }
}

/// Per-cohort tallies accumulated over every term of a reporting period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodTally {
    cohorts: [CohortTally; CohortKey::COUNT],
}

impl PeriodTally {
    pub fn add_cells(&mut self, cells: &CohortCells) {
        for (cohort, records) in cells.iter() {
            let tally = &mut self.cohorts[cohort.index()];
            for record in records {
                tally.add(record);
            }
        }
    }

    pub fn cohort(&self, cohort: CohortKey) -> CohortTally {
        self.cohorts[cohort.index()]
    }

    pub fn column(&self, column: ReportColumn) -> CohortTally {
        column
            .cohorts()
            .iter()
            .map(|cohort| self.cohort(*cohort))
            .fold(CohortTally::default(), CohortTally::merge)
    }

    pub fn to_row(&self, label: impl Into<String>) -> ReportRow {
        let columns = ReportColumn::ordered().map(|column| self.column(column).stats());
        ReportRow {
            label: label.into(),
            columns: Some(columns),
        }
    }
}

fn period_row(
    store: &ClassifiedCohortStore,
    label: String,
    first_year: i32,
    last_year: i32,
) -> ReportRow {
    let mut tally = PeriodTally::default();
    let mut any_terms = false;

    for (_, cells) in store.terms_in_years(first_year, last_year) {
        tally.add_cells(cells);
        any_terms = true;
    }

    if any_terms {
        tally.to_row(label)
    } else {
        ReportRow::label_only(label)
    }
}

/// One row per year from `start_year` through `end_year`, each aggregating every term of that
/// year. Years with no registered terms produce label-only rows.
pub fn emit_year_rows(
    store: &ClassifiedCohortStore,
    start_year: i32,
    end_year: i32,
) -> Vec<ReportRow> {
    (start_year..=end_year)
        .map(|year| period_row(store, year.to_string(), year, year))
        .collect()
}

/// One row per rolling three-year window, the first ending at `start_year + 2` and the last at
/// `end_year`. Rows are labelled `first-last`.
pub fn emit_three_year_rows(
    store: &ClassifiedCohortStore,
    start_year: i32,
    end_year: i32,
) -> Vec<ReportRow> {
    (start_year.saturating_add(2)..=end_year)
        .map(|last| {
            let first = last - 2;
            period_row(store, format!("{first}-{last}"), first, last)
        })
        .collect()
}

/// The span of terms a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub start_term: AcademicPeriod,
    pub end_term: AcademicPeriod,
}

impl ReportRange {
    pub fn new(start_term: AcademicPeriod, end_term: AcademicPeriod) -> Self {
        Self {
            start_term,
            end_term,
        }
    }

    pub fn start_year(&self) -> i32 {
        year_of(self.start_term)
    }

    pub fn end_year(&self) -> i32 {
        year_of(self.end_term)
    }

    /// Single-year rows open one year before the start year so the series is contiguous with
    /// students whose second-course attempt precedes the configured window.
    pub fn first_reported_year(&self) -> i32 {
        self.start_year() - 1
    }
}

impl SequenceReport {
    /// Builds the four blocks: single years then three-year windows, first for completions in
    /// the immediately prior term and then for completions in any earlier term.
    pub fn build(
        first_course: &str,
        second_course: &str,
        outcome: &SequenceOutcome,
        range: ReportRange,
    ) -> Self {
        let scopes = [
            (PriorScope::PriorTerm, &outcome.prior_term),
            (PriorScope::AnyEarlierTerm, &outcome.any_earlier_term),
        ];

        let blocks = scopes
            .into_iter()
            .flat_map(|(scope, store)| {
                [
                    ReportBlock {
                        period: ReportPeriod::OneYear,
                        scope,
                        rows: emit_year_rows(store, range.first_reported_year(), range.end_year()),
                    },
                    ReportBlock {
                        period: ReportPeriod::ThreeYear,
                        scope,
                        rows: emit_three_year_rows(store, range.start_year(), range.end_year()),
                    },
                ]
            })
            .collect();

        Self {
            first_course: first_course.to_string(),
            second_course: second_course.to_string(),
            counts: outcome.counts,
            blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn second(term: AcademicPeriod, passed: bool, grade_value: Option<f64>) -> EnrollmentRecord {
        EnrollmentRecord {
            student_id: format!("s-{term}"),
            academic_period: term,
            course: "MATH160".to_string(),
            section: "001".to_string(),
            transfer: false,
            ap_ib_clep: false,
            attempted: true,
            withdrawn: false,
            passed,
            failed: !passed,
            gradable: true,
            final_grade: None,
            grade_value,
        }
    }

    #[test]
    fn tally_stats_leave_empty_cohorts_blank() {
        let stats = CohortTally::default().stats();
        assert_eq!(stats.count, 0);
        assert!(stats.pass_rate.is_none());
        assert!(stats.average_grade.is_none());
    }

    #[test]
    fn average_divides_all_grades_by_passed_count() {
        let mut tally = CohortTally::default();
        tally.add(&second(202410, true, Some(4.0)));
        tally.add(&second(202410, true, Some(3.0)));
        tally.add(&second(202410, false, Some(1.0)));
        tally.add(&second(202410, false, None));

        let stats = tally.stats();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.pass_rate, Some(50.0));
        assert_eq!(stats.average_grade, Some(4.0));
    }

    #[test]
    fn average_is_absent_when_nobody_passed() {
        let mut tally = CohortTally::default();
        tally.add(&second(202410, false, Some(0.0)));
        let stats = tally.stats();
        assert_eq!(stats.pass_rate, Some(0.0));
        assert!(stats.average_grade.is_none());
    }

    #[test]
    fn year_rows_are_contiguous_and_label_missing_years() {
        let mut store = ClassifiedCohortStore::new();
        store.record(202210, CohortKey::LocalA, second(202210, true, Some(4.0)));
        store.record(202290, CohortKey::Ap, second(202290, false, Some(0.0)));
        store.register_term(202490);

        let rows = emit_year_rows(&store, 2021, 2024);
        let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["2021", "2022", "2023", "2024"]);
        assert!(rows[0].is_label_only());
        assert!(rows[2].is_label_only());

        let local_a = rows[1].column(ReportColumn::LocalA).expect("2022 has data");
        assert_eq!(local_a.count, 1);
        assert_eq!(local_a.pass_rate, Some(100.0));
        let ap = rows[1].column(ReportColumn::Ap).expect("2022 has data");
        assert_eq!(ap.count, 1);
        assert_eq!(ap.pass_rate, Some(0.0));

        let empty = rows[3].column(ReportColumn::LocalTotal).expect("2024 registered");
        assert_eq!(empty.count, 0);
        assert!(empty.pass_rate.is_none());
    }

    #[test]
    fn three_year_windows_start_after_two_full_years() {
        let mut store = ClassifiedCohortStore::new();
        store.record(202010, CohortKey::LocalB, second(202010, true, Some(3.0)));
        store.record(202290, CohortKey::LocalB, second(202290, true, Some(2.0)));

        let rows = emit_three_year_rows(&store, 2020, 2024);
        let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["2020-2022", "2021-2023", "2022-2024"]);

        let first = rows[0].column(ReportColumn::LocalB).expect("window has data");
        assert_eq!(first.count, 2);
        assert_eq!(first.average_grade, Some(2.5));
        let last = rows[2].column(ReportColumn::LocalTotal).expect("window has data");
        assert_eq!(last.count, 1);
    }

    #[test]
    fn short_ranges_emit_no_three_year_rows() {
        let store = ClassifiedCohortStore::new();
        assert!(emit_three_year_rows(&store, 2023, 2024).is_empty());
    }

    #[test]
    fn totals_combine_grade_tiers() {
        let mut store = ClassifiedCohortStore::new();
        store.record(202310, CohortKey::TransferA, second(202310, true, Some(4.0)));
        store.record(202310, CohortKey::TransferCD, second(202310, false, Some(1.0)));

        let rows = emit_year_rows(&store, 2023, 2023);
        let total = rows[0]
            .column(ReportColumn::TransferTotal)
            .expect("row has data");
        assert_eq!(total.count, 2);
        assert_eq!(total.pass_rate, Some(50.0));
        assert_eq!(total.average_grade, Some(5.0));
    }
}
