use course_sequence::analytics::enrollments::EnrollmentCorpus;
use course_sequence::analytics::sequence::report::{PriorScope, ReportPeriod};
use course_sequence::analytics::sequence::{
    classify, EnrollmentRecord, ReportRange, SectionSet, SequenceReport, SequenceReportDocument,
    SequenceRequest,
};

fn record(student: &str, course: &str, term: i32, grade_value: f64) -> EnrollmentRecord {
    EnrollmentRecord {
        student_id: student.to_string(),
        academic_period: term,
        course: course.to_string(),
        section: "001".to_string(),
        transfer: false,
        ap_ib_clep: false,
        attempted: true,
        withdrawn: false,
        passed: grade_value >= 1.0,
        failed: grade_value < 1.0,
        gradable: true,
        final_grade: None,
        grade_value: Some(grade_value),
    }
}

fn request() -> SequenceRequest {
    SequenceRequest {
        first_course: "MATH117".to_string(),
        first_sections: SectionSet::all(),
        second_course: "MATH160".to_string(),
        second_sections: SectionSet::all(),
        earliest_second_term: 202310,
    }
}

fn single_student_report() -> SequenceReport {
    let corpus = EnrollmentCorpus::from_records([
        record("s", "MATH117", 202390, 3.0),
        record("s", "MATH160", 202410, 3.333),
    ]);
    let outcome = classify(&corpus, &request());
    SequenceReport::build(
        "MATH117",
        "MATH160",
        &outcome,
        ReportRange::new(202310, 202410),
    )
}

const HEADING: &str = ",MATH117 at CSU (A),,,MATH117 at CSU (B),,,MATH117 at CSU (C/D),,,MATH117 at CSU (ALL),,,MATH117 transfer (A),,,MATH117 transfer (B),,,MATH117 transfer (C/D),,,MATH117 transfer (ALL),,,MATH117 via AP/IB/CLEP";
const COUNT_HEADER: &str = ",N,Pass %,Avg. Grade,N,Pass %,Avg. Grade,N,Pass %,Avg. Grade,N,Pass %,Avg. Grade,N,Pass %,Avg. Grade,N,Pass %,Avg. Grade,N,Pass %,Avg. Grade,N,Pass %,Avg. Grade,N,Pass %,Avg. Grade";
const LABEL_HEADER: &str = "Year,,CSU (A),CSU (A),,CSU (B),CSU (B),,CSU (C/D),CSU (C/D),,CSU,CSU,,Transfer (A),Transfer (A),,Transfer (B),Transfer (B),,Transfer (C/D),Transfer (C/D),,Transfer,Transfer,,AP/IB/CLEP,AP/IB/CLEP";
const DATA_ROW: &str = "2024,0,,,1,100.00,3.33,0,,,1,100.00,3.33,0,,,0,,,0,,,0,,,0,,";

#[test]
fn document_matches_spreadsheet_layout() {
    let report = single_student_report();
    let text = SequenceReportDocument::new(&report, "CSU")
        .render()
        .expect("report renders");

    let expected = [
        "Pass rates in:,,,,,,,,,,,MATH160",
        "As function of:,,,,,,,,,,,MATH117",
        "Total students with MATH160:,,,,,,,,,,,1",
        "Subset with MATH117 in prior term:,,,,,,,,,,,1",
        "Subset with MATH117 in any earlier term:,,,,,,,,,,,1",
        "",
        "Reports for individual years [students with credit in MATH117 in the prior term]",
        "",
        HEADING,
        COUNT_HEADER,
        LABEL_HEADER,
        "2022",
        "2023",
        DATA_ROW,
        "",
        "Reports based on average over last three terms [students with credit in MATH117 in the prior term]",
        "",
        "",
        "Reports for individual years [students with credit in MATH117 in the any earlier term]",
        "",
        HEADING,
        COUNT_HEADER,
        LABEL_HEADER,
        "2022",
        "2023",
        DATA_ROW,
        "",
        "Reports based on average over last three terms [students with credit in MATH117 in any earlier term]",
        "",
        "",
    ];

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, expected);
    assert!(text.ends_with('\n'));
}

#[test]
fn blocks_follow_fixed_order() {
    let report = single_student_report();
    let order: Vec<(ReportPeriod, PriorScope)> = report
        .blocks
        .iter()
        .map(|block| (block.period, block.scope))
        .collect();
    assert_eq!(
        order,
        vec![
            (ReportPeriod::OneYear, PriorScope::PriorTerm),
            (ReportPeriod::ThreeYear, PriorScope::PriorTerm),
            (ReportPeriod::OneYear, PriorScope::AnyEarlierTerm),
            (ReportPeriod::ThreeYear, PriorScope::AnyEarlierTerm),
        ]
    );
}

#[test]
fn institution_labels_with_commas_are_quoted() {
    let report = single_student_report();
    let text = SequenceReportDocument::new(&report, "CSU, Main")
        .render()
        .expect("report renders");
    assert!(text.contains(",\"MATH117 at CSU, Main (A)\","));
    assert!(text.contains("Year,,\"CSU, Main (A)\",\"CSU, Main (A)\","));
}

#[test]
fn three_year_windows_appear_once_the_range_spans_three_years() {
    let corpus = EnrollmentCorpus::from_records([
        record("a", "MATH117", 202190, 4.0),
        record("a", "MATH160", 202210, 4.0),
        record("b", "MATH117", 202390, 2.0),
        record("b", "MATH160", 202410, 0.0),
    ]);
    let mut request = request();
    request.earliest_second_term = 202210;
    let outcome = classify(&corpus, &request);
    let report = SequenceReport::build(
        "MATH117",
        "MATH160",
        &outcome,
        ReportRange::new(202210, 202410),
    );

    let windows = report
        .block(ReportPeriod::ThreeYear, PriorScope::PriorTerm)
        .expect("block present");
    assert_eq!(windows.rows.len(), 1);
    assert_eq!(windows.rows[0].label, "2022-2024");

    let text = SequenceReportDocument::new(&report, "CSU")
        .render()
        .expect("report renders");
    assert!(text.contains("\n2022-2024,1,100.00,4.00,0,,,1,0.00,,2,50.00,4.00,"));
}

#[test]
fn second_course_only_years_render_zero_rows() {
    // Student "a" never completed the first course, so 2023 has a registered term but no
    // classified records.
    let corpus = EnrollmentCorpus::from_records([
        record("a", "MATH160", 202310, 3.0),
        record("b", "MATH117", 202390, 3.0),
        record("b", "MATH160", 202410, 3.333),
    ]);
    let outcome = classify(&corpus, &request());
    assert_eq!(outcome.counts.with_second, 2);
    assert_eq!(outcome.counts.with_first_any, 1);

    let report = SequenceReport::build(
        "MATH117",
        "MATH160",
        &outcome,
        ReportRange::new(202310, 202410),
    );
    let years = report
        .block(ReportPeriod::OneYear, PriorScope::AnyEarlierTerm)
        .expect("block present");
    assert!(years.rows[0].is_label_only());
    assert!(!years.rows[1].is_label_only());

    let text = SequenceReportDocument::new(&report, "CSU")
        .render()
        .expect("report renders");
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines.contains(&"2022"));
    assert!(lines.contains(&"2023,0,,,0,,,0,,,0,,,0,,,0,,,0,,,0,,,0,,"));
    assert!(!lines.contains(&"2023"));
    assert!(lines.contains(&DATA_ROW));
}
