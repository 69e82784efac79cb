use crate::analytics::enrollments::EnrollmentCorpus;
use crate::analytics::sequence::classifier::SequenceRequest;
use crate::analytics::sequence::domain::{AcademicPeriod, EnrollmentRecord};
use crate::analytics::sequence::sections::SectionSet;

pub(super) const FIRST: &str = "MATH117";
pub(super) const SECOND: &str = "MATH160";

pub(super) fn request() -> SequenceRequest {
    SequenceRequest {
        first_course: FIRST.to_string(),
        first_sections: SectionSet::all(),
        second_course: SECOND.to_string(),
        second_sections: SectionSet::all(),
        earliest_second_term: 201490,
    }
}

/// A passed local enrollment in section 001.
pub(super) fn local(
    student: &str,
    course: &str,
    term: AcademicPeriod,
    grade_value: Option<f64>,
) -> EnrollmentRecord {
    EnrollmentRecord {
        student_id: student.to_string(),
        academic_period: term,
        course: course.to_string(),
        section: "001".to_string(),
        transfer: false,
        ap_ib_clep: false,
        attempted: true,
        withdrawn: false,
        passed: grade_value.map_or(false, |value| value >= 1.0),
        failed: grade_value.map_or(false, |value| value < 1.0),
        gradable: true,
        final_grade: None,
        grade_value,
    }
}

pub(super) fn in_section(mut record: EnrollmentRecord, section: &str) -> EnrollmentRecord {
    record.section = section.to_string();
    record
}

pub(super) fn transfer(
    student: &str,
    course: &str,
    term: AcademicPeriod,
    grade_value: Option<f64>,
) -> EnrollmentRecord {
    EnrollmentRecord {
        section: String::new(),
        transfer: true,
        attempted: false,
        passed: false,
        failed: false,
        ..local(student, course, term, grade_value)
    }
}

pub(super) fn exam(
    student: &str,
    course: &str,
    term: AcademicPeriod,
    grade_value: Option<f64>,
) -> EnrollmentRecord {
    EnrollmentRecord {
        section: String::new(),
        ap_ib_clep: true,
        attempted: false,
        passed: false,
        failed: false,
        ..local(student, course, term, grade_value)
    }
}

pub(super) fn corpus(records: Vec<EnrollmentRecord>) -> EnrollmentCorpus {
    EnrollmentCorpus::from_records(records)
}
