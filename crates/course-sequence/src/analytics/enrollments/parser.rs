use super::grades::LetterGrade;
use super::EnrollmentImportError;
use crate::analytics::sequence::domain::{AcademicPeriod, EnrollmentRecord};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::warn;

/// One element of the exported JSON array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnrollmentRow {
    student_id: String,
    academic_period: AcademicPeriod,
    course: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    section: String,
    #[serde(default, deserialize_with = "flag")]
    transfer: bool,
    #[serde(default, deserialize_with = "flag")]
    ap_ib_clep: bool,
    #[serde(default, deserialize_with = "flag")]
    attempted: bool,
    #[serde(default, deserialize_with = "flag")]
    withdrawn: bool,
    #[serde(default, deserialize_with = "flag")]
    passed: bool,
    #[serde(default, deserialize_with = "flag")]
    failed: bool,
    #[serde(default, deserialize_with = "flag")]
    gradable: bool,
    #[serde(default)]
    final_grade: Option<String>,
    #[serde(default)]
    grade_value: Option<f64>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<EnrollmentRow>, serde_json::Error> {
    serde_json::from_reader(reader)
}

impl EnrollmentRow {
    /// Converts the row into a record, or `None` when the row should not enter the corpus.
    pub(crate) fn into_record(
        self,
        index: usize,
    ) -> Result<Option<EnrollmentRecord>, EnrollmentImportError> {
        let malformed = |reason: &str| EnrollmentImportError::MalformedRecord {
            index,
            reason: reason.to_string(),
        };

        let student_id = self.student_id.trim().to_string();
        if student_id.is_empty() {
            return Err(malformed("missing student id"));
        }
        let course = self.course.trim().to_string();
        if course.is_empty() {
            return Err(malformed("missing course"));
        }
        // Exports flag exam credit as a transfer as well; exam credit wins.
        let transfer = self.transfer && !self.ap_ib_clep;

        let final_grade = self
            .final_grade
            .map(|grade| grade.trim().to_string())
            .filter(|grade| !grade.is_empty());

        let mut withdrawn = self.withdrawn;
        let mut derived_value = None;
        if let Some(grade) = final_grade.as_deref() {
            let letter = LetterGrade::parse(grade);
            match letter {
                LetterGrade::NotGraded => return Ok(None),
                LetterGrade::Withdrawn => withdrawn = true,
                LetterGrade::Value(_) => {}
                LetterGrade::Unrecognized => {
                    warn!(grade, course = %course, "unrecognized grade");
                }
            }
            derived_value = letter.value();
        }
        let grade_value = self.grade_value.or(derived_value);

        let mut record = EnrollmentRecord {
            student_id,
            academic_period: self.academic_period,
            course,
            section: self.section.trim().to_string(),
            transfer,
            ap_ib_clep: self.ap_ib_clep,
            attempted: self.attempted,
            withdrawn,
            passed: self.passed,
            failed: self.failed,
            gradable: self.gradable,
            final_grade,
            grade_value,
        };

        if record.transfer || record.ap_ib_clep {
            return Ok(Some(record));
        }

        let has_outcome = record.attempted || record.passed || record.failed || record.withdrawn;
        if !has_outcome {
            // Rows stripped of their flags by a repeat-delete still carry a usable grade.
            match record.grade_value {
                Some(value) => {
                    record.attempted = true;
                    if value < 1.0 {
                        record.failed = true;
                    } else {
                        record.passed = true;
                    }
                }
                None => {
                    warn!(
                        student = %record.student_id,
                        term = record.academic_period,
                        course = %record.course,
                        section = %record.section,
                        "ignoring registration with no outcome and no grade"
                    );
                    return Ok(None);
                }
            }
        }

        Ok(Some(record))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Accepts integer-coded (`0`/`1`), boolean, or `Y`/`N` flags. Null reads as false.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<FlagValue>::deserialize(deserializer)?;
    Ok(match value {
        None => false,
        Some(FlagValue::Bool(value)) => value,
        Some(FlagValue::Int(value)) => value != 0,
        Some(FlagValue::Text(value)) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "y" | "yes" | "1" | "true"
        ),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
