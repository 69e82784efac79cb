use super::classifier::SequenceRequest;
use super::domain::AcademicPeriod;
use super::sections::SectionPreset;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("failed to read batch plan: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid batch plan CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("batch plan row {row}: unknown section preset '{value}'")]
    UnknownPreset { row: usize, value: String },
    #[error("batch plan row {row}: course codes must not be empty")]
    MissingCourse { row: usize },
}

/// One course pair to analyze, as listed in a batch plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePlan {
    pub first_course: String,
    pub second_course: String,
    pub first_sections: SectionPreset,
    pub second_sections: SectionPreset,
}

impl SequencePlan {
    pub fn new(first_course: &str, second_course: &str) -> Self {
        Self {
            first_course: first_course.to_string(),
            second_course: second_course.to_string(),
            first_sections: SectionPreset::All,
            second_sections: SectionPreset::All,
        }
    }

    pub fn request(&self, earliest_second_term: AcademicPeriod) -> SequenceRequest {
        SequenceRequest {
            first_course: self.first_course.clone(),
            first_sections: self.first_sections.sections(),
            second_course: self.second_course.clone(),
            second_sections: self.second_sections.sections(),
            earliest_second_term,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Self>, PlanError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads a headed CSV of `first,second,first_sections,second_sections`. Blank preset cells
    /// select every section.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Self>, PlanError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut plans = Vec::new();
        for (index, row) in csv_reader.deserialize::<PlanRow>().enumerate() {
            let row = row?;
            let number = index + 1;
            if row.first.is_empty() || row.second.is_empty() {
                return Err(PlanError::MissingCourse { row: number });
            }

            plans.push(Self {
                first_sections: preset(number, row.first_sections.as_deref())?,
                second_sections: preset(number, row.second_sections.as_deref())?,
                first_course: row.first,
                second_course: row.second,
            });
        }
        Ok(plans)
    }
}

#[derive(Debug, Deserialize)]
struct PlanRow {
    first: String,
    second: String,
    #[serde(default)]
    first_sections: Option<String>,
    #[serde(default)]
    second_sections: Option<String>,
}

fn preset(row: usize, value: Option<&str>) -> Result<SectionPreset, PlanError> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(SectionPreset::All),
        Some(value) => SectionPreset::parse(value).ok_or_else(|| PlanError::UnknownPreset {
            row,
            value: value.to_string(),
        }),
    }
}
