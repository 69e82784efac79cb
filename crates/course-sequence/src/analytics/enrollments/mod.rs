//! Import of the exported enrollment corpus.

mod corpus;
mod grades;
mod parser;

pub use corpus::EnrollmentCorpus;
pub use grades::LetterGrade;

use crate::analytics::sequence::domain::{CreditSource, EnrollmentRecord};
use serde::Serialize;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum EnrollmentImportError {
    #[error("failed to read enrollment export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid enrollment JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("enrollment record {index} is malformed: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

/// Record totals gathered while importing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub local: usize,
    pub transfer: usize,
    pub ap_ib_clep: usize,
    pub skipped: usize,
}

impl ImportSummary {
    fn count(&mut self, record: &EnrollmentRecord) {
        match record.credit_source() {
            CreditSource::Local => self.local += 1,
            CreditSource::Transfer => self.transfer += 1,
            CreditSource::ApIbClep => self.ap_ib_clep += 1,
        }
    }

    pub fn imported(&self) -> usize {
        self.local + self.transfer + self.ap_ib_clep
    }
}

pub struct EnrollmentImporter;

impl EnrollmentImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<EnrollmentCorpus, EnrollmentImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<EnrollmentCorpus, EnrollmentImportError> {
        Self::import(reader).map(|(corpus, _)| corpus)
    }

    /// Decodes a JSON array of enrollment rows, returning the corpus and its import totals.
    pub fn import<R: Read>(
        reader: R,
    ) -> Result<(EnrollmentCorpus, ImportSummary), EnrollmentImportError> {
        let mut corpus = EnrollmentCorpus::new();
        let mut summary = ImportSummary::default();

        for (index, row) in parser::parse_rows(reader)?.into_iter().enumerate() {
            match row.into_record(index)? {
                Some(record) => {
                    summary.count(&record);
                    corpus.insert(record);
                }
                None => summary.skipped += 1,
            }
        }

        info!(
            students = corpus.student_count(),
            local = summary.local,
            transfer = summary.transfer,
            ap_ib_clep = summary.ap_ib_clep,
            skipped = summary.skipped,
            "imported enrollment records"
        );

        Ok((corpus, summary))
    }
}
