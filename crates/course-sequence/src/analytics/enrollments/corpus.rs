use crate::analytics::sequence::domain::EnrollmentRecord;
use std::collections::BTreeMap;

/// Every imported enrollment, grouped by student.
///
/// Students iterate in ascending id order. Each student's records keep their import order, which
/// decides ties between otherwise identical completions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrollmentCorpus {
    students: BTreeMap<String, Vec<EnrollmentRecord>>,
}

impl EnrollmentCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = EnrollmentRecord>,
    {
        let mut corpus = Self::new();
        for record in records {
            corpus.insert(record);
        }
        corpus
    }

    pub fn insert(&mut self, record: EnrollmentRecord) {
        self.students
            .entry(record.student_id.clone())
            .or_default()
            .push(record);
    }

    pub fn student(&self, student_id: &str) -> Option<&[EnrollmentRecord]> {
        self.students.get(student_id).map(Vec::as_slice)
    }

    pub fn students(&self) -> impl Iterator<Item = (&str, &[EnrollmentRecord])> + '_ {
        self.students
            .iter()
            .map(|(id, records)| (id.as_str(), records.as_slice()))
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn record_count(&self) -> usize {
        self.students.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

impl FromIterator<EnrollmentRecord> for EnrollmentCorpus {
    fn from_iter<I: IntoIterator<Item = EnrollmentRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
