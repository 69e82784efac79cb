use super::super::classifier::SequenceCounts;
use super::super::domain::{CohortKey, GradeTier};
use serde::Serialize;

/// The nine column groups of a report row, in their fixed output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportColumn {
    LocalA,
    LocalB,
    LocalCD,
    LocalTotal,
    TransferA,
    TransferB,
    TransferCD,
    TransferTotal,
    Ap,
}

impl ReportColumn {
    pub const COUNT: usize = 9;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::LocalA,
            Self::LocalB,
            Self::LocalCD,
            Self::LocalTotal,
            Self::TransferA,
            Self::TransferB,
            Self::TransferCD,
            Self::TransferTotal,
            Self::Ap,
        ]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::LocalA => 0,
            Self::LocalB => 1,
            Self::LocalCD => 2,
            Self::LocalTotal => 3,
            Self::TransferA => 4,
            Self::TransferB => 5,
            Self::TransferCD => 6,
            Self::TransferTotal => 7,
            Self::Ap => 8,
        }
    }

    /// Cohorts summed into this column.
    pub const fn cohorts(self) -> &'static [CohortKey] {
        match self {
            Self::LocalA => &[CohortKey::LocalA],
            Self::LocalB => &[CohortKey::LocalB],
            Self::LocalCD => &[CohortKey::LocalCD],
            Self::LocalTotal => &[CohortKey::LocalA, CohortKey::LocalB, CohortKey::LocalCD],
            Self::TransferA => &[CohortKey::TransferA],
            Self::TransferB => &[CohortKey::TransferB],
            Self::TransferCD => &[CohortKey::TransferCD],
            Self::TransferTotal => &[
                CohortKey::TransferA,
                CohortKey::TransferB,
                CohortKey::TransferCD,
            ],
            Self::Ap => &[CohortKey::Ap],
        }
    }

    const fn tier(self) -> Option<GradeTier> {
        match self {
            Self::LocalA | Self::TransferA => Some(GradeTier::A),
            Self::LocalB | Self::TransferB => Some(GradeTier::B),
            Self::LocalCD | Self::TransferCD => Some(GradeTier::CD),
            Self::LocalTotal | Self::TransferTotal | Self::Ap => None,
        }
    }

    /// Short label used in the second header row, e.g. `CSU (B)` or `Transfer`.
    pub fn label(self, institution: &str) -> String {
        let source = match self {
            Self::LocalA | Self::LocalB | Self::LocalCD | Self::LocalTotal => institution,
            Self::TransferA | Self::TransferB | Self::TransferCD | Self::TransferTotal => {
                "Transfer"
            }
            Self::Ap => return "AP/IB/CLEP".to_string(),
        };

        match self.tier() {
            Some(tier) => format!("{source} ({})", tier.label()),
            None => source.to_string(),
        }
    }

    /// Block heading naming how the first course was completed, e.g. `MATH117 transfer (ALL)`.
    pub fn heading(self, first_course: &str, institution: &str) -> String {
        let tier = self.tier().map_or("ALL", GradeTier::label);
        match self {
            Self::Ap => format!("{first_course} via AP/IB/CLEP"),
            Self::LocalA | Self::LocalB | Self::LocalCD | Self::LocalTotal => {
                format!("{first_course} at {institution} ({tier})")
            }
            Self::TransferA | Self::TransferB | Self::TransferCD | Self::TransferTotal => {
                format!("{first_course} transfer ({tier})")
            }
        }
    }
}

/// Count, pass rate, and average grade for one column of one row.
///
/// Rates are absent rather than zero when there is nothing to divide by, so renderers never
/// see `NaN` or a misleading `0.00`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ColumnStats {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_grade: Option<f64>,
}

/// One labelled row; `columns` is `None` when no term falls in the row's period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub columns: Option<[ColumnStats; ReportColumn::COUNT]>,
}

impl ReportRow {
    pub fn label_only(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            columns: None,
        }
    }

    pub fn is_label_only(&self) -> bool {
        self.columns.is_none()
    }

    pub fn column(&self, column: ReportColumn) -> Option<&ColumnStats> {
        self.columns.as_ref().map(|columns| &columns[column.index()])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    OneYear,
    ThreeYear,
}

/// Which cohort store a block was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorScope {
    PriorTerm,
    AnyEarlierTerm,
}

impl PriorScope {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PriorTerm => "in the prior term",
            Self::AnyEarlierTerm => "in any earlier term",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportBlock {
    pub period: ReportPeriod,
    pub scope: PriorScope,
    pub rows: Vec<ReportRow>,
}

/// The four report blocks for one course pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceReport {
    pub first_course: String,
    pub second_course: String,
    pub counts: SequenceCounts,
    pub blocks: Vec<ReportBlock>,
}

impl SequenceReport {
    pub fn block(&self, period: ReportPeriod, scope: PriorScope) -> Option<&ReportBlock> {
        self.blocks
            .iter()
            .find(|block| block.period == period && block.scope == scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_labels_match_header_layout() {
        let labels: Vec<String> = ReportColumn::ordered()
            .into_iter()
            .map(|column| column.label("CSU"))
            .collect();
        assert_eq!(
            labels,
            vec![
                "CSU (A)",
                "CSU (B)",
                "CSU (C/D)",
                "CSU",
                "Transfer (A)",
                "Transfer (B)",
                "Transfer (C/D)",
                "Transfer",
                "AP/IB/CLEP",
            ]
        );
    }

    #[test]
    fn headings_name_first_course() {
        assert_eq!(
            ReportColumn::LocalTotal.heading("MATH117", "CSU"),
            "MATH117 at CSU (ALL)"
        );
        assert_eq!(
            ReportColumn::TransferCD.heading("MATH117", "CSU"),
            "MATH117 transfer (C/D)"
        );
        assert_eq!(
            ReportColumn::Ap.heading("MATH117", "CSU"),
            "MATH117 via AP/IB/CLEP"
        );
    }

    #[test]
    fn totals_cover_each_cohort_once() {
        let mut seen: Vec<CohortKey> = [
            ReportColumn::LocalTotal,
            ReportColumn::TransferTotal,
            ReportColumn::Ap,
        ]
        .into_iter()
        .flat_map(|column| column.cohorts().iter().copied())
        .collect();
        seen.sort();
        assert_eq!(seen, CohortKey::ordered().to_vec());
    }
}
