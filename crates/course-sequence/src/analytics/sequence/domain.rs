use serde::{Deserialize, Serialize};

/// Term code in `YYYYNN` form, where `NN` is 10 (Spring), 60 (Summer), or 90 (Fall).
pub type AcademicPeriod = i32;

/// Grade value above which a completion counts as an "A".
pub const A_THRESHOLD: f64 = 3.5;

/// Grade value above which a completion counts as a "B".
pub const B_THRESHOLD: f64 = 2.5;

/// Grade value a local completion must exceed to count as a completion at all.
pub const LOCAL_COMPLETION_THRESHOLD: f64 = 0.9;

/// One student's enrollment in one section of one course in one term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub student_id: String,
    pub academic_period: AcademicPeriod,
    pub course: String,
    pub section: String,
    pub transfer: bool,
    pub ap_ib_clep: bool,
    pub attempted: bool,
    pub withdrawn: bool,
    pub passed: bool,
    pub failed: bool,
    pub gradable: bool,
    pub final_grade: Option<String>,
    pub grade_value: Option<f64>,
}

impl EnrollmentRecord {
    pub fn credit_source(&self) -> CreditSource {
        if self.ap_ib_clep {
            CreditSource::ApIbClep
        } else if self.transfer {
            CreditSource::Transfer
        } else {
            CreditSource::Local
        }
    }
}

/// How credit for a course was earned.
///
/// Variants are declared in increasing same-term precedence: when two completions fall in the
/// same term, examination credit beats a local completion, which beats a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditSource {
    Transfer,
    Local,
    ApIbClep,
}

impl CreditSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transfer => "Transfer",
            Self::Local => "Local",
            Self::ApIbClep => "AP/IB/CLEP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeTier {
    A,
    B,
    CD,
}

impl GradeTier {
    pub fn from_value(grade_value: f64) -> Self {
        if grade_value > A_THRESHOLD {
            Self::A
        } else if grade_value > B_THRESHOLD {
            Self::B
        } else {
            Self::CD
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::CD => "C/D",
        }
    }
}

/// The seven mutually exclusive ways a student can have completed the first course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortKey {
    LocalA,
    LocalB,
    LocalCD,
    TransferA,
    TransferB,
    TransferCD,
    Ap,
}

impl CohortKey {
    pub const COUNT: usize = 7;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::LocalA,
            Self::LocalB,
            Self::LocalCD,
            Self::TransferA,
            Self::TransferB,
            Self::TransferCD,
            Self::Ap,
        ]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::LocalA => 0,
            Self::LocalB => 1,
            Self::LocalCD => 2,
            Self::TransferA => 3,
            Self::TransferB => 4,
            Self::TransferCD => 5,
            Self::Ap => 6,
        }
    }

    pub const fn credit_source(self) -> CreditSource {
        match self {
            Self::LocalA | Self::LocalB | Self::LocalCD => CreditSource::Local,
            Self::TransferA | Self::TransferB | Self::TransferCD => CreditSource::Transfer,
            Self::Ap => CreditSource::ApIbClep,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LocalA => "Local (A)",
            Self::LocalB => "Local (B)",
            Self::LocalCD => "Local (C/D)",
            Self::TransferA => "Transfer (A)",
            Self::TransferB => "Transfer (B)",
            Self::TransferCD => "Transfer (C/D)",
            Self::Ap => "AP/IB/CLEP",
        }
    }

    pub const fn local(tier: GradeTier) -> Self {
        match tier {
            GradeTier::A => Self::LocalA,
            GradeTier::B => Self::LocalB,
            GradeTier::CD => Self::LocalCD,
        }
    }

    pub const fn transfer(tier: GradeTier) -> Self {
        match tier {
            GradeTier::A => Self::TransferA,
            GradeTier::B => Self::TransferB,
            GradeTier::CD => Self::TransferCD,
        }
    }
}
