use crate::analytics::sequence::domain::AcademicPeriod;
use crate::analytics::sequence::report::ReportRange;
use crate::analytics::sequence::terms::{is_recognized, term_containing};
use chrono::{Local, NaiveDate};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// First term reported when `SEQ_START_TERM` is unset (Fall 2014).
pub const DEFAULT_START_TERM: AcademicPeriod = 201490;

pub const ENROLLMENTS_FILE: &str = "enrollments.json";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Development),
            "test" | "ci" => Ok(Self::Test),
            "prod" | "production" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvironment {
                value: value.to_string(),
            }),
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub report: ReportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok(), Local::now().date_naive())
    }

    /// Builds the configuration from `lookup`, with `today` deciding the default end term.
    pub fn from_vars<F>(lookup: F, today: NaiveDate) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment =
            AppEnvironment::parse(&lookup("APP_ENV").unwrap_or_else(|| "development".to_string()))?;
        let log_level = lookup("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let data_dir = PathBuf::from(lookup("SEQ_DATA_DIR").unwrap_or_else(|| "data".to_string()));
        let output_dir = lookup("SEQ_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.clone());

        let start_term = match lookup("SEQ_START_TERM") {
            Some(value) => parse_term("SEQ_START_TERM", &value)?,
            None => DEFAULT_START_TERM,
        };
        let end_term = match lookup("SEQ_END_TERM") {
            Some(value) => parse_term("SEQ_END_TERM", &value)?,
            None => term_containing(today),
        };
        check_range(start_term, end_term)?;

        let institution_label =
            lookup("SEQ_INSTITUTION_LABEL").unwrap_or_else(|| "CSU".to_string());

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            report: ReportConfig {
                data_dir,
                output_dir,
                start_term,
                end_term,
                institution_label,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where reports read from and write to, and the span of terms they cover.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub start_term: AcademicPeriod,
    pub end_term: AcademicPeriod,
    pub institution_label: String,
}

impl ReportConfig {
    pub fn enrollments_path(&self) -> PathBuf {
        self.data_dir.join(ENROLLMENTS_FILE)
    }

    pub fn range(&self) -> ReportRange {
        ReportRange::new(self.start_term, self.end_term)
    }

    /// Replaces the configured terms and output directory with any provided values.
    pub fn apply_overrides(
        &mut self,
        start_term: Option<AcademicPeriod>,
        end_term: Option<AcademicPeriod>,
        output_dir: Option<&Path>,
    ) -> Result<(), ConfigError> {
        let start = start_term.unwrap_or(self.start_term);
        let end = end_term.unwrap_or(self.end_term);
        for (variable, term) in [("start term", start), ("end term", end)] {
            if !is_recognized(term) {
                return Err(ConfigError::InvalidTerm {
                    variable,
                    value: term.to_string(),
                });
            }
        }
        check_range(start, end)?;

        self.start_term = start;
        self.end_term = end;
        if let Some(dir) = output_dir {
            self.output_dir = dir.to_path_buf();
        }
        Ok(())
    }
}

pub fn parse_term(variable: &'static str, value: &str) -> Result<AcademicPeriod, ConfigError> {
    value
        .trim()
        .parse::<AcademicPeriod>()
        .ok()
        .filter(|term| is_recognized(*term))
        .ok_or_else(|| ConfigError::InvalidTerm {
            variable,
            value: value.to_string(),
        })
}

fn check_range(start: AcademicPeriod, end: AcademicPeriod) -> Result<(), ConfigError> {
    if start > end {
        return Err(ConfigError::InvertedTermRange { start, end });
    }
    Ok(())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidEnvironment {
        value: String,
    },
    InvalidTerm {
        variable: &'static str,
        value: String,
    },
    InvertedTermRange {
        start: AcademicPeriod,
        end: AcademicPeriod,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidEnvironment { value } => write!(
                f,
                "APP_ENV must be development, test, or production (got '{}')",
                value
            ),
            ConfigError::InvalidTerm { variable, value } => write!(
                f,
                "{} must be a YYYYNN term code ending in 10, 60, or 90 (got '{}')",
                variable, value
            ),
            ConfigError::InvertedTermRange { start, end } => write!(
                f,
                "start term {} is after end term {}",
                start, end
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
