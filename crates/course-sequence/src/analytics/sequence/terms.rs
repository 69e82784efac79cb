use super::domain::AcademicPeriod;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermPart {
    Spring,
    Summer,
    Fall,
}

impl TermPart {
    pub const fn code(self) -> i32 {
        match self {
            Self::Spring => 10,
            Self::Summer => 60,
            Self::Fall => 90,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            10 => Some(Self::Spring),
            60 => Some(Self::Summer),
            90 => Some(Self::Fall),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        }
    }
}

pub const fn year_of(term: AcademicPeriod) -> i32 {
    term / 100
}

pub const fn part_of(term: AcademicPeriod) -> Option<TermPart> {
    TermPart::from_code(term % 100)
}

pub const fn term_code(year: i32, part: TermPart) -> AcademicPeriod {
    year * 100 + part.code()
}

/// True for positive term codes with a recognized Spring/Summer/Fall suffix.
pub const fn is_recognized(term: AcademicPeriod) -> bool {
    term > 0 && part_of(term).is_some()
}

/// The term in session on `date`: January through May is Spring, June and July are Summer,
/// and August through December is Fall.
pub fn term_containing(date: NaiveDate) -> AcademicPeriod {
    let part = match date.month() {
        1..=5 => TermPart::Spring,
        6 | 7 => TermPart::Summer,
        _ => TermPart::Fall,
    };
    term_code(date.year(), part)
}

/// Human-readable name such as `Fall 2024`. Unrecognized codes are shown as-is.
pub fn term_name(term: AcademicPeriod) -> String {
    match part_of(term) {
        Some(part) if term > 0 => format!("{} {}", part.label(), year_of(term)),
        _ => term.to_string(),
    }
}

/// Tests whether `first` is the term immediately before `second` on the academic calendar.
///
/// Spring follows the prior Fall; Summer follows Spring of the same year; Fall follows either
/// Spring or Summer of the same year. The same term also counts, since transfer and examination
/// credit is often posted in the term the student starts the next course.
pub fn is_immediately_prior(first: AcademicPeriod, second: AcademicPeriod) -> bool {
    if first == second {
        return true;
    }

    let first_year = year_of(first);
    let second_year = year_of(second);
    if second_year - first_year > 1 {
        return false;
    }

    match (part_of(first), part_of(second)) {
        (Some(TermPart::Fall), Some(TermPart::Spring)) => first_year == second_year - 1,
        (Some(TermPart::Spring | TermPart::Summer), Some(TermPart::Fall)) => {
            first_year == second_year
        }
        (Some(TermPart::Spring), Some(TermPart::Summer)) => first_year == second_year,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_term_counts_as_prior() {
        assert!(is_immediately_prior(202410, 202410));
        assert!(is_immediately_prior(202460, 202460));
    }

    #[test]
    fn spring_follows_prior_fall_only() {
        assert!(is_immediately_prior(202390, 202410));
        assert!(!is_immediately_prior(202360, 202410));
        assert!(!is_immediately_prior(202310, 202410));
        assert!(!is_immediately_prior(202290, 202410));
    }

    #[test]
    fn fall_follows_spring_or_summer_of_same_year() {
        assert!(is_immediately_prior(202410, 202490));
        assert!(is_immediately_prior(202460, 202490));
        assert!(!is_immediately_prior(202390, 202490));
        assert!(!is_immediately_prior(202360, 202490));
    }

    #[test]
    fn summer_follows_spring_of_same_year() {
        assert!(is_immediately_prior(202410, 202460));
        assert!(!is_immediately_prior(202390, 202460));
    }

    #[test]
    fn later_first_term_is_never_prior() {
        assert!(!is_immediately_prior(202490, 202410));
        assert!(!is_immediately_prior(202510, 202490));
    }

    #[test]
    fn unrecognized_suffixes_are_never_adjacent() {
        assert!(!is_immediately_prior(202380, 202410));
        assert!(!is_immediately_prior(202390, 202420));
        assert!(!is_recognized(202480));
        assert!(!is_recognized(-202410));
        assert!(is_recognized(202460));
    }

    #[test]
    fn term_names_spell_out_the_part() {
        assert_eq!(term_name(201490), "Fall 2014");
        assert_eq!(term_name(202560), "Summer 2025");
        assert_eq!(term_name(202480), "202480");
    }

    #[test]
    fn dates_map_to_terms() {
        let date = |m, d| NaiveDate::from_ymd_opt(2025, m, d).expect("valid date");
        assert_eq!(term_containing(date(1, 15)), 202510);
        assert_eq!(term_containing(date(5, 31)), 202510);
        assert_eq!(term_containing(date(6, 1)), 202560);
        assert_eq!(term_containing(date(8, 20)), 202590);
        assert_eq!(term_containing(date(12, 31)), 202590);
    }
}
