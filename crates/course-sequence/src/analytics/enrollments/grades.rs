/// Final grades that mark a non-graded component, an audit, a graduate transfer, or a pending
/// incomplete. Records carrying them are left out of the corpus.
const NOT_GRADED: [&str; 6] = ["NG", "NGC", "AU", "TR", "I", "XI"];

/// What a registrar letter grade means for an enrollment record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LetterGrade {
    Value(f64),
    Withdrawn,
    NotGraded,
    Unrecognized,
}

impl LetterGrade {
    /// Interprets a final grade. `T`, `R`, and `X` prefixes mark transfer, repeat, and exam
    /// variants of the same letter.
    pub fn parse(grade: &str) -> Self {
        let grade = grade.trim();
        if NOT_GRADED.contains(&grade) {
            return Self::NotGraded;
        }
        if grade == "W" {
            return Self::Withdrawn;
        }

        if let Some(value) = base_value(grade) {
            return Self::Value(value);
        }

        match grade.strip_prefix(['T', 'R', 'X']).and_then(base_value) {
            Some(value) => Self::Value(value),
            None => Self::Unrecognized,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(value),
            Self::Withdrawn | Self::NotGraded | Self::Unrecognized => None,
        }
    }
}

fn base_value(letter: &str) -> Option<f64> {
    let value = match letter {
        "A+" | "A" => 4.0,
        "A-" => 3.667,
        "B+" => 3.333,
        "B" => 3.0,
        "B-" => 2.667,
        "C+" => 2.333,
        "C" => 2.0,
        "C-" => 1.667,
        "D+" => 1.333,
        "D" => 1.0,
        "D-" => 0.667,
        "F" | "U" => 0.0,
        "S" => 2.5,
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_letters_follow_the_four_point_scale() {
        assert_eq!(LetterGrade::parse("A"), LetterGrade::Value(4.0));
        assert_eq!(LetterGrade::parse("A+"), LetterGrade::Value(4.0));
        assert_eq!(LetterGrade::parse("B-"), LetterGrade::Value(2.667));
        assert_eq!(LetterGrade::parse("D+"), LetterGrade::Value(1.333));
        assert_eq!(LetterGrade::parse("U"), LetterGrade::Value(0.0));
        assert_eq!(LetterGrade::parse("S"), LetterGrade::Value(2.5));
    }

    #[test]
    fn prefixed_variants_share_the_base_value() {
        assert_eq!(LetterGrade::parse("TB+"), LetterGrade::Value(3.333));
        assert_eq!(LetterGrade::parse("RC"), LetterGrade::Value(2.0));
        assert_eq!(LetterGrade::parse("XA-"), LetterGrade::Value(3.667));
        assert_eq!(LetterGrade::parse(" TF "), LetterGrade::Value(0.0));
    }

    #[test]
    fn special_marks_are_not_values() {
        assert_eq!(LetterGrade::parse("W"), LetterGrade::Withdrawn);
        for grade in ["NG", "NGC", "AU", "TR", "I", "XI"] {
            assert_eq!(LetterGrade::parse(grade), LetterGrade::NotGraded, "{grade}");
        }
        assert_eq!(LetterGrade::parse("Q"), LetterGrade::Unrecognized);
        assert_eq!(LetterGrade::parse("TZ"), LetterGrade::Unrecognized);
        assert!(LetterGrade::parse("W").value().is_none());
    }
}
