/// Current course numbers paired with the numbers the same course carried before renumbering.
const RENUMBERED_COURSES: [(&str, &str); 4] = [
    ("MATH157", "MATH180A3"),
    ("MATH159", "MATH180A4"),
    ("MATH156", "MATH180A5"),
    ("MATH116", "MATH181A1"),
];

/// Tests whether a record's course satisfies a request for `target`.
///
/// A candidate matches when it is the same course, or when it is the legacy number of a course
/// that has since been renumbered to `target`. The lookup is directional: asking for a legacy
/// number does not match records carrying the current number.
pub fn courses_match(target: &str, candidate: &str) -> bool {
    target == candidate
        || RENUMBERED_COURSES
            .iter()
            .any(|(current, legacy)| *current == target && *legacy == candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_courses_match() {
        assert!(courses_match("MATH160", "MATH160"));
        assert!(!courses_match("MATH160", "MATH161"));
    }

    #[test]
    fn legacy_numbers_match_their_replacements() {
        assert!(courses_match("MATH157", "MATH180A3"));
        assert!(courses_match("MATH159", "MATH180A4"));
        assert!(courses_match("MATH156", "MATH180A5"));
        assert!(courses_match("MATH116", "MATH181A1"));
        assert!(!courses_match("MATH157", "MATH180A4"));
    }

    #[test]
    fn renumbered_courses_are_reflexive_in_both_numbering_schemes() {
        for (current, legacy) in RENUMBERED_COURSES {
            assert!(courses_match(current, current));
            assert!(courses_match(legacy, legacy));
        }
    }

    #[test]
    fn lookup_is_directional() {
        assert!(!courses_match("MATH180A3", "MATH157"));
    }
}
