use serde::{Deserialize, Serialize};

/// A collection of section-number equivalence groups.
///
/// Registrar data spells the same section several ways ("1", "01", "001", "101"), so each group
/// lists every spelling of one section. The first code in a group is its canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSet {
    groups: Vec<Vec<String>>,
}

impl SectionSet {
    pub fn new<G, S>(groups: G) -> Self
    where
        G: IntoIterator,
        G::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let groups = groups
            .into_iter()
            .map(|group| group.into_iter().map(Into::into).collect::<Vec<String>>())
            .filter(|group| !group.is_empty())
            .collect();
        Self { groups }
    }

    /// Numbered in-person sections 1 through 40.
    pub fn in_person() -> Self {
        let groups = (1..=40u32).map(|number| {
            if number < 10 {
                vec![
                    number.to_string(),
                    format!("{number:02}"),
                    format!("{number:03}"),
                    format!("1{number:02}"),
                ]
            } else {
                vec![
                    number.to_string(),
                    format!("{number:03}"),
                    format!("1{number:02}"),
                ]
            }
        });
        Self::new(groups)
    }

    pub fn online() -> Self {
        Self::new([vec!["401"], vec!["801", "809"]])
    }

    /// In-person sections followed by online sections.
    pub fn all() -> Self {
        let mut set = Self::in_person();
        set.groups.extend(Self::online().groups);
        set
    }

    pub fn special() -> Self {
        Self::new([["003"], ["004"], ["005"], ["006"], ["007"]])
    }

    pub fn contains(&self, section: &str) -> bool {
        self.group_for(section).is_some()
    }

    /// The canonical spelling of `section`, if it belongs to this set.
    pub fn canonical(&self, section: &str) -> Option<&str> {
        self.group_for(section)
            .and_then(|group| group.first())
            .map(String::as_str)
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn group_for(&self, section: &str) -> Option<&Vec<String>> {
        self.groups
            .iter()
            .find(|group| group.iter().any(|code| code == section))
    }
}

/// Named section sets selectable from configuration or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionPreset {
    InPerson,
    Online,
    All,
    Special,
}

impl SectionPreset {
    pub fn sections(self) -> SectionSet {
        match self {
            Self::InPerson => SectionSet::in_person(),
            Self::Online => SectionSet::online(),
            Self::All => SectionSet::all(),
            Self::Special => SectionSet::special(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "in_person" => Some(Self::InPerson),
            "online" => Some(Self::Online),
            "all" => Some(Self::All),
            "special" => Some(Self::Special),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InPerson => "in-person",
            Self::Online => "online",
            Self::All => "all",
            Self::Special => "special",
        }
    }
}
