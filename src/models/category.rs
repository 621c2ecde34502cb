use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fixed set of spending/income categories.
///
/// The declaration order here is the canonical ordering used wherever
/// deterministic iteration matters (category totals, alerts, tie-breaks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Transport,
    Housing,
    Entertainment,
    Shopping,
    Utilities,
    Health,
    Education,
    Salary,
    Freelance,
    Investment,
    Other,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Housing,
            Self::Entertainment,
            Self::Shopping,
            Self::Utilities,
            Self::Health,
            Self::Education,
            Self::Salary,
            Self::Freelance,
            Self::Investment,
            Self::Other,
        ]
    }

    /// Case-insensitive parse. Unknown names map to `Other` so a ledger
    /// written by a newer version still loads.
    pub fn parse(s: &str) -> Category {
        match s.trim().to_lowercase().as_str() {
            "food" => Self::Food,
            "transport" => Self::Transport,
            "housing" => Self::Housing,
            "entertainment" => Self::Entertainment,
            "shopping" => Self::Shopping,
            "utilities" => Self::Utilities,
            "health" => Self::Health,
            "education" => Self::Education,
            "salary" => Self::Salary,
            "freelance" => Self::Freelance,
            "investment" => Self::Investment,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Housing => "Housing",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Utilities => "Utilities",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investment => "Investment",
            Self::Other => "Other",
        }
    }

    /// Position in the canonical ordering.
    pub(crate) fn rank(&self) -> usize {
        Self::all().iter().position(|c| c == self).unwrap_or(usize::MAX)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Category::parse(&s))
    }
}
