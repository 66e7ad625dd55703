use std::fmt;

/// Facial-expression categories a frame can be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Sad,
    Smile,
    Neutral,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Sad, Category::Smile, Category::Neutral];

    /// Exact, case-sensitive match. Surrounding whitespace is not trimmed.
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == label)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sad => "sad",
            Category::Smile => "smile",
            Category::Neutral => "neutral",
        }
    }

    /// "sad, smile, neutral"
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(Category::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_valid_label(label: &str) -> bool {
    Category::parse(label).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_each_category_name() {
        assert_eq!(Category::parse("sad"), Some(Category::Sad));
        assert_eq!(Category::parse("smile"), Some(Category::Smile));
        assert_eq!(Category::parse("neutral"), Some(Category::Neutral));
    }

    #[test]
    fn matching_is_case_sensitive_and_untrimmed() {
        for label in ["Sad", "SMILE", " neutral", "smile ", "", "bogus", "smiles"] {
            assert!(!is_valid_label(label), "{label:?} should be rejected");
        }
    }

    #[test]
    fn allowed_list_names_every_category() {
        assert_eq!(Category::allowed_list(), "sad, smile, neutral");
    }
}
