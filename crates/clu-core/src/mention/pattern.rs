use regex::Regex;

/// What [`MentionOps::matches`](super::MentionOps::matches) tests labels
/// against.
#[derive(Debug, Clone, Copy)]
pub enum LabelPattern<'a> {
    /// Case-sensitive equality with one of the labels.
    Exact(&'a str),
    /// A regex that must match at the very start of some label.
    Regex(&'a Regex),
}

impl LabelPattern<'_> {
    /// `true` if any label satisfies the pattern; stops at the first hit.
    #[must_use]
    pub fn matches_any(&self, labels: &[String]) -> bool {
        match self {
            Self::Exact(label) => labels.iter().any(|l| l == label),
            // Leftmost-first search: if some match begins at 0, the first
            // match found does.
            Self::Regex(re) => labels
                .iter()
                .any(|l| re.find(l).is_some_and(|m| m.start() == 0)),
        }
    }
}

impl<'a> From<&'a str> for LabelPattern<'a> {
    fn from(label: &'a str) -> Self {
        Self::Exact(label)
    }
}

impl<'a> From<&'a String> for LabelPattern<'a> {
    fn from(label: &'a String) -> Self {
        Self::Exact(label.as_str())
    }
}

impl<'a> From<&'a Regex> for LabelPattern<'a> {
    fn from(re: &'a Regex) -> Self {
        Self::Regex(re)
    }
}
