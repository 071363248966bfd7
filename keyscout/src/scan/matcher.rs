/// Matches a fixed set of keywords against file contents.
///
/// Matching is plain substring containment: case sensitive, no word
/// boundaries, no pattern syntax. Each keyword is tested independently, so a
/// keyword listed twice in the configuration produces two independent entries.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
}

impl KeywordMatcher {
    /// Creates a new KeywordMatcher for the given keywords
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    /// The keywords this matcher was built with, in configuration order
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Number of keywords this matcher tests per file
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Returns the indices of all keywords contained in `contents`.
    ///
    /// Containment is binary per file: a keyword occurring ten times in the
    /// same text still yields its index once. Indices are returned in
    /// configuration order.
    pub fn find_matches(&self, contents: &str) -> Vec<usize> {
        self.keywords
            .iter()
            .enumerate()
            .filter(|(_, keyword)| contents.contains(keyword.as_str()))
            .map(|(index, _)| index)
            .collect()
    }
}
