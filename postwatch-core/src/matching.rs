use crate::types::Post;

/// Keyword filter over post text. Keywords are folded to lowercase once at
/// construction and the set is fixed for the process lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    folded: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let folded = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { folded }
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn len(&self) -> usize {
        self.folded.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.folded
    }

    /// True if any keyword is a substring of the case-folded title or body.
    /// The first hit short-circuits.
    pub fn matches(&self, title: &str, body: &str) -> bool {
        if self.folded.is_empty() {
            return false;
        }
        let title = title.to_lowercase();
        let body = body.to_lowercase();
        self.folded
            .iter()
            .any(|keyword| title.contains(keyword) || body.contains(keyword))
    }

    pub fn matches_post(&self, post: &Post) -> bool {
        self.matches(&post.title, &post.body)
    }
}
