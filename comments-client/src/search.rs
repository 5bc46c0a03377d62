use crate::api::Comment;

/// Case-insensitive substring search on comment bodies
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Search {
    // None when the term is blank, in which case everything matches
    needle: Option<String>,
}

impl Search {
    pub fn new(term: &str) -> Search {
        // A non-blank term is matched as typed, surrounding spaces included.
        // Byte order marks count as blank, as in browsers.
        let blank = term.chars().all(|c| c.is_whitespace() || c == '\u{feff}');
        let needle = match blank {
            true => None,
            false => Some(term.to_lowercase()),
        };
        Search { needle }
    }

    pub fn is_everything(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches(&self, comment: &Comment) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => comment.body.to_lowercase().contains(needle.as_str()),
        }
    }

    /// Order-preserving subsequence of `comments` that match
    pub fn filter(&self, comments: &[Comment]) -> Vec<Comment> {
        comments
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }
}
