//! OSC 8 hyperlink value carried by a cell.

/// A hyperlink attached to a run of cells.
///
/// The zero value (`Link::default()`) means "no hyperlink active". A link
/// with a non-empty URL owns its string directly — there is no interning
/// or reference counting; cells that share a link simply clone it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Link {
    pub url: String,
    pub params: String,
}

impl Link {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: String::new(),
        }
    }

    #[must_use]
    pub fn with_params(url: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: params.into(),
        }
    }

    /// True if this is the zero link (no hyperlink active).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(Link::default().is_empty());
    }

    #[test]
    fn non_empty_url_is_not_empty() {
        assert!(!Link::new("https://example.com").is_empty());
    }
}
