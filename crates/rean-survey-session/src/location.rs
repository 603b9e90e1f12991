use std::fmt;

/// Shareable address of a session: a base URL and an optional fragment
/// holding the share token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    base: String,
    fragment: Option<String>,
}

impl Location {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            fragment: None,
        }
    }

    /// Splits `href` at the first `#`. An empty fragment counts as none.
    pub fn parse(href: &str) -> Self {
        match href.split_once('#') {
            Some((base, fragment)) => Self::new(base).with_fragment(fragment),
            None => Self::new(href),
        }
    }

    #[must_use]
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.set_fragment(Some(fragment.into()));
        self
    }

    pub fn set_fragment(&mut self, fragment: Option<String>) {
        self.fragment = fragment
            .map(|f| f.trim().trim_start_matches('#').to_string())
            .filter(|f| !f.is_empty());
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn href(&self) -> String {
        match &self.fragment {
            Some(fragment) => format!("{}#{fragment}", self.base),
            None => self.base.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}
