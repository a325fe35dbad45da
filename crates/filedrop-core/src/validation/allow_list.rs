use crate::constants::{DEFAULT_ALLOWED_FILE_TYPES, UNKNOWN_CATEGORY};

/// One category and the extensions that belong to it (lowercase, no leading dot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub name: String,
    pub extensions: Vec<String>,
}

impl CategoryRule {
    pub fn new<I, S>(name: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    fn contains(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }
}

/// Ordered mapping from category name to allowed extensions.
///
/// Categories are scanned in insertion order, so when an extension is listed under
/// more than one category the first one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    categories: Vec<CategoryRule>,
}

impl AllowList {
    pub fn new(categories: Vec<CategoryRule>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[CategoryRule] {
        &self.categories
    }

    /// Category for an already-lowercased extension, or `"unknown"`.
    pub fn classify(&self, extension: &str) -> &str {
        self.categories
            .iter()
            .find(|rule| rule.contains(extension))
            .map(|rule| rule.name.as_str())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    /// Whether a client-supplied filename carries an allowed extension.
    pub fn is_allowed(&self, filename: &str) -> bool {
        match extension_of(filename) {
            Some(extension) => self.categories.iter().any(|rule| rule.contains(&extension)),
            None => false,
        }
    }

    /// Every allowed extension across all categories, in configured order.
    pub fn all_extensions(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|rule| rule.extensions.iter().map(String::as_str))
    }

    /// Client-facing rejection message listing every supported extension.
    pub fn rejection_message(&self) -> String {
        format!(
            "File type not allowed. Supported types: {}",
            self.all_extensions().collect::<Vec<_>>().join(", ")
        )
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_FILE_TYPES
                .iter()
                .map(|(name, extensions)| CategoryRule::new(*name, extensions.iter()))
                .collect(),
        )
    }
}

/// Lowercased text after the last `.`; `None` when the filename is empty or has no dot.
///
/// Only the final segment counts: `archive.tar.gz` yields `gz`.
pub fn extension_of(filename: &str) -> Option<String> {
    if filename.is_empty() {
        return None;
    }
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
}
