//! The category→keyword taxonomy artifact.
//!
//! Loaded once at process start from a JSON file shaped as
//! `{"category": ["keyword", ...], ...}`. A missing or malformed artifact is
//! a startup-fatal condition, deliberately distinct from a text that simply
//! matches nothing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// A validated keyword taxonomy.
///
/// Categories are held in sorted order so matching output is deterministic;
/// keyword order within a category is preserved from the artifact and used
/// as the first-seen tie-break during matching.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct TaxonomyFile {
    categories: BTreeMap<String, Vec<String>>,
}

impl Taxonomy {
    /// Build a taxonomy from in-memory entries. Used by tests and by
    /// [`load_taxonomy`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for empty category names or
    /// empty/blank keywords.
    pub fn new<I, K>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, K)>,
        K: IntoIterator<Item = String>,
    {
        let mut categories = Vec::new();
        for (category, keywords) in entries {
            if category.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "category name must be non-empty".to_string(),
                ));
            }
            let keywords: Vec<String> = keywords.into_iter().collect();
            for kw in &keywords {
                if kw.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "category '{category}' contains an empty keyword"
                    )));
                }
            }
            categories.push((category, keywords));
        }
        categories.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(Self { categories })
    }

    /// Iterate `(category, keywords)` pairs in sorted category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(c, kws)| (c.as_str(), kws.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|(_, kws)| kws.len()).sum()
    }
}

/// Load and validate the taxonomy from a JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TaxonomyIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: TaxonomyFile = serde_json::from_str(&content)?;

    Taxonomy::new(file.categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_keyword_map() {
        let file: TaxonomyFile =
            serde_json::from_str(r#"{"crypto": ["bitcoin", "ethereum"], "tech": ["ai"]}"#)
                .expect("should parse");
        let taxonomy = Taxonomy::new(file.categories).expect("should validate");
        assert_eq!(taxonomy.keyword_count(), 3);
        let cats: Vec<&str> = taxonomy.iter().map(|(c, _)| c).collect();
        assert_eq!(cats, vec!["crypto", "tech"]);
    }

    #[test]
    fn rejects_non_object_artifact() {
        let result = serde_json::from_str::<TaxonomyFile>(r#"["bitcoin"]"#);
        assert!(result.is_err(), "a JSON array is not a valid taxonomy");
    }

    #[test]
    fn rejects_empty_keyword() {
        let file: TaxonomyFile =
            serde_json::from_str(r#"{"crypto": ["bitcoin", "  "]}"#).expect("should parse");
        let result = Taxonomy::new(file.categories);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_taxonomy(Path::new("/nonexistent/taxonomy.json"));
        assert!(matches!(result, Err(ConfigError::TaxonomyIo { .. })));
    }
}
