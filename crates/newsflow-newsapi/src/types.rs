use serde::Deserialize;

/// Envelope returned by `/v2/everything`.
#[derive(Debug, Deserialize)]
pub(crate) struct EverythingResponse {
    pub status: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "totalResults")]
    pub total_results: Option<i64>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// One article as returned by NewsAPI.
///
/// Title, description, and url are all nullable on the wire; callers decide
/// whether an incomplete article is usable.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<ArticleSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub name: Option<String>,
}

impl Article {
    /// Source name, or `"unknown"` when the feed omitted it.
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("unknown")
    }
}
