//! NewsAPI-backed source adapter.

use chrono::Utc;

use newsflow_newsapi::{Article, NewsApiClient};
use newsflow_pipeline::{RawUnit, SourceAdapter, SourceBatch, SourceDescriptor, SourceError};

pub struct NewsApiSource {
    client: NewsApiClient,
    descriptor: SourceDescriptor,
    query: String,
    from: Option<String>,
}

impl NewsApiSource {
    pub fn new(
        client: NewsApiClient,
        descriptor: SourceDescriptor,
        query: String,
        from: Option<String>,
    ) -> Self {
        Self {
            client,
            descriptor,
            query,
            from,
        }
    }
}

impl SourceAdapter for NewsApiSource {
    fn descriptor(&self) -> SourceDescriptor {
        self.descriptor.clone()
    }

    fn fetch(&self) -> impl std::future::Future<Output = Result<SourceBatch, SourceError>> + Send {
        async move {
            let articles = self
                .client
                .everything(&self.query, self.from.as_deref())
                .await
                .map_err(|e| SourceError(e.to_string()))?;

            let mut units = Vec::with_capacity(articles.len());
            let mut skipped = 0usize;
            for article in &articles {
                match to_unit(article) {
                    Some(unit) => units.push(unit),
                    None => skipped += 1,
                }
            }
            if skipped > 0 {
                tracing::warn!(
                    source = %self.descriptor.name,
                    skipped,
                    "incomplete articles skipped"
                );
            }

            Ok(SourceBatch { units })
        }
    }
}

/// An article missing its title, description, or url cannot be fingerprinted
/// or matched, so it never enters the pipeline.
fn to_unit(article: &Article) -> Option<RawUnit> {
    let headline = article.title.as_deref().filter(|t| !t.trim().is_empty())?;
    let description = article
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())?;
    let origin = article.url.as_deref().filter(|u| !u.trim().is_empty())?;

    Some(RawUnit {
        headline: headline.to_string(),
        description: description.to_string(),
        origin: origin.to_string(),
        source_name: article.source_name().to_string(),
        published_at: article.published_at.clone(),
        captured_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(value: serde_json::Value) -> Article {
        serde_json::from_value(value).expect("article fixture should parse")
    }

    #[test]
    fn complete_article_becomes_a_unit() {
        let article = article(serde_json::json!({
            "title": "Bitcoin rises",
            "description": "Markets react",
            "url": "https://example.com/a",
            "publishedAt": "2026-08-01T09:30:00Z",
            "source": { "name": "Example Times" }
        }));

        let unit = to_unit(&article).expect("complete article should convert");
        assert_eq!(unit.headline, "Bitcoin rises");
        assert_eq!(unit.origin, "https://example.com/a");
        assert_eq!(unit.source_name, "Example Times");
        assert_eq!(unit.published_at.as_deref(), Some("2026-08-01T09:30:00Z"));
    }

    #[test]
    fn missing_description_is_skipped() {
        let article = article(serde_json::json!({
            "title": "Bitcoin rises",
            "description": null,
            "url": "https://example.com/a"
        }));
        assert!(to_unit(&article).is_none());
    }

    #[test]
    fn blank_title_is_skipped() {
        let article = article(serde_json::json!({
            "title": "   ",
            "description": "Something happened",
            "url": "https://example.com/a"
        }));
        assert!(to_unit(&article).is_none());
    }

    #[test]
    fn missing_source_falls_back_to_unknown() {
        let article = article(serde_json::json!({
            "title": "Bitcoin rises",
            "description": "Markets react",
            "url": "https://example.com/a"
        }));
        let unit = to_unit(&article).expect("should convert");
        assert_eq!(unit.source_name, "unknown");
    }
}
