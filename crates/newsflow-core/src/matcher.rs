//! Keyword-taxonomy matching.
//!
//! Matching is case-insensitive whole-word matching, one pre-compiled
//! word-boundary regex per keyword. A unit (headline + description) is split
//! into sentences; per-sentence hits are ordered per category by descending
//! in-sentence frequency with ties broken by first-seen order, then folded
//! into one deduplicated `category:keyword` list for the unit.

use regex::{Regex, RegexBuilder};

use crate::taxonomy::Taxonomy;
use crate::ConfigError;

struct KeywordPattern {
    keyword: String,
    pattern: Regex,
}

struct CategoryMatcher {
    name: String,
    keywords: Vec<KeywordPattern>,
}

/// A taxonomy with its keyword regexes compiled once.
pub struct TaxonomyMatcher {
    categories: Vec<CategoryMatcher>,
}

impl TaxonomyMatcher {
    /// Compile one case-insensitive `\b...\b` regex per taxonomy keyword.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any keyword fails to compile
    /// into a regex (startup-fatal, like any other malformed taxonomy).
    pub fn new(taxonomy: &Taxonomy) -> Result<Self, ConfigError> {
        let mut categories = Vec::new();
        for (name, keywords) in taxonomy.iter() {
            let mut compiled = Vec::with_capacity(keywords.len());
            for kw in keywords {
                let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(kw)))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        ConfigError::Validation(format!(
                            "keyword '{kw}' in category '{name}' is not matchable: {e}"
                        ))
                    })?;
                compiled.push(KeywordPattern {
                    keyword: kw.clone(),
                    pattern,
                });
            }
            categories.push(CategoryMatcher {
                name: name.to_string(),
                keywords: compiled,
            });
        }
        Ok(Self { categories })
    }

    /// Match one sentence, returning `category:keyword` pairs ordered per
    /// category by descending in-sentence frequency (ties keep artifact
    /// order).
    #[must_use]
    pub fn match_sentence(&self, sentence: &str) -> Vec<String> {
        let mut matches = Vec::new();
        for category in &self.categories {
            let mut hits: Vec<(&str, usize)> = category
                .keywords
                .iter()
                .filter_map(|kp| {
                    let count = kp.pattern.find_iter(sentence).count();
                    (count > 0).then_some((kp.keyword.as_str(), count))
                })
                .collect();
            // Stable sort: equal frequencies keep first-seen (artifact) order.
            hits.sort_by(|a, b| b.1.cmp(&a.1));
            for (keyword, _) in hits {
                matches.push(format!("{}:{}", category.name, keyword));
            }
        }
        matches
    }

    /// Match a whole unit at sentence granularity and fold the results.
    ///
    /// The headline and description are joined as `"{headline}. {description}"`,
    /// split on `.`, matched per sentence, and merged into a deduplicated
    /// list that preserves the order pairs were first seen in.
    #[must_use]
    pub fn match_unit(&self, headline: &str, description: &str) -> Vec<String> {
        let text = if description.is_empty() {
            headline.to_string()
        } else {
            format!("{headline}. {description}")
        };

        let mut merged: Vec<String> = Vec::new();
        for sentence in text.split('.') {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }
            for pair in self.match_sentence(sentence) {
                if !merged.contains(&pair) {
                    merged.push(pair);
                }
            }
        }
        merged
    }
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
