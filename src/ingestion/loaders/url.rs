//! Web page loader

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

use super::DocumentLoader;
use crate::error::{Error, Result};
use crate::types::{DocumentRecord, SourceType};

/// Fetches a page and extracts its readable paragraphs
pub struct UrlLoader {
    client: reqwest::Client,
}

impl UrlLoader {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("knowledge-rag/0.1")
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Parse a fetched page into (title, paragraphs).
    ///
    /// Pages without `<p>` elements fall back to top-level `<div>` text
    /// so content-bearing but unstructured pages still load.
    fn parse_page(html: &str, url: &str) -> (String, Vec<String>) {
        let document = Html::parse_document(html);

        let title = Selector::parse("title")
            .ok()
            .and_then(|sel| document.select(&sel).next())
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| url.to_string());

        let mut paragraphs = Self::collect_text(&document, "p");
        if paragraphs.is_empty() {
            debug!("no <p> content in {url}, falling back to <div> text");
            paragraphs = Self::collect_text(&document, "div");
        }

        (title, paragraphs)
    }

    fn collect_text(document: &Html, selector: &str) -> Vec<String> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        document
            .select(&sel)
            .map(|el| {
                el.text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl Default for UrlLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentLoader for UrlLoader {
    async fn load(&self, input: &str) -> Result<Vec<DocumentRecord>> {
        let response = self
            .client
            .get(input)
            .send()
            .await
            .map_err(|e| Error::fetch(input, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::fetch(
                input,
                format!("status {}", response.status()),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Error::fetch(input, e.to_string()))?;

        let (title, paragraphs) = Self::parse_page(&html, input);
        Ok(paragraphs
            .into_iter()
            .enumerate()
            .map(|(i, p)| DocumentRecord::new(&p, input, &title, SourceType::Url, i as i64))
            .collect())
    }

    fn name(&self) -> &str {
        "url"
    }
}
