//! The search pipeline: translate, execute, normalize, resolve images,
//! assemble the response.
//!
//! Strictly linear with early exits at translation, execution and
//! normalization. The feed fetch is the one stage that degrades instead of
//! failing: an unavailable feed means placeholder images, never a failed
//! search.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::executor::PropertyStore;
use crate::feed::ListingFeed;
use crate::image_resolver::resolve_images;
use crate::normalizer::{normalize_row, Property};
use crate::translator::QueryTranslator;

mod errors;

pub use errors::SearchError;

/// Final response for one search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub sql: String,
    pub results: Vec<Property>,
    pub count: usize,
    pub message: String,
}

/// Sequences the pipeline. All collaborators are explicit construction-time
/// dependencies; there is no process-wide connection state.
pub struct SearchOrchestrator {
    translator: QueryTranslator,
    store: Arc<dyn PropertyStore>,
    feed: Arc<dyn ListingFeed>,
}

impl SearchOrchestrator {
    pub fn new(
        translator: QueryTranslator,
        store: Arc<dyn PropertyStore>,
        feed: Arc<dyn ListingFeed>,
    ) -> Self {
        Self {
            translator,
            store,
            feed,
        }
    }

    pub async fn run(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let sql = self.translator.translate(query).await?;
        let rows = self.store.fetch_rows(&sql).await?;

        let listings = match self.feed.fetch_snapshot().await {
            Ok(listings) => listings,
            Err(e) => {
                log::warn!("Listing feed unavailable, continuing with placeholders: {}", e);
                vec![]
            }
        };

        let mut results = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut property = normalize_row(row)?;
            property.media = resolve_images(&property, &listings);
            results.push(property);
        }

        let count = results.len();
        let message = summary_message(query, count);

        Ok(SearchResponse {
            success: true,
            query: query.to_string(),
            sql,
            results,
            count,
            message,
        })
    }
}

/// Human-readable summary line. Queries that open with "show me " (any
/// casing) read as a continuation; everything else gets the generic form.
fn summary_message(query: &str, count: usize) -> String {
    const PREFIX: &str = "show me ";
    match query.get(..PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(PREFIX) => {
            format!("Showing {} {}", count, &query[PREFIX.len()..])
        }
        _ => format!("Showing {} results for: {}", count, query),
    }
}
