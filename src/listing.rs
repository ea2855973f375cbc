//! Listing request handling.
//!
//! Ties the pipeline together: resolve the content type, serve a cached
//! fragment when one is fresh, otherwise fetch, render and cache. Every
//! outcome is an HTML fragment; failures degrade to a fixed message and are
//! never cached.

use futures::future;
use std::time::Duration;

use crate::cache::{cache_key, CacheStore};
use crate::config::Config;
use crate::constants::html;
use crate::error::Result;
use crate::planning_center::ListingFetcher;
use crate::render::{render_items, RenderOptions};
use crate::types::{ContentType, ListingRequest};

/// Renders `Planning Center` listings through a fragment cache.
pub struct ListingService<F, S> {
    fetcher: F,
    store: S,
    options: RenderOptions,
    ttl: Duration,
}

impl<F: ListingFetcher, S: CacheStore> ListingService<F, S> {
    /// Create a service with explicit render options and cache lifetime.
    pub fn new(fetcher: F, store: S, options: RenderOptions, ttl: Duration) -> Self {
        Self { fetcher, store, options, ttl }
    }

    /// Create a service using the presentation and cache settings from config.
    pub fn from_config(fetcher: F, store: S, config: &Config) -> Self {
        Self::new(fetcher, store, RenderOptions::from_config(config), config.cache_ttl)
    }

    /// The backing cache store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Render the listing for a request.
    pub async fn render(&self, request: &ListingRequest) -> String {
        let Some(content_type) = request.content_type() else {
            tracing::debug!("Unsupported content type {:?}", request.keyword);
            return html::UNSUPPORTED_TYPE.to_string();
        };

        let key = cache_key(&request.keyword, request.limit);
        if let Some(cached) = self.store.get(&key) {
            tracing::debug!("Cache hit for {} (limit {})", content_type, request.limit);
            return cached;
        }
        tracing::debug!("Cache miss for {} (limit {})", content_type, request.limit);

        let endpoint = self.fetcher.endpoint(content_type);
        let items = match self.fetcher.fetch_listing(&endpoint, request.limit).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Failed to load {} listing: {}", content_type, e);
                return html::LOAD_FAILED.to_string();
            }
        };

        let output = render_items(content_type, &items, &self.options);
        if let Err(e) = self.store.set(&key, &output, self.ttl) {
            tracing::warn!("Failed to cache {} listing: {}", content_type, e);
        }

        output
    }

    /// Render the listing for a fixed content type.
    pub async fn render_type(&self, content_type: ContentType, limit: u32) -> String {
        self.render(&ListingRequest::for_type(content_type, limit)).await
    }

    /// Render every content type concurrently, in display order.
    pub async fn render_all(&self, limit: u32) -> Vec<(ContentType, String)> {
        let renders = ContentType::all()
            .iter()
            .map(|t| self.render_type(*t, limit));
        let outputs = future::join_all(renders).await;

        ContentType::all().iter().copied().zip(outputs).collect()
    }

    /// Drop the cached fragment for a request so the next render refetches.
    pub fn invalidate(&self, request: &ListingRequest) -> Result<()> {
        self.store.remove(&cache_key(&request.keyword, request.limit))
    }
}
