//! Paged thread listing driven by the filter state

use crate::services::{ApiOutcome, ForumApi};
use forum_http::types::{Thread, ThreadQuery};
use tracing::debug;

/// Threads loaded so far for the current filters
#[derive(Debug)]
pub struct ThreadFeed {
    api: ForumApi,
    limit: u32,
    author: Option<String>,
    page: u32,
    items: Vec<Thread>,
    has_more: bool,
}

impl ThreadFeed {
    pub fn new(api: ForumApi, limit: u32) -> Self {
        Self {
            api,
            limit: limit.max(1),
            author: None,
            page: 0,
            items: Vec::new(),
            has_more: true,
        }
    }

    /// Only list threads started by `username`
    pub fn by_author(mut self, username: impl Into<String>) -> Self {
        self.author = Some(username.into());
        self
    }

    pub fn items(&self) -> &[Thread] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Last page loaded, 0 before the first load
    pub fn page(&self) -> u32 {
        self.page
    }

    fn query(&self, page: u32) -> ThreadQuery {
        let filters = self.api.store().filters();
        ThreadQuery {
            page,
            limit: self.limit,
            category: filters.category().map(str::to_string),
            search: filters.search().map(str::to_string),
            username: self.author.clone(),
            sort: filters.sort().map(str::to_string),
        }
    }

    /// Load page 1 and replace whatever was loaded
    pub async fn reset(&mut self) -> ApiOutcome<usize> {
        self.items.clear();
        self.page = 0;
        self.has_more = true;
        self.fetch(1).await
    }

    /// Append the next page; does nothing once the last page was short
    pub async fn load_more(&mut self) -> ApiOutcome<usize> {
        if !self.has_more {
            return ApiOutcome::ok("No more threads", 0);
        }
        self.fetch(self.page + 1).await
    }

    async fn fetch(&mut self, page: u32) -> ApiOutcome<usize> {
        let query = self.query(page);
        debug!(?query, "Loading thread page");

        let outcome = self.api.list_threads(&query).await;
        let limit = self.limit as usize;
        outcome.map(|threads| {
            let loaded = threads.len();
            self.has_more = loaded >= limit;
            self.page = page;
            self.items.extend(threads);
            loaded
        })
    }
}
