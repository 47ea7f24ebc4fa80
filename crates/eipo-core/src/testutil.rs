//! Test utilities: mock implementations of the fetch/parse seams.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! State lives behind `Arc<Mutex<_>>` so clones share recorded calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::IpoListing;
use crate::traits::{ListingParser, PageFetcher};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that serves queued page bodies in order.
#[derive(Clone)]
pub struct MockFetcher {
    /// Each `fetch_page` pops the first element. When empty, returns `""`.
    pages: Arc<Mutex<Vec<Result<String, AppError>>>>,
    warm_up_error: Arc<Mutex<Option<AppError>>>,
    requests: Arc<Mutex<Vec<(u32, u32)>>>,
    warm_ups: Arc<Mutex<usize>>,
}

impl MockFetcher {
    pub fn with_pages(pages: Vec<Result<String, AppError>>) -> Self {
        Self {
            pages: Arc::new(Mutex::new(pages)),
            warm_up_error: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
            warm_ups: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_warm_up_error(self, error: AppError) -> Self {
        *self.warm_up_error.lock().unwrap() = Some(error);
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests.lock().unwrap().iter().map(|(p, _)| *p).collect()
    }

    pub fn per_page_seen(&self) -> Vec<u32> {
        self.requests.lock().unwrap().iter().map(|(_, n)| *n).collect()
    }

    pub fn warm_up_calls(&self) -> usize {
        *self.warm_ups.lock().unwrap()
    }
}

impl PageFetcher for MockFetcher {
    fn warm_up(&self) -> Result<(), AppError> {
        *self.warm_ups.lock().unwrap() += 1;
        match self.warm_up_error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fetch_page(&self, page: u32, per_page: u32) -> Result<String, AppError> {
        self.requests.lock().unwrap().push((page, per_page));
        let mut pages = self.pages.lock().unwrap();
        if pages.is_empty() {
            Ok(String::new())
        } else {
            pages.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockParser
// ---------------------------------------------------------------------------

/// Mock parser that maps exact page bodies to canned listings.
/// Unknown bodies parse to nothing.
#[derive(Clone, Default)]
pub struct MockParser {
    pages: HashMap<String, Vec<IpoListing>>,
}

impl MockParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, html: &str, listings: Vec<IpoListing>) -> Self {
        self.pages.insert(html.to_string(), listings);
        self
    }
}

impl ListingParser for MockParser {
    fn parse(&self, html: &str) -> Vec<IpoListing> {
        self.pages.get(html).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn make_listing(name: &str, ticker: &str) -> IpoListing {
    IpoListing {
        ticker: Some(ticker.to_string()),
        status: Some("Closed".into()),
        sector: Some("Financials".into()),
        detail_url: Some(format!(
            "https://e-ipo.co.id/id/ipo/{}",
            ticker.to_lowercase()
        )),
        ..IpoListing::new(name)
    }
}
