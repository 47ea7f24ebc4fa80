use std::time::Duration;

use crate::error::AppError;
use crate::models::{IpoListing, dedup_listings};
use crate::traits::{ListingParser, PageFetcher};

/// Default page size of the e-IPO list view.
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Drives the pagination loop: fetch → parse → accumulate → dedup.
///
/// Generic over the fetcher and parser so tests can run it without HTTP.
pub struct ScrapeService<F, P>
where
    F: PageFetcher,
    P: ListingParser,
{
    fetcher: F,
    parser: P,
    per_page: u32,
}

impl<F, P> ScrapeService<F, P>
where
    F: PageFetcher,
    P: ListingParser,
{
    pub fn new(fetcher: F, parser: P) -> Self {
        Self {
            fetcher,
            parser,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Issue the fetcher's warm-up request. Failure is fatal for the run.
    pub fn warm_up(&self) -> Result<(), AppError> {
        tracing::info!("Warming up session");
        self.fetcher.warm_up()
    }

    /// Fetch pages 1..=`max_pages` until one parses to zero listings.
    ///
    /// Sleeps `delay` between page requests. The first fetch error aborts the
    /// run and drops everything collected so far.
    pub fn scrape_all(&self, max_pages: u32, delay: Duration) -> Result<Vec<IpoListing>, AppError> {
        let mut all = Vec::new();
        let mut exhausted = false;

        for page in 1..=max_pages {
            let html = self.fetcher.fetch_page(page, self.per_page)?;
            let listings = self.parser.parse(&html);
            tracing::info!(page, bytes = html.len(), items = listings.len(), "Parsed page");

            if listings.is_empty() {
                exhausted = true;
                break;
            }
            all.extend(listings);

            if page < max_pages && !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }

        if !exhausted {
            tracing::warn!(max_pages, "Stopped at page ceiling before pagination ran out");
        }

        // Adjacent pages can repeat records under some sort orders.
        let total = all.len();
        let unique = dedup_listings(all);
        tracing::info!(total, unique = unique.len(), "Scrape complete");
        Ok(unique)
    }
}
