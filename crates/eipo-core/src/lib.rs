pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod scrape;
pub mod traits;

#[cfg(test)]
mod testutil;

pub use config::{FieldLabels, SiteConfig};
pub use error::AppError;
pub use export::{write_csv, write_json};
pub use models::{IpoListing, ListingField, ListingKey, dedup_listings};
pub use scrape::ScrapeService;
pub use traits::{FieldExtractor, ListingParser, PageFetcher, TitlePredicate};
