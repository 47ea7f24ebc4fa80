use std::collections::HashMap;

use crate::error::AppError;
use crate::models::{IpoListing, ListingField};

/// Fetches raw HTML pages of the IPO list.
///
/// Implementations own the HTTP session, so one instance should be used for
/// the whole run.
pub trait PageFetcher {
    /// Request the site's homepage once to pick up session cookies.
    fn warm_up(&self) -> Result<(), AppError>;

    /// Fetch one page (1-based) of the list view.
    fn fetch_page(&self, page: u32, per_page: u32) -> Result<String, AppError>;
}

/// Turns one page of HTML into listings.
///
/// Must be pure: no network or file access, and malformed markup yields
/// fewer listings instead of an error.
pub trait ListingParser {
    fn parse(&self, html: &str) -> Vec<IpoListing>;
}

/// Decides whether a heading's text is an IPO title.
pub trait TitlePredicate {
    fn accepts(&self, title: &str) -> bool;
}

impl<F> TitlePredicate for F
where
    F: Fn(&str) -> bool,
{
    fn accepts(&self, title: &str) -> bool {
        self(title)
    }
}

/// Pulls label-anchored field values out of a card's flattened text.
pub trait FieldExtractor {
    fn extract(&self, text: &str) -> HashMap<ListingField, String>;
}
