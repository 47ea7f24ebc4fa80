use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One IPO announcement as shown on the e-IPO list view.
///
/// Everything except `company_name` is best-effort: the card markup varies
/// by lifecycle stage, so missing fields are `None` rather than empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpoListing {
    pub company_name: String,
    pub ticker: Option<String>,
    pub status: Option<String>,
    pub sector: Option<String>,
    pub sharia: bool,
    /// "17 Dec 2025" style (site format)
    pub listing_date: Option<String>,
    /// "09 Dec 2020 - 17 Dec 2020" style
    pub bookbuilding_period: Option<String>,
    /// "Rp 635" style
    pub final_price: Option<String>,
    /// "Rp 298 - Rp 328" style
    pub bookbuilding_price_range: Option<String>,
    /// "44.066.123 Lot" style
    pub shares_offered_lot: Option<String>,
    pub detail_url: Option<String>,
}

impl IpoListing {
    /// Serialized field names, in column order.
    pub const FIELD_NAMES: [&'static str; 11] = [
        "company_name",
        "ticker",
        "status",
        "sector",
        "sharia",
        "listing_date",
        "bookbuilding_period",
        "final_price",
        "bookbuilding_price_range",
        "shares_offered_lot",
        "detail_url",
    ];

    /// A listing with only a company name; every optional field is absent.
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            ticker: None,
            status: None,
            sector: None,
            sharia: false,
            listing_date: None,
            bookbuilding_period: None,
            final_price: None,
            bookbuilding_price_range: None,
            shares_offered_lot: None,
            detail_url: None,
        }
    }

    pub fn key(&self) -> ListingKey {
        ListingKey {
            company_name: self.company_name.clone(),
            ticker: self.ticker.clone(),
            detail_url: self.detail_url.clone(),
        }
    }
}

/// Identity of a listing for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingKey {
    pub company_name: String,
    pub ticker: Option<String>,
    pub detail_url: Option<String>,
}

/// Label-anchored fields found in a card's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingField {
    Sector,
    ListingDate,
    FinalPrice,
    SharesOffered,
    BookbuildingPeriod,
    BookbuildingPriceRange,
}

/// Drop listings whose key was already seen, keeping the first occurrence
/// and the original order.
pub fn dedup_listings(listings: impl IntoIterator<Item = IpoListing>) -> Vec<IpoListing> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .filter(|listing| seen.insert(listing.key()))
        .collect()
}
