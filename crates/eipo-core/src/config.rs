//! Site configuration: endpoints, request headers and the vocabulary the
//! parser matches against.
//!
//! [`SiteConfig::default`] targets e-IPO (<https://e-ipo.co.id>) with the
//! Indonesian locale. Labels are matched verbatim, so the `Accept-Language`
//! header and the label vocabulary have to agree.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::ListingField;

/// Configuration shared by the fetcher and the parser.
///
/// Deserializes from a partial JSON document; missing keys keep their
/// default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme + host, no trailing slash.
    pub base_url: String,
    /// Path of the paginated list endpoint.
    pub list_path: String,
    /// Path requested once to pick up session cookies.
    pub home_path: String,

    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,

    pub timeout_secs: u64,
    /// Pause after a successful warm-up request.
    pub warm_up_delay_ms: u64,
    pub per_page: u32,

    /// Heading tag that holds listing titles.
    pub heading_tag: String,
    /// A heading containing this substring is treated as a company title.
    pub title_marker: String,
    /// Ancestor tags accepted as a listing card, nearest wins.
    pub container_tags: Vec<String>,
    /// Lifecycle stage badges, matched exactly.
    pub status_labels: Vec<String>,
    pub sharia_marker: String,
    /// Anchor text of the per-card detail link, matched case-insensitively.
    pub detail_link_text: String,
    pub field_labels: FieldLabels,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://e-ipo.co.id".into(),
            list_path: "/id/ipo/index".into(),
            home_path: "/id".into(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/120.0.0.0 Safari/537.36"
                .into(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,\
                     image/avif,image/webp,*/*;q=0.8"
                .into(),
            accept_language: "id-ID,id;q=0.9,en-US;q=0.8,en;q=0.7".into(),
            timeout_secs: 30,
            warm_up_delay_ms: 500,
            per_page: 12,
            heading_tag: "h3".into(),
            title_marker: "PT ".into(),
            container_tags: ["article", "div", "li", "section"]
                .into_iter()
                .map(String::from)
                .collect(),
            status_labels: [
                "Pre-Effective",
                "Book Building",
                "Waiting For Offering",
                "Offering",
                "Allotment",
                "Closed",
                "Postpone",
                "Canceled",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            sharia_marker: "Syariah".into(),
            detail_link_text: "Info lebih lanjut".into(),
            field_labels: FieldLabels::default(),
        }
    }
}

impl SiteConfig {
    /// Load a JSON config file, filling missing keys from the defaults.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            AppError::ConfigError(format!("Invalid config {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the fetcher or parser cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AppError::ConfigError(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }
        for (name, path) in [("list_path", &self.list_path), ("home_path", &self.home_path)] {
            if !path.starts_with('/') {
                return Err(AppError::ConfigError(format!(
                    "{name} '{path}' must start with '/'"
                )));
            }
        }
        if self.per_page == 0 {
            return Err(AppError::ConfigError("per_page must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "timeout_secs must be at least 1".into(),
            ));
        }
        let required = [
            ("heading_tag", &self.heading_tag),
            ("title_marker", &self.title_marker),
            ("sharia_marker", &self.sharia_marker),
            ("detail_link_text", &self.detail_link_text),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::ConfigError(format!("{name} must not be empty")));
            }
        }
        if self.container_tags.is_empty() {
            return Err(AppError::ConfigError(
                "container_tags must list at least one tag".into(),
            ));
        }
        if let Some((field, _)) = self
            .field_labels
            .entries()
            .into_iter()
            .find(|(_, label)| label.trim().is_empty())
        {
            return Err(AppError::ConfigError(format!(
                "label for {field:?} must not be empty"
            )));
        }
        Ok(())
    }

    /// `base_url` without any trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn list_url(&self) -> String {
        format!("{}{}", self.base(), self.list_path)
    }

    pub fn home_url(&self) -> String {
        format!("{}{}", self.base(), self.home_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn warm_up_delay(&self) -> Duration {
        Duration::from_millis(self.warm_up_delay_ms)
    }
}

/// Card labels (Indonesian) that introduce each field's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLabels {
    pub sector: String,
    pub listing_date: String,
    pub final_price: String,
    pub shares_offered: String,
    pub bookbuilding_period: String,
    pub bookbuilding_price_range: String,
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self {
            sector: "Sektor".into(),
            listing_date: "Tanggal Pencatatan".into(),
            final_price: "Harga Final".into(),
            shares_offered: "Saham Ditawarkan".into(),
            bookbuilding_period: "Periode Book Building".into(),
            bookbuilding_price_range: "Rentang Harga Book Building".into(),
        }
    }
}

impl FieldLabels {
    pub fn entries(&self) -> [(ListingField, &str); 6] {
        [
            (ListingField::Sector, self.sector.as_str()),
            (ListingField::ListingDate, self.listing_date.as_str()),
            (ListingField::FinalPrice, self.final_price.as_str()),
            (ListingField::SharesOffered, self.shares_offered.as_str()),
            (ListingField::BookbuildingPeriod, self.bookbuilding_period.as_str()),
            (
                ListingField::BookbuildingPriceRange,
                self.bookbuilding_price_range.as_str(),
            ),
        ]
    }
}
