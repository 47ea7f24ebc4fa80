use std::collections::HashSet;

use eipo_core::config::SiteConfig;
use eipo_core::error::AppError;
use eipo_core::models::{IpoListing, ListingField, dedup_listings};
use eipo_core::traits::{FieldExtractor, ListingParser, TitlePredicate};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::heuristics::{LabelSplitExtractor, MarkerTitlePredicate, normalize_ws, split_title};

/// Parser for the e-IPO list view.
///
/// Finds title headings, walks each up to its card container and reads the
/// card's fields with text heuristics. The title test and the label/value
/// extraction are pluggable via [`TitlePredicate`] and [`FieldExtractor`].
pub struct HtmlListingParser<P = MarkerTitlePredicate, X = LabelSplitExtractor> {
    headings: Selector,
    anchors: Selector,
    container_tags: Vec<String>,
    status_labels: HashSet<String>,
    sharia_marker: String,
    detail_link_text: String,
    base: Url,
    predicate: P,
    extractor: X,
}

impl HtmlListingParser {
    /// Build the default parser from site configuration.
    pub fn new(config: &SiteConfig) -> Result<Self, AppError> {
        let predicate = MarkerTitlePredicate::new(config.title_marker.clone());
        let extractor = LabelSplitExtractor::new(&config.field_labels)?;
        Self::with_parts(config, predicate, extractor)
    }
}

impl<P, X> HtmlListingParser<P, X>
where
    P: TitlePredicate,
    X: FieldExtractor,
{
    pub fn with_parts(config: &SiteConfig, predicate: P, extractor: X) -> Result<Self, AppError> {
        let headings = Selector::parse(&config.heading_tag).map_err(|e| {
            AppError::ConfigError(format!("Invalid heading_tag '{}': {e}", config.heading_tag))
        })?;
        let anchors = Selector::parse("a[href]")
            .map_err(|e| AppError::ConfigError(format!("Invalid anchor selector: {e}")))?;
        let base = Url::parse(config.base())
            .map_err(|e| AppError::ConfigError(format!("Invalid base_url: {e}")))?;

        Ok(Self {
            headings,
            anchors,
            container_tags: config
                .container_tags
                .iter()
                .map(|t| t.to_ascii_lowercase())
                .collect(),
            status_labels: config.status_labels.iter().cloned().collect(),
            sharia_marker: config.sharia_marker.clone(),
            detail_link_text: config.detail_link_text.to_lowercase(),
            base,
            predicate,
            extractor,
        })
    }

    /// Swap the heading test, keeping everything else.
    pub fn with_predicate<Q: TitlePredicate>(self, predicate: Q) -> HtmlListingParser<Q, X> {
        HtmlListingParser {
            headings: self.headings,
            anchors: self.anchors,
            container_tags: self.container_tags,
            status_labels: self.status_labels,
            sharia_marker: self.sharia_marker,
            detail_link_text: self.detail_link_text,
            base: self.base,
            predicate,
            extractor: self.extractor,
        }
    }

    /// Nearest ancestor whose tag is one of the container tags.
    fn find_card<'a>(&self, heading: ElementRef<'a>) -> Option<ElementRef<'a>> {
        heading
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| self.container_tags.iter().any(|t| t == el.value().name()))
    }

    fn parse_card(&self, title: &str, card: ElementRef<'_>) -> IpoListing {
        let (company_name, ticker) = split_title(title);
        let fragments = stripped_strings(card);

        let status = fragments
            .iter()
            .find(|s| self.status_labels.contains(s.as_str()))
            .cloned();
        let sharia = fragments.iter().any(|s| *s == self.sharia_marker);

        let mut fields = self.extractor.extract(&joined_text(card));

        IpoListing {
            company_name,
            ticker,
            status,
            sector: fields.remove(&ListingField::Sector),
            sharia,
            listing_date: fields.remove(&ListingField::ListingDate),
            bookbuilding_period: fields.remove(&ListingField::BookbuildingPeriod),
            final_price: fields.remove(&ListingField::FinalPrice),
            bookbuilding_price_range: fields.remove(&ListingField::BookbuildingPriceRange),
            shares_offered_lot: fields.remove(&ListingField::SharesOffered),
            detail_url: self.detail_url(card),
        }
    }

    /// Absolute URL of the card's "more info" link.
    fn detail_url(&self, card: ElementRef<'_>) -> Option<String> {
        let anchor = card.select(&self.anchors).find(|a| {
            joined_text(*a)
                .to_lowercase()
                .contains(&self.detail_link_text)
        })?;
        let href = anchor.value().attr("href")?.trim();
        if href.is_empty() {
            return None;
        }
        if href.starts_with("http") {
            return Some(href.to_string());
        }
        self.base.join(href).ok().map(String::from)
    }
}

impl<P, X> ListingParser for HtmlListingParser<P, X>
where
    P: TitlePredicate,
    X: FieldExtractor,
{
    fn parse(&self, html: &str) -> Vec<IpoListing> {
        let document = Html::parse_document(html);
        let mut listings = Vec::new();

        for heading in document.select(&self.headings) {
            let title = joined_text(heading);
            if !self.predicate.accepts(&title) {
                continue;
            }
            let Some(card) = self.find_card(heading) else {
                tracing::debug!(title = %title, "No card container for heading, skipping");
                continue;
            };
            listings.push(self.parse_card(&title, card));
        }

        // Nested containers can surface the same card twice.
        dedup_listings(listings)
    }
}

/// Every non-empty text node under `el`, whitespace-normalized.
fn stripped_strings(el: ElementRef<'_>) -> Vec<String> {
    el.text()
        .map(normalize_ws)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Visible text of `el` with text nodes joined by single spaces.
fn joined_text(el: ElementRef<'_>) -> String {
    stripped_strings(el).join(" ")
}
