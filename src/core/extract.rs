use crate::core::{ListingOutcome, ListingRecord, ScrapeBatch};
use crate::utils::error::{Result, ScraperError};
use scraper::{ElementRef, Html, Selector};

pub const LISTING_SELECTOR: &str = "a.job-listing";
pub const TITLE_SELECTOR: &str = "h3.job-listing-title";
pub const COMPANY_SELECTOR: &str = "h4.job-listing-company";
pub const DESCRIPTION_SELECTOR: &str = "p.job-listing-text";
pub const FOOTER_SELECTOR: &str = "div.job-listing-footer";
pub const FOOTER_ITEM_SELECTOR: &str = "li";

pub const EXPIRY_LABEL: &str = "Expires";

fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::Parse {
        message: format!("invalid selector '{}': {}", css, e),
    })
}

pub fn listing_selector() -> Result<Selector> {
    compile(LISTING_SELECTOR)
}

/// Turns one listing node into a record. Implementations report failures
/// per listing so the caller can skip the row and carry on.
pub trait ListingExtractor: Send + Sync {
    fn extract(&self, listing: ElementRef<'_>) -> Result<ListingRecord>;
}

pub struct FieldExtractor {
    title: Selector,
    company: Selector,
    description: Selector,
    footer: Selector,
    footer_item: Selector,
}

impl FieldExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: compile(TITLE_SELECTOR)?,
            company: compile(COMPANY_SELECTOR)?,
            description: compile(DESCRIPTION_SELECTOR)?,
            footer: compile(FOOTER_SELECTOR)?,
            footer_item: compile(FOOTER_ITEM_SELECTOR)?,
        })
    }
}

impl ListingExtractor for FieldExtractor {
    fn extract(&self, listing: ElementRef<'_>) -> Result<ListingRecord> {
        let mut record = ListingRecord::default();

        if let Some(title) = first_text(listing, &self.title) {
            record.title = title;
        }
        if let Some(company) = first_text(listing, &self.company) {
            record.company = company;
        }
        if let Some(description) = first_text(listing, &self.description) {
            record.description = description;
        }

        // Location and expiry come as a pair or not at all.
        if let Some(footer) = listing.select(&self.footer).next() {
            let items: Vec<String> = footer.select(&self.footer_item).map(text_of).collect();
            if let [location, expiry, ..] = items.as_slice() {
                record.location = location.clone();
                record.expiry_date = strip_expiry_label(expiry);
            }
        }

        Ok(record)
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(text_of)
}

pub fn strip_expiry_label(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(EXPIRY_LABEL)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// Listing nodes in document order, at most `cap` of them.
pub fn enumerate_listings<'a>(
    document: &'a Html,
    selector: &Selector,
    cap: usize,
) -> Vec<ElementRef<'a>> {
    document.select(selector).take(cap).collect()
}

/// Parses `page` and extracts every listing up to `cap`.
///
/// Returns [`ScraperError::NoListings`] when nothing matches. Failures of
/// individual listings are kept in the batch rather than returned.
pub fn scrape_document<E>(
    page: &str,
    selector: &Selector,
    extractor: &E,
    cap: usize,
) -> Result<ScrapeBatch>
where
    E: ListingExtractor + ?Sized,
{
    let document = Html::parse_document(page);
    if !document.errors.is_empty() {
        tracing::debug!(
            "HTML parser recovered from {} markup errors",
            document.errors.len()
        );
    }

    let total_found = document.select(selector).count();
    let listings = enumerate_listings(&document, selector, cap);
    if listings.is_empty() {
        return Err(ScraperError::NoListings);
    }

    let outcomes = listings
        .into_iter()
        .enumerate()
        .map(|(index, listing)| ListingOutcome {
            position: index + 1,
            result: extractor
                .extract(listing)
                .map_err(|e| e.at_listing(index + 1)),
        })
        .collect();

    Ok(ScrapeBatch {
        total_found,
        outcomes,
    })
}
