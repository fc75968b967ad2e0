use crate::error::ScrapeError;
use scraper::{ElementRef, Selector};

/// Sentinel for confidential postings where the source site omits the
/// company entirely.
pub const COMPANY_NOT_FOUND: &str = "Not found";

/// The five fields scraped out of one listing card.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFields {
    /// Lowercased, trimmed title used by the keyword filter.
    pub lower_title: String,
    /// Title as displayed. Looked up through the first heading, not derived
    /// from `lower_title`: the two selectors differ and a card with several
    /// headings may yield different text for each.
    pub job_name: String,
    pub company: String,
    pub city: String,
    pub link: String,
}

pub struct Extractor {
    title: Selector,
    heading: Selector,
    company: Selector,
    city: Selector,
    anchor: Selector,
}

impl Extractor {
    pub fn new() -> Self {
        Extractor {
            title: Selector::parse("h3.base-search-card__title").unwrap(),
            heading: Selector::parse("h3").unwrap(),
            company: Selector::parse(
                ".base-search-card__info h4.base-search-card__subtitle a.hidden-nested-link",
            )
            .unwrap(),
            city: Selector::parse(".base-search-card__info span.job-search-card__location")
                .unwrap(),
            anchor: Selector::parse("a[href]").unwrap(),
        }
    }

    /// Scrape one listing card. Title, city and link are treated as
    /// structurally guaranteed; a missing one is an error. Company is the
    /// only field legitimately absent on some listings.
    pub fn extract(&self, listing: ElementRef) -> Result<ListingFields, ScrapeError> {
        let lower_title = listing
            .select(&self.title)
            .next()
            .map(text_of)
            .ok_or(ScrapeError::MissingField { field: "title" })?
            .to_lowercase();

        let job_name = listing
            .select(&self.heading)
            .next()
            .map(text_of)
            .ok_or(ScrapeError::MissingField { field: "title" })?;

        // Sometimes the company is empty
        let company = listing
            .select(&self.company)
            .next()
            .map(text_of)
            .unwrap_or_else(|| COMPANY_NOT_FOUND.to_string());

        let city = listing
            .select(&self.city)
            .next()
            .map(text_of)
            .ok_or(ScrapeError::MissingField { field: "city" })?;

        let link = listing
            .select(&self.anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| href.to_string())
            .ok_or(ScrapeError::MissingField { field: "link" })?;

        Ok(ListingFields { lower_title, job_name, company, city, link })
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Extractor::new()
    }
}

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
