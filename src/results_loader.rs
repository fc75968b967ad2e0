use crate::browser::PageSource;
use crate::delay_manager;
use crate::error::ScrapeError;
use log::{info, warn};
use scraper::{Html, Selector};
use std::time::Duration;

/// Reloads attempted after the first fetch comes back without results.
pub const MAX_RETRIES: usize = 3;

/// Decides whether a search page actually rendered its results, reloading a
/// bounded number of times when it did not. The result-count header only
/// renders with actual results; a login wall or an empty shell never
/// carries it.
pub struct ResultsLoader {
    pub max_retries: usize,
    pub retry_delay: Duration,
}

impl Default for ResultsLoader {
    fn default() -> Self {
        ResultsLoader {
            max_retries: MAX_RETRIES,
            retry_delay: delay_manager::RESULTS_RETRY_DELAY,
        }
    }
}

impl ResultsLoader {
    /// Fetch `url` and return the parsed page of the first attempt that
    /// carries a readable result count. One fixed delay before each reload;
    /// `ResultsUnavailable` after the retry budget is spent. Navigation
    /// failures are not retried, they propagate.
    pub fn load(
        &self,
        page: &mut dyn PageSource,
        url: &str,
        keyword: &str,
    ) -> Result<Html, ScrapeError> {
        page.open(url)?;
        let document = Html::parse_document(&page.markup()?);
        if let Some(count) = results_count(&document) {
            info!("Found {} results for '{}'", count, keyword);
            return Ok(document);
        }
        warn!("Failed to have jobs results for '{}' on first try", keyword);

        for attempt in 1..=self.max_retries {
            delay_manager::pause(self.retry_delay);
            page.open(url)?;
            let document = Html::parse_document(&page.markup()?);
            if let Some(count) = results_count(&document) {
                info!(
                    "Found {} results for '{}' on retry {}",
                    count, keyword, attempt
                );
                return Ok(document);
            }
            warn!(
                "Still no jobs results for '{}' ({}/{})",
                keyword, attempt, self.max_retries
            );
        }

        Err(ScrapeError::ResultsUnavailable {
            keyword: keyword.to_string(),
            attempts: self.max_retries,
        })
    }
}

/// The job-count text from the results header, when present and non-empty.
pub fn results_count(document: &Html) -> Option<String> {
    let header = Selector::parse("h1.results-context-header__context").unwrap();
    let count = Selector::parse("span.results-context-header__job-count").unwrap();

    let text = document
        .select(&header)
        .next()?
        .select(&count)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    if text.is_empty() { None } else { Some(text) }
}
