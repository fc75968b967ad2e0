use crate::browser::PageSource;
use crate::collector::{AggregatedExport, CaptureStamp, JobRecord, SearchRun};
use crate::config::PipelineConfig;
use crate::delay_manager;
use crate::error::ScrapeError;
use crate::export;
use crate::extractor::Extractor;
use crate::results_loader::ResultsLoader;
use crate::uploader;
use chrono::Local;
use log::{error, info, warn};
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Scroll-and-settle cycles after a successful load; enough to make the
/// page render every listing of a 24-hour window.
const SCROLL_PASSES: usize = 3;

/// Search URL for one keyword: fixed region (Île-de-France) and last 24
/// hours only.
pub fn search_url(keyword: &str) -> String {
    format!(
        "https://www.linkedin.com/jobs/search/?keywords={}&location=%C3%8Ele-de-France%2C%20France&locationId=&geoId=104246759&f_TPR=r86400&position=1&pageNum=0",
        urlencoding::encode(keyword)
    )
}

/// Drives one pass per keyword over the loader, extractor and collector,
/// merging the per-keyword tables in keyword order.
pub struct Pipeline<'a> {
    page: &'a mut dyn PageSource,
    extractor: Extractor,
    pub loader: ResultsLoader,
    pub scroll_settle: Duration,
    pub no_results_delay: Duration,
    pub skip_bad_listings: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(page: &'a mut dyn PageSource) -> Self {
        Pipeline {
            page,
            extractor: Extractor::new(),
            loader: ResultsLoader::default(),
            scroll_settle: delay_manager::SCROLL_SETTLE_DELAY,
            no_results_delay: delay_manager::NO_RESULTS_DELAY,
            skip_bad_listings: false,
        }
    }

    /// One invocation's collection phase. The capture stamp is derived here,
    /// once, and shared by every record of the run.
    pub fn collect(&mut self, keywords: &[String]) -> Result<AggregatedExport, ScrapeError> {
        let stamp = CaptureStamp::now();
        let mut export = AggregatedExport::default();
        for keyword in keywords {
            let rows = self.scrape_keyword(keyword, &stamp)?;
            info!("'{}' contributed {} rows", keyword, rows.len());
            export.append_run(rows);
        }
        Ok(export)
    }

    fn scrape_keyword(
        &mut self,
        keyword: &str,
        stamp: &CaptureStamp,
    ) -> Result<Vec<JobRecord>, ScrapeError> {
        let url = search_url(keyword);
        info!("Scraping jobs for '{}'", keyword);

        match self.loader.load(&mut *self.page, &url, keyword) {
            Ok(_) => {}
            Err(ScrapeError::ResultsUnavailable { .. }) => {
                // A dead keyword never kills the run.
                warn!("No jobs results for '{}', going on next job search", keyword);
                delay_manager::pause(self.no_results_delay);
                return Ok(Vec::new());
            }
            Err(other) => return Err(other),
        }

        self.scroll_page();

        // Re-read the page: scrolling made more listings render.
        let document = Html::parse_document(&self.page.markup()?);
        let mut run = SearchRun::new(keyword, stamp);
        if let Err(e) = self.harvest_listings(&document, &mut run) {
            // Keyword-level boundary: keep whatever was collected before the
            // failure and move on.
            warn!("Scrap failed for '{}': {}", keyword, e);
        }
        Ok(run.finish())
    }

    /// Scroll to the bottom a fixed number of times, settling after each.
    /// A failed scroll is retried once; a second failure is logged and
    /// swallowed, leaving this cycle's rendering incomplete.
    fn scroll_page(&mut self) {
        for _ in 0..SCROLL_PASSES {
            match self.page.scroll_to_bottom() {
                Ok(()) => delay_manager::pause(self.scroll_settle),
                Err(e) => {
                    warn!("Unable to scroll on page on first try: {}", e);
                    delay_manager::pause(self.scroll_settle);
                    match self.page.scroll_to_bottom() {
                        Ok(()) => delay_manager::pause(self.scroll_settle),
                        Err(e) => warn!("Unable to scroll on page on second try: {}", e),
                    }
                }
            }
        }
    }

    /// Feed every listing of the results container through the extractor
    /// and the filter. A propagated extraction error ends the enumeration;
    /// with `skip_bad_listings` the offending listing is dropped instead.
    fn harvest_listings(
        &self,
        document: &Html,
        run: &mut SearchRun,
    ) -> Result<(), ScrapeError> {
        let list = Selector::parse("ul.jobs-search__results-list").unwrap();
        let item = Selector::parse("li").unwrap();

        let listings = document
            .select(&list)
            .next()
            .ok_or(ScrapeError::ResultsListMissing)?;

        for listing in listings.select(&item) {
            match self.extractor.extract(listing) {
                Ok(fields) => {
                    run.collect(&fields);
                }
                Err(e) if self.skip_bad_listings => {
                    warn!("Skipping one listing for '{}': {}", run.keyword(), e)
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Full invocation: collect, export to a dated CSV, upload, clean up.
/// Export and upload failures are logged and non-fatal; the collected data
/// is still returned.
pub fn run(
    config: &PipelineConfig,
    page: &mut dyn PageSource,
) -> Result<AggregatedExport, ScrapeError> {
    let mut pipeline = Pipeline::new(page);
    pipeline.skip_bad_listings = config.skip_bad_listings;

    let export = pipeline.collect(&config.jobs_to_find)?;
    info!(
        "Collected {} job offers across {} searches",
        export.len(),
        config.jobs_to_find.len()
    );

    let file_name = export::export_file_name(Local::now());
    if let Err(e) = export::write_csv(&export, Path::new(&file_name)) {
        error!("Failed to write CSV export {}: {}", file_name, e);
        return Ok(export);
    }

    let s3_key = format!("{}{}", config.folder, file_name);
    if let Err(e) = uploader::aws_bucket_upload(
        Path::new(&file_name),
        &config.bucket_name,
        &s3_key,
        &config.key_id,
        &config.secret_key,
        &config.region,
    ) {
        error!("Failed to upload file on S3: {}", e);
    }

    if let Err(e) = fs::remove_file(&file_name) {
        warn!("Failed to remove local export {}: {}", file_name, e);
    }

    Ok(export)
}
