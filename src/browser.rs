use crate::error::ScrapeError;
use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use std::ffi::OsStr;
use std::sync::Arc;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Narrow contract the pipeline needs from a rendered page: navigate,
/// scroll, and hand back the current markup for structural parsing.
pub trait PageSource {
    fn open(&mut self, url: &str) -> Result<(), ScrapeError>;
    fn scroll_to_bottom(&mut self) -> Result<(), ScrapeError>;
    fn markup(&mut self) -> Result<String, ScrapeError>;
}

/// One headless Chromium session, reused across every keyword of a run.
/// Dropping it closes the browser process, so release happens on every exit
/// path.
pub struct JobBrowser {
    tab: Arc<Tab>,
    // Keeps the browser process alive for as long as the tab is in use.
    _browser: Browser,
}

impl JobBrowser {
    pub fn launch() -> Result<Self, ScrapeError> {
        let options = LaunchOptionsBuilder::default()
            .headless(true)
            .window_size(Some((1920, 1080)))
            .sandbox(false)
            .ignore_certificate_errors(true)
            .args(vec![
                OsStr::new("--incognito"),
                OsStr::new("--disable-gpu"),
                OsStr::new("--lang=fr-FR"),
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--disable-blink-features=AutomationControlled"),
            ])
            .build()
            .expect("Failed to build browser launch options");

        let browser = Browser::new(options).map_err(ScrapeError::browser)?;
        let tab = browser.new_tab().map_err(ScrapeError::browser)?;
        tab.set_user_agent(USER_AGENT, Some("fr-FR,fr;q=0.9"), None)
            .map_err(ScrapeError::browser)?;

        Ok(JobBrowser { tab, _browser: browser })
    }
}

impl PageSource for JobBrowser {
    fn open(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.tab
            .navigate_to(url)
            .map_err(ScrapeError::browser)?
            .wait_until_navigated()
            .map_err(ScrapeError::browser)?;
        Ok(())
    }

    fn scroll_to_bottom(&mut self) -> Result<(), ScrapeError> {
        self.tab
            .evaluate("window.scrollTo(0, document.body.scrollHeight);", false)
            .map_err(ScrapeError::browser)?;
        Ok(())
    }

    fn markup(&mut self) -> Result<String, ScrapeError> {
        self.tab.get_content().map_err(ScrapeError::browser)
    }
}
