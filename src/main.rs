use jobs_scraper_lib::{browser::JobBrowser, config::PipelineConfig, logger, pipeline};
use log::{error, info};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    logger::init();
    info!("Starting jobs scraper...");

    let config = match PipelineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    // One browser session for the whole run; dropped on every exit path.
    let mut browser = JobBrowser::launch()?;

    let export = pipeline::run(&config, &mut browser)?;
    info!("Scraping completed: {} job offers collected.", export.len());
    Ok(())
}
