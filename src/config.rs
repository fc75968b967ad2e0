use crate::error::ScrapeError;
use std::env;

/// Job titles searched when JOBS_TO_FIND is not set.
pub const DEFAULT_JOBS_TO_FIND: [&str; 3] =
    ["data analyst", "data engineer", "analytics engineer"];

/// Everything one invocation needs, resolved once at the process boundary.
/// The pipeline itself never touches the environment.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Keywords to search, one pass each, in order. Always lowercase: the
    /// title filter is a literal substring match on lowercased titles.
    pub jobs_to_find: Vec<String>,
    pub bucket_name: String,
    /// Key prefix inside the bucket, prepended verbatim to the export
    /// filename.
    pub folder: String,
    pub key_id: String,
    pub secret_key: String,
    pub region: String,
    /// When set, a listing with a missing mandatory field is skipped instead
    /// of ending that keyword's pass.
    pub skip_bad_listings: bool,
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self, ScrapeError> {
        let jobs_to_find = match env::var("JOBS_TO_FIND") {
            Ok(raw) => raw
                .split(',')
                .map(|job| job.trim().to_lowercase())
                .filter(|job| !job.is_empty())
                .collect(),
            Err(_) => DEFAULT_JOBS_TO_FIND.iter().map(|job| job.to_string()).collect(),
        };

        Ok(PipelineConfig {
            jobs_to_find,
            bucket_name: require("BUCKET_NAME")?,
            folder: require("FOLDER")?,
            key_id: require("KEY_ID")?,
            secret_key: require("SECRET_KEY")?,
            region: require("REGION")?,
            skip_bad_listings: env::var("SKIP_BAD_LISTINGS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }
}

fn require(name: &'static str) -> Result<String, ScrapeError> {
    env::var(name).map_err(|_| ScrapeError::MissingEnv(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: env vars are process-global and tests run in parallel.
    #[test]
    fn from_env_reads_and_validates() {
        env::set_var("BUCKET_NAME", "jobs-bucket");
        env::set_var("FOLDER", "scraps/");
        env::set_var("KEY_ID", "AKIATEST");
        env::set_var("SECRET_KEY", "secret");
        env::set_var("REGION", "eu-west-3");
        env::remove_var("JOBS_TO_FIND");
        env::remove_var("SKIP_BAD_LISTINGS");

        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.bucket_name, "jobs-bucket");
        assert_eq!(config.folder, "scraps/");
        assert_eq!(config.region, "eu-west-3");
        assert!(!config.skip_bad_listings);
        assert_eq!(
            config.jobs_to_find,
            vec!["data analyst", "data engineer", "analytics engineer"]
        );

        env::set_var("JOBS_TO_FIND", "Data Analyst, BI Developer ,,");
        env::set_var("SKIP_BAD_LISTINGS", "true");
        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.jobs_to_find, vec!["data analyst", "bi developer"]);
        assert!(config.skip_bad_listings);

        env::remove_var("REGION");
        let err = PipelineConfig::from_env().unwrap_err();
        assert!(matches!(err, ScrapeError::MissingEnv("REGION")));
        env::set_var("REGION", "eu-west-3");
    }
}
