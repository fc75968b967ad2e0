use thiserror::Error;

/// Everything that can go wrong during one scraping invocation.
///
/// Recovery happens at different levels: `MissingField` and
/// `ResultsListMissing` are caught at the per-keyword boundary,
/// `ResultsUnavailable` makes the run skip that keyword, export and upload
/// variants are logged at the outermost boundary. `Browser` errors are never
/// caught and abort the invocation.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("listing is missing its {field}")]
    MissingField { field: &'static str },

    #[error("no job results for '{keyword}' after {attempts} retries")]
    ResultsUnavailable { keyword: String, attempts: usize },

    #[error("jobs results list not found on page")]
    ResultsListMissing,

    #[error("browser error: {0}")]
    Browser(String),

    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(#[from] s3::error::S3Error),

    #[error("S3 credentials rejected: {0}")]
    Credentials(#[from] s3::creds::error::CredentialsError),

    #[error("upload failed: {0}")]
    Upload(String),
}

impl ScrapeError {
    /// The browser collaborator reports opaque errors; keep the message,
    /// drop the type.
    pub fn browser(err: impl std::fmt::Display) -> Self {
        ScrapeError::Browser(err.to_string())
    }
}
