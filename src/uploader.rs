use crate::error::ScrapeError;
use log::info;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use std::fs;
use std::path::Path;

/// Push one local file to an S3 bucket under `s3_key`. Credentials and
/// region come from the caller's configuration; nothing here reads the
/// environment.
pub fn aws_bucket_upload(
    local_path: &Path,
    bucket_name: &str,
    s3_key: &str,
    key_id: &str,
    secret_key: &str,
    region: &str,
) -> Result<(), ScrapeError> {
    let region: Region = region
        .parse()
        .map_err(|e| ScrapeError::Upload(format!("invalid region: {e}")))?;
    let credentials = Credentials::new(Some(key_id), Some(secret_key), None, None, None)?;
    let bucket = Bucket::new(bucket_name, region, credentials)?;

    let content = fs::read(local_path)?;
    let response = bucket.put_object_blocking(s3_key, &content)?;
    if response.status_code() != 200 {
        return Err(ScrapeError::Upload(format!(
            "S3 answered status {}",
            response.status_code()
        )));
    }

    info!("Uploaded {:?} to s3://{}/{}", local_path, bucket_name, s3_key);
    Ok(())
}
