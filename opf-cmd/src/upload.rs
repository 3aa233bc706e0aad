//! Upload a CSV and save the backend's response.

use crate::write_output;
use log::info;
use opf_series::client::{HttpBackend, UploadBackend, UploadConfig, UploadFile};
use std::path::Path;
use std::time::Duration;

/// Post `file` to `{endpoint}/procesar`, validate the body and write it out.
pub async fn run_upload(
    endpoint: &str,
    file: &str,
    out: Option<&str>,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    let mut config = UploadConfig::for_origin(endpoint);
    config.timeout = Duration::from_secs(timeout_secs);
    let backend = HttpBackend::new(config)?;

    let upload = UploadFile::from_path(Path::new(file))?;
    let response = backend.submit(upload).await?;

    // Reject misaligned bodies before saving them for replay
    let snapshot = response.clone().into_snapshot()?;
    info!(
        "Backend returned {} historical rows and {} forecast points",
        snapshot.historical.len(),
        snapshot.forecast.len()
    );

    write_output(out, &serde_json::to_string_pretty(&response)?)
}
