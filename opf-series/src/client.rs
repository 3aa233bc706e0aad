//! Upload seam between the dashboard and the processing backend.
//!
//! The dashboard only sees [`UploadBackend`]. With the `api` feature,
//! [`HttpBackend`] posts the CSV as multipart field `archivo` to
//! `POST /procesar` using reqwest, which works both natively and in the
//! browser.

use crate::error::Result;
use crate::response::ProcessResponse;
use std::time::Duration;

/// Path of the processing endpoint on the backend.
pub const DEFAULT_ENDPOINT_PATH: &str = "/procesar";

/// Multipart form field carrying the CSV file.
pub const FILE_FIELD: &str = "archivo";

/// A user-selected file, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| crate::SeriesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());
        Ok(Self { name, bytes })
    }
}

/// Where and how uploads are sent.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadConfig {
    /// Absolute URL of the processing endpoint.
    pub endpoint: String,
    /// Client timeout; ignored in the browser.
    pub timeout: Duration,
}

impl UploadConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Endpoint under a backend origin such as `http://localhost:5000`.
    pub fn for_origin(origin: &str) -> Self {
        Self::new(format!(
            "{}{}",
            origin.trim_end_matches('/'),
            DEFAULT_ENDPOINT_PATH
        ))
    }
}

/// Sends one file to the processing backend and returns the decoded body.
///
/// Futures are not required to be `Send`: the dashboard is single-threaded.
#[allow(async_fn_in_trait)]
pub trait UploadBackend {
    async fn submit(&self, file: UploadFile) -> Result<ProcessResponse>;
}

#[cfg(feature = "api")]
pub use http::HttpBackend;

#[cfg(feature = "api")]
mod http {
    use super::{UploadBackend, UploadConfig, UploadFile, FILE_FIELD};
    use crate::error::{Result, SeriesError};
    use crate::response::{check_status, ProcessResponse};
    use log::{info, warn};
    use reqwest::multipart::{Form, Part};
    use reqwest::Client;

    fn transport(e: reqwest::Error) -> SeriesError {
        SeriesError::HttpRequest(e.to_string())
    }

    /// reqwest-backed upload client.
    #[derive(Debug, Clone)]
    pub struct HttpBackend {
        client: Client,
        config: UploadConfig,
    }

    impl HttpBackend {
        pub fn new(config: UploadConfig) -> Result<Self> {
            #[cfg(not(target_arch = "wasm32"))]
            let client = Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(transport)?;
            #[cfg(target_arch = "wasm32")]
            let client = Client::builder().build().map_err(transport)?;
            Ok(Self { client, config })
        }

        pub fn config(&self) -> &UploadConfig {
            &self.config
        }
    }

    impl UploadBackend for HttpBackend {
        async fn submit(&self, file: UploadFile) -> Result<ProcessResponse> {
            info!(
                "Uploading {} ({} bytes) to {}",
                file.name,
                file.bytes.len(),
                self.config.endpoint
            );
            let part = Part::bytes(file.bytes)
                .file_name(file.name)
                .mime_str("text/csv")
                .map_err(transport)?;
            let form = Form::new().part(FILE_FIELD, part);

            let response = self
                .client
                .post(&self.config.endpoint)
                .multipart(form)
                .send()
                .await
                .map_err(transport)?;

            let status = response.status();
            let body = response.text().await.map_err(transport)?;
            if !status.is_success() {
                warn!("Backend answered {} for upload", status);
            }
            check_status(status.as_u16(), &body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_built_from_origin() {
        let config = UploadConfig::for_origin("http://localhost:5000/");
        assert_eq!(config.endpoint, "http://localhost:5000/procesar");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn reads_upload_file_from_disk() {
        let path = std::env::temp_dir().join("opf-series-upload-test.csv");
        std::fs::write(&path, "Tiempo;RateOil\n01/01/2020;120,5\n").unwrap();
        let file = UploadFile::from_path(&path).unwrap();
        assert_eq!(file.name, "opf-series-upload-test.csv");
        assert!(file.bytes.starts_with(b"Tiempo;"));
        std::fs::remove_file(&path).ok();
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn missing_file_reports_path() {
        let err = UploadFile::from_path(std::path::Path::new("/nonexistent/prod.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/prod.csv"));
    }
}
