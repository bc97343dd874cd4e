use super::controller::{ProgressSink, SelectedFile, UploadTransport, UploadedAsset};
use super::error::UploadError;
use crate::common::response::MessageResponse;
use crate::common::upload::UploadKind;
use crate::modules::upload::dto::UploadResponse;
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, StatusCode};
use std::time::Duration;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};
use url::Url;

/// Sends files to the `/api/upload/*` routes as multipart, streaming from disk.
#[derive(Debug, Clone)]
pub struct HttpUploadTransport {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpUploadTransport {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn endpoint(&self, kind: UploadKind) -> Result<Url, UploadError> {
        self.base_url
            .join(&kind.path())
            .map_err(|e| UploadError::Unknown(format!("invalid upload url: {}", e)))
    }
}

fn percent_of(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (sent.saturating_mul(100) / total).min(100) as u8
}

fn map_send_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        UploadError::Timeout
    } else if err.is_connect() || err.is_request() || err.is_body() {
        UploadError::Network(err.to_string())
    } else {
        UploadError::Unknown(err.to_string())
    }
}

#[async_trait]
impl UploadTransport for HttpUploadTransport {
    async fn upload(
        &self,
        kind: UploadKind,
        file: &SelectedFile,
        progress: ProgressSink,
    ) -> Result<UploadedAsset, UploadError> {
        let url = self.endpoint(kind)?;
        let handle = tokio::fs::File::open(&file.path)
            .await
            .map_err(|e| UploadError::Unknown(format!("cannot read {}: {}", file.file_name, e)))?;

        let total = file.size;
        let mut sent = 0u64;
        progress.report(0);

        let body = ReaderStream::new(handle).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                sent += bytes.len() as u64;
                progress.report(percent_of(sent, total));
            }
            chunk
        });

        let part = Part::stream_with_length(Body::wrap_stream(body), total)
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| UploadError::Unknown(e.to_string()))?;
        let form = Form::new().part(kind.field_name(), part);

        debug!(url = %url, file = %file.file_name, size = total, "Sending upload");

        let mut request = self.client.post(url).multipart(form);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_send_error)?;
        let status = response.status();

        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return Err(UploadError::FileTooLarge);
        }

        if !status.is_success() {
            let message = match response.json::<MessageResponse>().await {
                Ok(body) => body.message,
                Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
            };
            warn!(status = status.as_u16(), "Upload rejected: {}", message);
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                UploadError::Timeout
            } else if e.is_decode() {
                UploadError::Unknown(format!("unexpected response: {}", e))
            } else {
                UploadError::Network(e.to_string())
            }
        })?;

        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_a_bounded_percentage() {
        assert_eq!(percent_of(0, 200), 0);
        assert_eq!(percent_of(50, 200), 25);
        assert_eq!(percent_of(200, 200), 100);
        assert_eq!(percent_of(300, 200), 100);
        assert_eq!(percent_of(0, 0), 100);
    }

    #[test]
    fn endpoints_follow_upload_kinds() {
        let transport = HttpUploadTransport::new("http://localhost:3001").unwrap();
        assert_eq!(
            transport.endpoint(UploadKind::EpisodeVideo).unwrap().as_str(),
            "http://localhost:3001/api/upload/episode-video"
        );
        assert_eq!(
            transport.endpoint(UploadKind::SiteLogo).unwrap().path(),
            "/api/upload/site-logo"
        );
    }
}
