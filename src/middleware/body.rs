use crate::common::response::ApiError;
use crate::common::upload::{UploadRejection, MULTIPART_OVERHEAD_BYTES};
use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use futures_util::{stream, StreamExt};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Size budget for upload requests.
#[derive(Debug, Clone, Copy)]
pub struct UploadBodyLimit {
    /// Largest accepted file.
    pub file_bytes: u64,
    /// Largest accepted request body, multipart framing included.
    pub request_bytes: u64,
}

impl UploadBodyLimit {
    pub fn new(file_bytes: u64) -> Self {
        Self {
            file_bytes,
            request_bytes: file_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
        }
    }
}

fn declared_length(req: &Request) -> Option<u64> {
    req.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

/// Guards the upload routes.
///
/// A declared body larger than the budget is refused up front with a JSON 413.
/// Whatever the inner layers left unread (the tail after an early 401, 403,
/// 413 or 415, or the trailing multipart fields after a success) is read and
/// discarded, up to the budget, before the response goes out. Otherwise the
/// client sees a reset connection instead of the status.
pub async fn guard_upload_body(
    State(limit): State<UploadBodyLimit>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if declared_length(&req).is_some_and(|len| len > limit.request_bytes) {
        return Err(UploadRejection::TooLarge {
            limit: limit.file_bytes,
        }
        .into());
    }

    let (parts, body) = req.into_parts();
    let shared = Arc::new(Mutex::new(body.into_data_stream()));

    let reader = Arc::clone(&shared);
    let body = Body::from_stream(stream::unfold(reader, |reader| async move {
        let chunk = reader.lock().await.next().await;
        chunk.map(|chunk| (chunk, reader))
    }));

    let response = next.run(Request::from_parts(parts, body)).await;

    let mut remaining = shared.lock().await;
    let mut drained = 0u64;
    while let Some(Ok(chunk)) = remaining.next().await {
        drained += chunk.len() as u64;
        if drained > limit.request_bytes {
            break;
        }
    }
    if drained > 0 {
        debug!(status = %response.status(), drained, "Discarded unread upload body");
    }
    drop(remaining);

    Ok(response)
}
