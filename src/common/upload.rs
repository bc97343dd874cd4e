use crate::common::response::ApiError;
use crate::infrastructure::storage::local::{LocalStorage, PartFile};
use axum::{
    extract::{multipart::Field, Multipart},
    http::StatusCode,
};
use bytes::Bytes;
use futures_util::StreamExt;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use time::OffsetDateTime;
use tokio::{fs::File, io::AsyncWriteExt, io::BufWriter};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Slack on top of the file limit for multipart boundaries and part headers.
pub const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Which asset an upload endpoint accepts. Shared by the receiver routes and
/// the client transport so both agree on paths and form field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum UploadKind {
    SiteLogo,
    AnimeCover,
    EpisodeThumbnail,
    EpisodeVideo,
}

impl UploadKind {
    pub const ALL: [UploadKind; 4] = [
        UploadKind::SiteLogo,
        UploadKind::AnimeCover,
        UploadKind::EpisodeThumbnail,
        UploadKind::EpisodeVideo,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            UploadKind::SiteLogo => "logo",
            UploadKind::AnimeCover => "cover",
            UploadKind::EpisodeThumbnail => "thumbnail",
            UploadKind::EpisodeVideo => "video",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            UploadKind::SiteLogo => "site-logo",
            UploadKind::AnimeCover => "anime-cover",
            UploadKind::EpisodeThumbnail => "episode-thumbnail",
            UploadKind::EpisodeVideo => "episode-video",
        }
    }

    pub fn path(&self) -> String {
        format!("/api/upload/{}", self.slug())
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            UploadKind::SiteLogo => "Logo uploaded successfully",
            UploadKind::AnimeCover => "Cover uploaded successfully",
            UploadKind::EpisodeThumbnail => "Thumbnail uploaded successfully",
            UploadKind::EpisodeVideo => "Video uploaded successfully",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadRejection {
    #[error("No file uploaded")]
    NoFile,

    #[error("Only image and video files are allowed")]
    UnsupportedType(String),

    #[error("File too large. Maximum size is {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("Upload interrupted: {0}")]
    Interrupted(String),

    #[error("Failed to store upload: {0}")]
    Storage(#[from] io::Error),
}

impl From<UploadRejection> for ApiError {
    fn from(rejection: UploadRejection) -> Self {
        match rejection {
            UploadRejection::NoFile | UploadRejection::Interrupted(_) => {
                ApiError::Validation(rejection.to_string())
            }
            UploadRejection::UnsupportedType(_) => {
                ApiError::UnsupportedMediaType(rejection.to_string())
            }
            UploadRejection::TooLarge { .. } => ApiError::PayloadTooLarge(rejection.to_string()),
            UploadRejection::Storage(e) => {
                ApiError::Internal(anyhow::Error::new(e).context("upload write failed"))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoredAsset {
    pub filename: String,
    pub url: String,
    pub content_type: String,
    pub size: u64,
}

/// Only `image/*` and `video/*` are accepted.
pub fn is_allowed_mime(content_type: &str) -> bool {
    content_type
        .trim()
        .parse::<mime::Mime>()
        .map(|m| m.type_() == mime::IMAGE || m.type_() == mime::VIDEO)
        .unwrap_or(false)
}

/// `<field>-<unix millis>-<random>[.ext]`, keeping only a sane extension from
/// the client-supplied name.
pub fn generate_filename(field: &str, original_name: Option<&str>) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);

    let ext = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    format!("{}-{}-{}{}", field, millis, suffix, ext)
}

/// Streams one upload into a part file. Any path that does not end in
/// `finish` returning `Ok` removes the part file.
pub struct DiskUploader<'a> {
    storage: &'a LocalStorage,
    filename: String,
    writer: BufWriter<File>,
    part: PartFile,
    written: u64,
    limit: u64,
}

impl<'a> DiskUploader<'a> {
    pub async fn new(storage: &'a LocalStorage, filename: String, limit: u64) -> io::Result<Self> {
        let (file, part) = storage.begin(&filename).await?;

        Ok(Self {
            storage,
            filename,
            writer: BufWriter::new(file),
            part,
            written: 0,
            limit,
        })
    }

    pub async fn write_chunk(&mut self, chunk: Bytes) -> Result<(), UploadRejection> {
        self.written += chunk.len() as u64;
        if self.written > self.limit {
            return Err(UploadRejection::TooLarge { limit: self.limit });
        }

        self.writer.write_all(&chunk).await?;
        Ok(())
    }

    pub async fn finish(self, content_type: String) -> Result<StoredAsset, UploadRejection> {
        let Self {
            storage,
            filename,
            mut writer,
            part,
            written,
            ..
        } = self;

        // An early return drops `part`, which removes the file
        writer.flush().await?;
        writer.get_ref().sync_all().await?;
        drop(writer);

        storage.commit(part, &filename).await?;

        Ok(StoredAsset {
            url: storage.url_for(&filename),
            filename,
            content_type,
            size: written,
        })
    }

    pub async fn abort(self) {
        let Self {
            storage,
            writer,
            part,
            ..
        } = self;
        drop(writer);
        storage.abort(part).await;
    }
}

pub async fn stream_to_disk(
    storage: &LocalStorage,
    mut field: Field<'_>,
    field_name: &str,
    limit: u64,
) -> Result<StoredAsset, UploadRejection> {
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    // Validate before anything touches the disk
    if !is_allowed_mime(&content_type) {
        return Err(UploadRejection::UnsupportedType(content_type));
    }

    let filename = generate_filename(field_name, field.file_name());
    let mut uploader = DiskUploader::new(storage, filename, limit).await?;

    while let Some(chunk) = field.next().await {
        let chunk = match chunk {
            Ok(c) => c,
            Err(e) => {
                warn!("Upload stream error: {}", e);
                uploader.abort().await;
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    return Err(UploadRejection::TooLarge { limit });
                }
                return Err(UploadRejection::Interrupted(e.body_text()));
            }
        };

        if let Err(e) = uploader.write_chunk(chunk).await {
            if let UploadRejection::Storage(io) = &e {
                error!("Upload write error: {}", io);
            }
            uploader.abort().await;
            return Err(e);
        }
    }

    uploader.finish(content_type).await
}

/// Reads multipart fields until the one named after `kind` turns up and
/// streams it to disk. Other fields are skipped.
pub async fn receive_file(
    storage: &LocalStorage,
    multipart: &mut Multipart,
    kind: UploadKind,
    limit: u64,
) -> Result<StoredAsset, UploadRejection> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(UploadRejection::NoFile),
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return Err(UploadRejection::TooLarge { limit });
            }
            Err(e) => return Err(UploadRejection::Interrupted(e.body_text())),
        };

        if field.name() != Some(kind.field_name()) || field.file_name().is_none() {
            continue;
        }

        let asset = stream_to_disk(storage, field, kind.field_name(), limit).await?;
        info!(
            kind = kind.slug(),
            filename = %asset.filename,
            content_type = %asset.content_type,
            size = asset.size,
            "Upload stored"
        );
        return Ok(asset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_image_and_video_types_are_allowed() {
        assert!(is_allowed_mime("image/png"));
        assert!(is_allowed_mime("video/mp4"));
        assert!(is_allowed_mime("IMAGE/JPEG"));
        assert!(!is_allowed_mime("text/plain"));
        assert!(!is_allowed_mime("application/octet-stream"));
        assert!(!is_allowed_mime("audio/mpeg"));
        assert!(!is_allowed_mime(""));
        assert!(!is_allowed_mime("image"));
        assert!(is_allowed_mime("video/webm; codecs=vp9"));
    }

    #[test]
    fn generated_names_keep_field_and_clean_extension() {
        let name = generate_filename("cover", Some("My Poster.PNG"));
        assert!(name.starts_with("cover-"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.matches('-').count(), 2);

        let bare = generate_filename("video", Some("clip"));
        assert!(!bare.contains('.'));

        let hostile = generate_filename("video", Some("x.mp4/../../etc"));
        assert!(!hostile.contains('/'));
    }

    #[test]
    fn generated_names_do_not_collide() {
        let a = generate_filename("logo", Some("a.png"));
        let b = generate_filename("logo", Some("a.png"));
        assert_ne!(a, b);
    }

    #[test]
    fn kinds_map_to_routes_and_fields() {
        assert_eq!(UploadKind::SiteLogo.path(), "/api/upload/site-logo");
        assert_eq!(UploadKind::SiteLogo.field_name(), "logo");
        assert_eq!(UploadKind::EpisodeVideo.path(), "/api/upload/episode-video");
        assert_eq!(UploadKind::EpisodeThumbnail.field_name(), "thumbnail");
    }

    #[test]
    fn rejections_map_to_client_errors() {
        assert_eq!(
            ApiError::from(UploadRejection::NoFile).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(UploadRejection::UnsupportedType("text/plain".into())).status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ApiError::from(UploadRejection::TooLarge { limit: 1 }).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[tokio::test]
    async fn uploader_rejects_past_limit() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let mut uploader = DiskUploader::new(&storage, "video-1-1.mp4".into(), 4)
            .await
            .unwrap();
        uploader.write_chunk(Bytes::from_static(b"abc")).await.unwrap();
        let err = uploader
            .write_chunk(Bytes::from_static(b"de"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadRejection::TooLarge { limit: 4 }));

        uploader.abort().await;
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn finished_upload_keeps_only_the_final_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let mut uploader = DiskUploader::new(&storage, "cover-1-1.png".into(), 16)
            .await
            .unwrap();
        uploader.write_chunk(Bytes::from_static(b"png")).await.unwrap();
        let asset = uploader.finish("image/png".into()).await.unwrap();

        assert_eq!(asset.url, "/uploads/cover-1-1.png");
        assert_eq!(asset.content_type, "image/png");
        assert_eq!(asset.size, 3);
        assert_eq!(std::fs::read(storage.path_for("cover-1-1.png")).unwrap(), b"png");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn dropped_uploader_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let mut uploader = DiskUploader::new(&storage, "video-1-1.mp4".into(), 16)
            .await
            .unwrap();
        uploader.write_chunk(Bytes::from_static(b"abc")).await.unwrap();
        drop(uploader);

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn failed_finish_removes_the_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let mut uploader = DiskUploader::new(&storage, "cover-2-2.png".into(), 16)
            .await
            .unwrap();
        uploader.write_chunk(Bytes::from_static(b"png")).await.unwrap();
        // A directory already holding the target name makes the rename fail
        std::fs::create_dir(storage.path_for("cover-2-2.png")).unwrap();
        std::fs::write(storage.path_for("cover-2-2.png").join("x"), b"x").unwrap();

        let err = uploader.finish("image/png".into()).await.unwrap_err();
        assert!(matches!(err, UploadRejection::Storage(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
