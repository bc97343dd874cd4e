//! Client side of the upload pipeline: a controller that drives one file
//! through select, transfer, retry and cancel, plus the HTTP transport that
//! talks to the upload routes.

pub mod controller;
pub mod error;
pub mod http;

pub use controller::{
    ProgressSink, SelectedFile, UploadController, UploadEvent, UploadOptions, UploadPhase,
    UploadSnapshot, UploadTransport, UploadedAsset, DEFAULT_UPLOAD_TIMEOUT,
};
pub use error::UploadError;
pub use http::HttpUploadTransport;
