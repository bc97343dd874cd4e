use super::error::UploadError;
use crate::common::upload::UploadKind;
use crate::config::settings::DEFAULT_MAX_UPLOAD_BYTES;
use crate::modules::upload::dto::UploadResponse;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// A file picked by the user, described well enough to send it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
}

impl SelectedFile {
    pub async fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "file name is not valid UTF-8")
            })?;

        let content_type = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            path,
            file_name,
            content_type,
            size: metadata.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub filename: String,
    pub url: String,
}

impl From<UploadResponse> for UploadedAsset {
    fn from(response: UploadResponse) -> Self {
        Self {
            filename: response.filename,
            url: response.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Uploading,
    Completed(UploadedAsset),
    Error(UploadError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSnapshot {
    pub phase: UploadPhase,
    /// 0 to 100, never decreasing within one transfer.
    pub progress: u8,
    pub file: Option<SelectedFile>,
}

impl UploadSnapshot {
    fn idle() -> Self {
        Self {
            phase: UploadPhase::Idle,
            progress: 0,
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Started { transfer_id: Uuid, file_name: String },
    Progress(u8),
    Completed(UploadedAsset),
    Failed(UploadError),
}

/// Handed to the transport so it can report how far along a transfer is.
#[derive(Clone)]
pub struct ProgressSink {
    report: Arc<dyn Fn(u8) + Send + Sync>,
}

impl ProgressSink {
    pub fn new(report: impl Fn(u8) + Send + Sync + 'static) -> Self {
        Self {
            report: Arc::new(report),
        }
    }

    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn report(&self, percent: u8) {
        (self.report)(percent.min(100))
    }
}

impl std::fmt::Debug for ProgressSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSink").finish_non_exhaustive()
    }
}

/// Moves one file to the server. Dropping the returned future must stop the
/// transfer.
#[async_trait]
pub trait UploadTransport: Send + Sync + 'static {
    async fn upload(
        &self,
        kind: UploadKind,
        file: &SelectedFile,
        progress: ProgressSink,
    ) -> Result<UploadedAsset, UploadError>;
}

#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub timeout: Duration,
    /// Checked before anything is sent. `None` leaves it to the server.
    pub max_bytes: Option<u64>,
    /// Cancelling this fails the running transfer with `UploadError::Cancelled`.
    pub parent_token: CancellationToken,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_UPLOAD_TIMEOUT,
            max_bytes: Some(DEFAULT_MAX_UPLOAD_BYTES),
            parent_token: CancellationToken::new(),
        }
    }
}

struct ActiveTransfer {
    id: Uuid,
    token: CancellationToken,
    progress: u8,
}

struct ControllerState {
    selected: Option<SelectedFile>,
    active: Option<ActiveTransfer>,
    snapshot: watch::Sender<UploadSnapshot>,
    events: mpsc::UnboundedSender<UploadEvent>,
}

impl ControllerState {
    fn publish(&self, phase: UploadPhase, progress: u8) {
        self.snapshot.send_replace(UploadSnapshot {
            phase,
            progress,
            file: self.selected.clone(),
        });
    }

    fn emit(&self, event: UploadEvent) {
        // Nobody listening is fine; the snapshot still carries the state.
        let _ = self.events.send(event);
    }

    fn current(&mut self, id: Uuid) -> Option<&mut ActiveTransfer> {
        self.active.as_mut().filter(|active| active.id == id)
    }

    fn abort_active(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(transfer_id = %active.id, "Aborting upload transfer");
            active.token.cancel();
        }
    }
}

struct Shared<T> {
    transport: T,
    kind: UploadKind,
    options: UploadOptions,
    state: Mutex<ControllerState>,
}

impl<T: UploadTransport> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn on_progress(&self, id: Uuid, percent: u8) {
        let mut state = self.lock();
        let Some(active) = state.current(id) else {
            return;
        };

        let percent = percent.min(100).max(active.progress);
        active.progress = percent;
        state.publish(UploadPhase::Uploading, percent);
        state.emit(UploadEvent::Progress(percent));
    }

    fn finish(&self, id: Uuid, result: Result<UploadedAsset, UploadError>) {
        let mut state = self.lock();
        let Some(active) = state.current(id) else {
            debug!(transfer_id = %id, "Dropping result of a superseded transfer");
            return;
        };
        let progress = active.progress;
        state.active = None;

        match result {
            Ok(asset) => {
                info!(kind = self.kind.slug(), filename = %asset.filename, "Upload completed");
                state.selected = None;
                state.publish(UploadPhase::Completed(asset.clone()), 100);
                state.emit(UploadEvent::Completed(asset));
            }
            Err(err) => {
                warn!(kind = self.kind.slug(), "Upload failed: {}", err);
                state.publish(UploadPhase::Error(err.clone()), progress);
                state.emit(UploadEvent::Failed(err));
            }
        }
    }

    async fn run(self: Arc<Self>, id: Uuid, token: CancellationToken, file: SelectedFile) {
        let sink = {
            let shared = Arc::clone(&self);
            ProgressSink::new(move |percent| shared.on_progress(id, percent))
        };

        let transfer = tokio::time::timeout(
            self.options.timeout,
            self.transport.upload(self.kind, &file, sink),
        );

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => Err(UploadError::Cancelled),
            outcome = transfer => outcome.unwrap_or(Err(UploadError::Timeout)),
        };

        self.finish(id, result);
    }
}

/// Drives one upload field. At most one transfer runs at a time; selecting
/// a new file or cancelling drops the previous transfer before anything else
/// is published.
pub struct UploadController<T: UploadTransport> {
    shared: Arc<Shared<T>>,
}

impl<T: UploadTransport> UploadController<T> {
    pub fn new(
        transport: T,
        kind: UploadKind,
        options: UploadOptions,
    ) -> (Self, mpsc::UnboundedReceiver<UploadEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(UploadSnapshot::idle());

        let shared = Arc::new(Shared {
            transport,
            kind,
            options,
            state: Mutex::new(ControllerState {
                selected: None,
                active: None,
                snapshot: snapshot_tx,
                events: events_tx,
            }),
        });

        (Self { shared }, events_rx)
    }

    pub fn kind(&self) -> UploadKind {
        self.shared.kind
    }

    pub fn snapshot(&self) -> UploadSnapshot {
        self.shared.lock().snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadSnapshot> {
        self.shared.lock().snapshot.subscribe()
    }

    /// Selects `file` and starts sending it, aborting any transfer in flight.
    pub fn select(&self, file: SelectedFile) {
        let mut state = self.shared.lock();
        state.abort_active();
        state.selected = Some(file.clone());
        self.start(&mut state, file);
    }

    /// Sends the selected file again after a failure. Returns `false` when
    /// there is nothing to retry.
    pub fn retry(&self) -> bool {
        let mut state = self.shared.lock();
        let failed = matches!(state.snapshot.borrow().phase, UploadPhase::Error(_));
        let Some(file) = state.selected.clone().filter(|_| failed) else {
            return false;
        };

        self.start(&mut state, file);
        true
    }

    /// Aborts the transfer, forgets the selected file and returns to idle.
    /// Returns `false` when idle or completed, where cancel does nothing.
    pub fn cancel(&self) -> bool {
        let mut state = self.shared.lock();
        let settled = matches!(
            state.snapshot.borrow().phase,
            UploadPhase::Idle | UploadPhase::Completed(_)
        );
        if settled {
            return false;
        }

        state.abort_active();
        state.selected = None;
        state.publish(UploadPhase::Idle, 0);
        info!(kind = self.shared.kind.slug(), "Upload cancelled");
        true
    }

    fn start(&self, state: &mut ControllerState, file: SelectedFile) {
        if let Some(limit) = self.shared.options.max_bytes {
            if file.size > limit {
                warn!(
                    kind = self.shared.kind.slug(),
                    size = file.size,
                    limit,
                    "Selected file exceeds upload limit"
                );
                state.publish(UploadPhase::Error(UploadError::FileTooLarge), 0);
                state.emit(UploadEvent::Failed(UploadError::FileTooLarge));
                return;
            }
        }

        let id = Uuid::new_v4();
        let token = self.shared.options.parent_token.child_token();
        state.active = Some(ActiveTransfer {
            id,
            token: token.clone(),
            progress: 0,
        });
        state.publish(UploadPhase::Uploading, 0);
        state.emit(UploadEvent::Started {
            transfer_id: id,
            file_name: file.file_name.clone(),
        });

        debug!(transfer_id = %id, file = %file.file_name, size = file.size, "Starting upload");
        tokio::spawn(Arc::clone(&self.shared).run(id, token, file));
    }
}

impl<T: UploadTransport> Drop for UploadController<T> {
    fn drop(&mut self) {
        self.shared.lock().abort_active();
    }
}
