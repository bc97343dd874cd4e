use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tracing::{info, warn};

/// Public path prefix that uploaded assets are served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Content directory for uploaded assets.
///
/// Writes go through a hidden `.part` file which is only renamed into place
/// once the upload is complete, so a served filename never points at a
/// partially written asset.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub async fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;

        info!("✅ Upload directory ready at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    pub fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", PUBLIC_PREFIX, filename)
    }

    fn part_path(&self, filename: &str) -> PathBuf {
        self.root.join(format!(".{}.part", filename))
    }

    pub async fn begin(&self, filename: &str) -> io::Result<(File, PartFile)> {
        let part_path = self.part_path(filename);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&part_path)
            .await?;
        Ok((file, PartFile::new(part_path)))
    }

    /// Renames the part file into place. On failure the part file is removed.
    pub async fn commit(&self, mut part: PartFile, filename: &str) -> io::Result<PathBuf> {
        let target = self.path_for(filename);
        fs::rename(part.path(), &target).await?;
        part.disarm();
        Ok(target)
    }

    pub async fn abort(&self, mut part: PartFile) {
        match fs::remove_file(part.path()).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove partial upload {}: {}", part.path().display(), e),
        }
        part.disarm();
    }
}

/// An in-progress `.part` file. Dropping it without a commit deletes it, which
/// covers error returns and handler futures dropped mid-stream.
#[derive(Debug)]
pub struct PartFile {
    path: PathBuf,
    armed: bool,
}

impl PartFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => warn!("Removed abandoned partial upload {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove partial upload {}: {}", self.path.display(), e),
        }
    }
}
