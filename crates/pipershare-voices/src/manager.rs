//! Voice verification and best-effort fetching from a share directory

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::VoiceError;
use crate::hash::file_md5;
use crate::resolve::find_voice;

/// Default authoritative source for voice files not yet present locally.
pub const DEFAULT_SHARE_DIR: &str = "/config/share/piper_voices";

/// Catalog file name inside the share and download directories.
const VOICES_FILE: &str = "voices.json";

/// File basenames that are never required locally and never copied.
const SKIP_FILES: &[&str] = &["MODEL_CARD"];

/// Outcome of one optional copy step
#[derive(Debug)]
pub enum TransferOutcome {
    /// Source existed and was copied to the destination
    Copied,
    /// Source file was absent; the destination was left untouched
    SourceMissing,
    /// Copy was attempted but failed
    Failed(io::Error),
}

/// Receives the per-file outcome of each optional copy step
pub trait TransferObserver {
    /// Called once per attempted transfer with the file's relative path
    fn on_transfer(&mut self, file_path: &str, outcome: &TransferOutcome);
}

/// Default observer that reports outcomes through `tracing`
#[derive(Debug, Default)]
pub struct LogObserver;

impl TransferObserver for LogObserver {
    fn on_transfer(&mut self, file_path: &str, outcome: &TransferOutcome) {
        match outcome {
            TransferOutcome::Copied => info!("Copied {}", file_path),
            TransferOutcome::SourceMissing => {
                warn!("Source file not found for {}", file_path)
            }
            TransferOutcome::Failed(err) => {
                warn!("Failed to copy {}: {}", file_path, err)
            }
        }
    }
}

/// Voice catalog loading, verification, and fetching
///
/// Holds the share directory as explicit configuration so tests can
/// point it at a fixture instead of the production share.
pub struct VoiceManager {
    /// Authoritative source directory for voice files
    share_dir: PathBuf,
}

impl VoiceManager {
    /// Create a manager backed by [`DEFAULT_SHARE_DIR`]
    pub fn new() -> Self {
        Self::with_share_dir(DEFAULT_SHARE_DIR)
    }

    /// Create a manager backed by a custom share directory
    pub fn with_share_dir(share_dir: impl Into<PathBuf>) -> Self {
        Self {
            share_dir: share_dir.into(),
        }
    }

    /// Get the configured share directory
    pub fn share_dir(&self) -> &Path {
        &self.share_dir
    }

    /// Load the voice catalog, logging transfer outcomes
    pub fn load_catalog(
        &self,
        download_dir: &Path,
        refresh: bool,
    ) -> Result<Catalog, VoiceError> {
        self.load_catalog_with(download_dir, refresh, &mut LogObserver)
    }

    /// Load the voice catalog
    ///
    /// Sources are tried in priority order: a fresh copy of the share's
    /// `voices.json` (when `refresh` is set), the cached copy under
    /// `download_dir`, then the embedded default. Refresh and parse
    /// failures fall through to the next source; only an unreadable
    /// embedded catalog is fatal.
    pub fn load_catalog_with(
        &self,
        download_dir: &Path,
        refresh: bool,
        observer: &mut dyn TransferObserver,
    ) -> Result<Catalog, VoiceError> {
        let cached = download_dir.join(VOICES_FILE);

        if refresh {
            let source = self.share_dir.join(VOICES_FILE);
            let outcome = copy_file(&source, &cached);
            observer.on_transfer(VOICES_FILE, &outcome);
        }

        if cached.exists() {
            debug!("Loading {}", cached.display());
            match Catalog::from_path(&cached) {
                Ok(catalog) => return Ok(catalog),
                Err(err) => warn!("Failed to load {}: {}", cached.display(), err),
            }
        }

        debug!("Loading embedded voice catalog");
        Catalog::embedded()
    }

    /// Ensure a voice's files exist locally, logging transfer outcomes
    pub fn ensure_voice_exists<P: AsRef<Path>>(
        &self,
        name: &str,
        data_dirs: &[P],
        download_dir: &Path,
        catalog: &Catalog,
    ) -> Result<(), VoiceError> {
        self.ensure_voice_exists_with(name, data_dirs, download_dir, catalog, &mut LogObserver)
    }

    /// Ensure a voice's files exist locally
    ///
    /// Scans `data_dirs` in order against the voice's manifest; files
    /// that are missing or fail the size/MD5 checks anywhere are copied
    /// from the share directory into `download_dir`. A file verified in
    /// one directory is never re-checked in later directories. Names
    /// absent from the catalog fall back to a direct path-pair lookup.
    /// Copy failures are reported to the observer, never to the caller.
    pub fn ensure_voice_exists_with<P: AsRef<Path>>(
        &self,
        name: &str,
        data_dirs: &[P],
        download_dir: &Path,
        catalog: &Catalog,
        observer: &mut dyn TransferObserver,
    ) -> Result<(), VoiceError> {
        let Some(entry) = catalog.get(name) else {
            find_voice(name, data_dirs)?;
            return Ok(());
        };

        if data_dirs.is_empty() {
            return Err(VoiceError::NoDataDirs);
        }

        let mut verified: HashSet<&str> = HashSet::new();
        let mut files_to_copy: BTreeSet<&str> = BTreeSet::new();

        for data_dir in data_dirs {
            let data_dir = data_dir.as_ref();

            for (file_path, file_info) in &entry.files {
                if verified.contains(file_path.as_str()) {
                    continue;
                }

                let Some(file_name) = base_name(file_path) else {
                    continue;
                };
                if SKIP_FILES.contains(&file_name) {
                    continue;
                }

                let candidate = data_dir.join(file_name);
                debug!("Checking {}", candidate.display());
                if !candidate.exists() {
                    debug!("Missing {}", candidate.display());
                    files_to_copy.insert(file_path.as_str());
                    continue;
                }

                let actual_size = match fs::metadata(&candidate) {
                    Ok(meta) => meta.len(),
                    Err(err) => {
                        warn!("Failed to stat {}: {}", candidate.display(), err);
                        files_to_copy.insert(file_path.as_str());
                        continue;
                    }
                };
                if file_info.size_bytes != actual_size {
                    warn!(
                        "Wrong size (expected={}, actual={}) for {}",
                        file_info.size_bytes,
                        actual_size,
                        candidate.display()
                    );
                    files_to_copy.insert(file_path.as_str());
                    continue;
                }

                let actual_hash = match file_md5(&candidate) {
                    Ok(hash) => hash,
                    Err(err) => {
                        warn!("Failed to hash {}: {}", candidate.display(), err);
                        files_to_copy.insert(file_path.as_str());
                        continue;
                    }
                };
                if file_info.md5_digest != actual_hash {
                    warn!(
                        "Wrong hash (expected={}, actual={}) for {}",
                        file_info.md5_digest,
                        actual_hash,
                        candidate.display()
                    );
                    files_to_copy.insert(file_path.as_str());
                    continue;
                }

                verified.insert(file_path.as_str());
                files_to_copy.remove(file_path.as_str());
            }
        }

        if entry.files.is_empty() && files_to_copy.is_empty() {
            return Err(VoiceError::VoiceNotFound(name.to_string()));
        }

        self.copy_missing(files_to_copy, download_dir, observer);
        Ok(())
    }

    /// Copy missing files from the share directory into `download_dir`
    ///
    /// Best-effort: each file's outcome goes to the observer and a
    /// failed copy leaves its destination absent, to be retried on a
    /// future verification pass.
    pub fn copy_missing<'a, I>(
        &self,
        files_to_copy: I,
        download_dir: &Path,
        observer: &mut dyn TransferObserver,
    ) where
        I: IntoIterator<Item = &'a str>,
    {
        for file_path in files_to_copy {
            let Some(file_name) = base_name(file_path) else {
                continue;
            };
            if SKIP_FILES.contains(&file_name) {
                continue;
            }

            let source = self.share_dir.join(file_name);
            let dest = download_dir.join(file_path);

            debug!("Copying {} to {}", source.display(), dest.display());
            let outcome = copy_file(&source, &dest);
            observer.on_transfer(file_path, &outcome);
        }
    }
}

impl Default for VoiceManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Default directory for fetched voice files and the cached catalog
pub fn default_download_dir() -> Result<PathBuf, VoiceError> {
    let dirs = ProjectDirs::from("com", "pipershare", "Pipershare").ok_or_else(|| {
        VoiceError::DownloadDirectoryError("Could not determine data directory".to_string())
    })?;
    Ok(dirs.data_dir().join("voices"))
}

/// Copy `source` to `dest`, creating missing parent directories.
fn copy_file(source: &Path, dest: &Path) -> TransferOutcome {
    if let Some(parent) = dest.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            return TransferOutcome::Failed(err);
        }
    }

    if !source.exists() {
        return TransferOutcome::SourceMissing;
    }

    match fs::copy(source, dest) {
        Ok(_) => TransferOutcome::Copied,
        Err(err) => TransferOutcome::Failed(err),
    }
}

/// Last component of a relative manifest path.
fn base_name(file_path: &str) -> Option<&str> {
    Path::new(file_path).file_name().and_then(|n| n.to_str())
}
