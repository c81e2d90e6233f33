//! pipershare-voices - local Piper voice asset resolution
//!
//! Verifies a voice's model files against a catalog manifest and copies
//! missing or corrupted files from an external share directory.

pub mod catalog;
pub mod error;
pub mod hash;
pub mod manager;
pub mod resolve;

pub use catalog::{Catalog, FileInfo, VoiceEntry};
pub use error::VoiceError;
pub use manager::{
    default_download_dir, LogObserver, TransferObserver, TransferOutcome, VoiceManager,
    DEFAULT_SHARE_DIR,
};
pub use resolve::find_voice;
