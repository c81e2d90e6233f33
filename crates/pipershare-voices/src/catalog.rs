//! Voice catalog data model and the embedded default catalog

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VoiceError;

/// Default catalog bundled with the crate. Always present; a parse
/// failure here is a configuration error, not a runtime condition.
const EMBEDDED_VOICES_JSON: &str = include_str!("../voices.json");

/// Expected size and content hash for one voice file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// File size in bytes
    pub size_bytes: u64,
    /// MD5 digest of the file contents, lowercase hex
    pub md5_digest: String,
}

/// One voice's required artifact set
///
/// Catalog entries carry extra descriptive fields (language, quality,
/// aliases) that verification does not use; they are ignored on parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceEntry {
    /// Required files keyed by path relative to the voice repository root
    #[serde(default)]
    pub files: HashMap<String, FileInfo>,
}

/// Mapping from voice name to its file manifest
///
/// Loaded once per invocation and immutable thereafter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    voices: HashMap<String, VoiceEntry>,
}

impl Catalog {
    /// Look up a voice by name
    pub fn get(&self, name: &str) -> Option<&VoiceEntry> {
        self.voices.get(name)
    }

    /// Check whether a voice name is present
    pub fn contains(&self, name: &str) -> bool {
        self.voices.contains_key(name)
    }

    /// Iterate over voice names (unordered)
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.voices.keys().map(String::as_str)
    }

    /// Number of voices in the catalog
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    /// Check whether the catalog has no voices
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Parse a catalog from a JSON file on disk
    pub fn from_path(path: &Path) -> Result<Self, VoiceError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Parse the embedded default catalog
    pub fn embedded() -> Result<Self, VoiceError> {
        serde_json::from_str(EMBEDDED_VOICES_JSON)
            .map_err(|e| VoiceError::EmbeddedCatalog(e.to_string()))
    }
}
