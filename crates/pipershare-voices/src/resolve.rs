//! Voice name resolution against local data directories

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::VoiceError;

/// Resolve a voice name to its model and config paths.
///
/// Checks each data directory in order for `{name}.onnx` plus
/// `{name}.onnx.json`; the first directory containing both wins. When
/// no directory matches, the name is treated as a literal model path
/// with a `{name}.json` config next to it.
pub fn find_voice<P: AsRef<Path>>(
    name: &str,
    data_dirs: &[P],
) -> Result<(PathBuf, PathBuf), VoiceError> {
    for data_dir in data_dirs {
        let data_dir = data_dir.as_ref();
        let onnx_path = data_dir.join(format!("{name}.onnx"));
        let config_path = data_dir.join(format!("{name}.onnx.json"));

        if onnx_path.exists() && config_path.exists() {
            debug!("Resolved voice {} in {}", name, data_dir.display());
            return Ok((onnx_path, config_path));
        }
    }

    // Try as a custom voice given by path
    let onnx_path = PathBuf::from(name);
    let config_path = PathBuf::from(format!("{name}.json"));

    if onnx_path.exists() && config_path.exists() {
        debug!("Resolved voice path {}", onnx_path.display());
        return Ok((onnx_path, config_path));
    }

    Err(VoiceError::VoiceNotFound(name.to_string()))
}
