//! File content hashing

use std::fs::File;
use std::io;
use std::path::Path;

use md5::{Digest, Md5};

/// Compute the MD5 digest of a file, hex-encoded.
///
/// Streams the file through the hasher; voice models run to tens of
/// megabytes and are never held in memory whole.
pub fn file_md5(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn digest_matches_known_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"hello world").unwrap();
        drop(file);

        // md5("hello world")
        assert_eq!(
            file_md5(&path).unwrap(),
            "5eb63bbbe01eeed093cb22bb8f5acdc3"
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(file_md5(&dir.path().join("absent")).is_err());
    }
}
