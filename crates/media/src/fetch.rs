//! Media staging
//!
//! Remote episode files are staged to a temp file before decoding; the
//! temp file lives as long as the loaded track so looping can re-open it.

use crate::{MediaError, MediaResult};
use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;
use tempfile::NamedTempFile;

/// A playable media location resolved to the local filesystem
pub enum MediaSource {
    /// Downloaded copy of a remote file; removed when dropped
    Remote(NamedTempFile),
    /// File already on disk
    Local(PathBuf),
}

impl MediaSource {
    /// Path to the playable file
    pub fn path(&self) -> &Path {
        match self {
            MediaSource::Remote(temp) => temp.path(),
            MediaSource::Local(path) => path,
        }
    }
}

/// Resolves `location` into something rodio can open
///
/// `http(s)` URLs are downloaded in full; `file://` URLs and bare paths
/// are used in place.
pub fn stage(location: &str) -> MediaResult<MediaSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        stage_remote(location)
    } else if let Some(path) = location.strip_prefix("file://") {
        stage_local(Path::new(path))
    } else {
        stage_local(Path::new(location))
    }
}

fn stage_remote(url: &str) -> MediaResult<MediaSource> {
    let client = reqwest::blocking::Client::builder()
        .connect_timeout(StdDuration::from_secs(10))
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION"),
        ))
        .build()
        .map_err(|e| MediaError::Fetch(format!("HTTP client unavailable: {}", e)))?;

    let mut response = client
        .get(url)
        .send()
        .map_err(|e| MediaError::Fetch(format!("Request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(MediaError::Fetch(format!(
            "HTTP {} for {}",
            response.status().as_u16(),
            url
        )));
    }

    let mut temp = NamedTempFile::new()
        .map_err(|e| MediaError::Fetch(format!("Cannot create temp file: {}", e)))?;

    let bytes = std::io::copy(&mut response, temp.as_file_mut())
        .map_err(|e| MediaError::Fetch(format!("Download failed: {}", e)))?;

    log::debug!("Staged {} bytes from {}", bytes, url);
    Ok(MediaSource::Remote(temp))
}

fn stage_local(path: &Path) -> MediaResult<MediaSource> {
    if !path.exists() {
        return Err(MediaError::Fetch(format!(
            "File not found: {}",
            path.display()
        )));
    }
    Ok(MediaSource::Local(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_stage_local_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not really audio").unwrap();

        let source = stage(file.path().to_str().unwrap()).expect("local file stages");
        assert_eq!(source.path(), file.path());
    }

    #[test]
    fn test_stage_file_url() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not really audio").unwrap();

        let url = format!("file://{}", file.path().display());
        let source = stage(&url).expect("file URL stages");
        assert_eq!(source.path(), file.path());
    }

    #[test]
    fn test_stage_missing_file_fails() {
        let result = stage("/no/such/file.mp3");
        assert!(matches!(result, Err(MediaError::Fetch(_))));
    }

    #[test]
    #[ignore = "Requires network access"]
    fn test_stage_remote_download() {
        let source = stage("https://example.com/").expect("download succeeds");
        assert!(source.path().exists());
    }
}
