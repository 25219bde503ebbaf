use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use url::Url;

use crate::core::observe::{Observation, Observer};
use crate::error::{FixfetchError, Result};

/// Fixed read size for the streaming copy loop. Large enough to avoid
/// per-byte overhead, small enough to bound peak memory.
pub const CHUNK_SIZE: usize = 65536;

const USER_AGENT: &str = concat!("fixfetch/", env!("CARGO_PKG_VERSION"));

pub struct Downloader;

impl Default for Downloader {
    fn default() -> Self {
        Self
    }
}

impl Downloader {
    pub fn new() -> Self {
        Self
    }

    /// Streams `url` to `destination/<last path segment>` and returns the
    /// written path.
    ///
    /// The body is copied in [`CHUNK_SIZE`] chunks and one transfer
    /// observation is emitted per chunk, with cumulative byte counts. The
    /// destination directory must already exist. An existing file with the
    /// same name is overwritten.
    pub fn fetch(
        &self,
        url: &str,
        destination: &Path,
        observer: &mut dyn Observer,
    ) -> Result<PathBuf> {
        let parsed = Url::parse(url).map_err(|_| FixfetchError::InvalidUrl {
            url: url.to_string(),
        })?;
        let file_name = file_name_from_url(&parsed).ok_or_else(|| FixfetchError::InvalidUrl {
            url: url.to_string(),
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FixfetchError::network(url, e.to_string()))?;
        let response = client
            .get(parsed)
            .send()
            .map_err(|e| FixfetchError::network(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FixfetchError::network(
                url,
                format!("server returned HTTP {status}"),
            ));
        }

        let total = response.content_length();
        let target = destination.join(&file_name);
        let mut file = File::create(&target)?;
        let mut body = response;
        let mut chunk = vec![0u8; CHUNK_SIZE];
        let mut downloaded: u64 = 0;

        loop {
            let read = body
                .read(&mut chunk)
                .map_err(|e| FixfetchError::network(url, e.to_string()))?;
            if read == 0 {
                break;
            }
            file.write_all(&chunk[..read])?;
            downloaded += read as u64;
            observer.observe(Observation::transfer(downloaded, total));
        }

        file.flush()?;
        Ok(target)
    }
}

/// The output file name is the last non-empty path segment of the URL.
fn file_name_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.next_back()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment.to_string())
}
