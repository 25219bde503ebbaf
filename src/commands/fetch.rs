use std::path::Path;

use crate::commands::progress;
use crate::core::download::Downloader;
use crate::error::Result;
use crate::utils::fs;

pub fn fetch(url: &str, destination: &str, json: bool) -> Result<()> {
    let destination = Path::new(destination);
    fs::ensure_dir_exists(destination)?;

    if !json {
        println!("Downloading {url}...");
    }

    let mut observer = progress::make_observer(json);
    let saved = Downloader::new().fetch(url, destination, observer.as_mut())?;
    drop(observer);

    if !json {
        println!("Saved to {}", saved.display());
    }
    Ok(())
}
