use std::path::Path;

use crate::commands::progress;
use crate::core::extract::Extractor;
use crate::error::Result;
use crate::utils::fs;

pub fn extract(archive: &str, destination: &str, json: bool) -> Result<()> {
    let archive = Path::new(archive);
    let destination = Path::new(destination);
    fs::ensure_dir_exists(destination)?;

    if !json {
        println!(
            "Extracting {} to {}",
            archive.display(),
            destination.display()
        );
    }

    let mut observer = progress::make_observer(json);
    Extractor::new().extract(archive, destination, observer.as_mut())?;
    drop(observer);

    if !json {
        println!("Extraction completed");
    }
    Ok(())
}
