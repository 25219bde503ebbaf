use std::path::Path;

use crate::commands::progress;
use crate::core::download::Downloader;
use crate::core::extract::Extractor;
use crate::error::Result;
use crate::utils::fs;

/// Downloads an archive and unpacks it into the same directory: the two core
/// operations in fixed composition, nothing more.
pub fn get(url: &str, destination: &str, json: bool) -> Result<()> {
    let destination = Path::new(destination);
    fs::ensure_dir_exists(destination)?;

    if !json {
        println!("Downloading {url}...");
    }

    let mut observer = progress::make_observer(json);
    let archive = Downloader::new().fetch(url, destination, observer.as_mut())?;

    if !json {
        println!("Extracting {}", archive.display());
    }
    Extractor::new().extract(&archive, destination, observer.as_mut())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn zip_fixture_bytes() -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("a.txt", options).unwrap();
        writer.write_all(b"hi").unwrap();
        writer.add_directory("b", options).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn fetches_and_unpacks_in_one_step() {
        let payload = zip_fixture_bytes();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/archive-1.0.zip"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
                .mount(&server),
        );

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("out");
        get(
            &format!("{}/archive-1.0.zip", server.uri()),
            destination.to_str().unwrap(),
            true,
        )
        .unwrap();

        assert_eq!(
            std::fs::read(destination.join("archive-1.0.zip")).unwrap(),
            payload
        );
        assert_eq!(std::fs::read(destination.join("a.txt")).unwrap(), b"hi");
        assert!(destination.join("b").is_dir());
    }
}
