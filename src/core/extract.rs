use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use zip::ZipArchive;

use crate::core::observe::{timed, Observer};
use crate::error::{FixfetchError, Result};

/// Unpacking strategy, decided once from the archive's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    GzipTar,
    Bzip2Tar,
}

impl ArchiveFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("zip") => Ok(ArchiveFormat::Zip),
            Some("gz") => Ok(ArchiveFormat::GzipTar),
            Some("bz2") => Ok(ArchiveFormat::Bzip2Tar),
            _ => Err(FixfetchError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn operation(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "extract_zip",
            ArchiveFormat::GzipTar => "extract_gz",
            ArchiveFormat::Bzip2Tar => "extract_bz2",
        }
    }
}

pub struct Extractor;

impl Default for Extractor {
    fn default() -> Self {
        Self
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self
    }

    /// Unpacks `archive` into `destination`, dispatching on the file
    /// extension. Reports the wall-clock duration of the unpack to the
    /// observer after it completes.
    ///
    /// Fail-fast: the first bad member aborts the whole job. Members already
    /// written before a failure are left in place.
    pub fn extract(
        &self,
        archive: &Path,
        destination: &Path,
        observer: &mut dyn Observer,
    ) -> Result<()> {
        let format = ArchiveFormat::from_path(archive)?;

        timed(format.operation(), observer, || match format {
            ArchiveFormat::Zip => self.extract_zip(archive, destination),
            ArchiveFormat::GzipTar => {
                let file = File::open(archive)?;
                self.extract_tar(GzDecoder::new(file), archive, destination)
            }
            ArchiveFormat::Bzip2Tar => {
                let file = File::open(archive)?;
                self.extract_tar(BzDecoder::new(file), archive, destination)
            }
        })
    }

    fn extract_zip(&self, archive_path: &Path, destination: &Path) -> Result<()> {
        let file = File::open(archive_path)?;
        let mut archive = ZipArchive::new(file).map_err(|e| corrupt_zip(archive_path, e))?;

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| corrupt_zip(archive_path, e))?;
            let outpath = match entry.enclosed_name() {
                Some(relative) => destination.join(relative),
                None => {
                    return Err(FixfetchError::UnsafePath {
                        entry: PathBuf::from(entry.name()),
                    })
                }
            };

            if entry.name().ends_with('/') {
                std::fs::create_dir_all(&outpath)?;
            } else {
                if let Some(parent) = outpath.parent() {
                    if !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                let mut outfile = File::create(&outpath)?;
                std::io::copy(&mut entry, &mut outfile)
                    .map_err(|e| member_error(archive_path, e))?;
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
                }
            }
        }
        Ok(())
    }

    fn extract_tar<R: Read>(
        &self,
        reader: R,
        archive_path: &Path,
        destination: &Path,
    ) -> Result<()> {
        let mut archive = tar::Archive::new(reader);
        let entries = archive
            .entries()
            .map_err(|e| corrupt(archive_path, e.to_string()))?;

        for entry in entries {
            let mut entry = entry.map_err(|e| corrupt(archive_path, e.to_string()))?;
            let member = entry
                .path()
                .map_err(|e| corrupt(archive_path, e.to_string()))?
                .into_owned();
            let outpath = resolve_member_path(destination, &member)?;

            if entry.header().entry_type().is_dir() {
                std::fs::create_dir_all(&outpath)?;
            } else {
                if let Some(parent) = outpath.parent() {
                    if !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                entry
                    .unpack(&outpath)
                    .map_err(|e| member_error(archive_path, e))?;
            }
        }
        Ok(())
    }
}

/// Joins `member` onto `destination`, rejecting absolute paths and any `..`
/// component before a single byte is written.
fn resolve_member_path(destination: &Path, member: &Path) -> Result<PathBuf> {
    let mut resolved = destination.to_path_buf();
    for component in member.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(FixfetchError::UnsafePath {
                    entry: member.to_path_buf(),
                })
            }
        }
    }
    Ok(resolved)
}

fn corrupt(path: &Path, message: String) -> FixfetchError {
    FixfetchError::CorruptArchive {
        path: path.to_path_buf(),
        message,
    }
}

fn corrupt_zip(path: &Path, error: zip::result::ZipError) -> FixfetchError {
    match error {
        zip::result::ZipError::Io(io) => FixfetchError::Io(io),
        other => corrupt(path, other.to_string()),
    }
}

/// Errors while copying member bytes: a short or undecodable stream means the
/// archive is bad, anything else is a destination IO failure.
fn member_error(path: &Path, error: std::io::Error) -> FixfetchError {
    match error.kind() {
        std::io::ErrorKind::InvalidData
        | std::io::ErrorKind::InvalidInput
        | std::io::ErrorKind::UnexpectedEof => corrupt(path, error.to_string()),
        _ => FixfetchError::Io(error),
    }
}
