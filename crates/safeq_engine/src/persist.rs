use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("{} exists and is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("could not create {}: {source}", dir.display())]
    CreateDir { dir: PathBuf, source: io::Error },
    #[error("could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Saves an export body verbatim as `{dir}/{filename}`, creating `dir` and its parents.
///
/// The bytes land in a temp file beside the target first, so an interrupted
/// write never leaves a truncated CSV under the final name. An earlier file
/// with the same name is replaced in a single rename.
pub fn save_export(dir: &Path, filename: &str, body: &[u8]) -> Result<PathBuf, SaveError> {
    if dir.exists() && !dir.is_dir() {
        return Err(SaveError::NotADirectory(dir.to_path_buf()));
    }
    fs::create_dir_all(dir).map_err(|source| SaveError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let target = dir.join(filename);
    write_via_temp(dir, &target, body).map_err(|source| SaveError::Write {
        path: target.clone(),
        source,
    })?;
    Ok(target)
}

fn write_via_temp(dir: &Path, target: &Path, body: &[u8]) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(body)?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(target).map_err(|err| err.error)?;
    Ok(())
}
