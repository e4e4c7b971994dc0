use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("{}: no such file", .0.display())]
    NotFound(PathBuf),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("-w requires at least one file argument")]
    MissingFiles,
}

/// Reads standard input when `files` is empty, otherwise every file in turn
/// as one concatenated document.
pub fn read_input(files: &[PathBuf]) -> Result<Vec<u8>, InputError> {
    if files.is_empty() {
        let mut buf = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .map_err(|source| InputError::Io {
                path: PathBuf::from("<stdin>"),
                source,
            })?;
        return Ok(buf);
    }

    let mut buf = Vec::new();
    for path in files {
        buf.extend(read_file(path)?);
    }
    Ok(buf)
}

/// Read a whole file
pub fn read_file(path: &Path) -> Result<Vec<u8>, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `content` to `path` unless it already holds exactly that.
/// Returns whether the file was written.
pub fn write_if_changed(path: &Path, original: &[u8], content: &[u8]) -> Result<bool, InputError> {
    if original == content {
        debug!("{}: unchanged", path.display());
        return Ok(false);
    }
    fs::write(path, content).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("{}: rewritten", path.display());
    Ok(true)
}
