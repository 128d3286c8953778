use crate::{
    errors::{FileOperation, IoError},
    layout::Layout,
};
use colored::Colorize;
use miette::Diagnostic;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MaterializeError {
    #[error("I/O error within materialize domain")]
    #[diagnostic(code(kryptx_scaffold::materialize::io))]
    Io(#[from] IoError),
}

/// Everything a successful run touched, in the order it was touched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Materialized {
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Resolves a table key against the base directory. The empty key is the
/// base directory itself.
pub fn directory_path(base: &Path, directory: &str) -> PathBuf {
    if directory.is_empty() {
        base.to_path_buf()
    } else {
        base.join(directory)
    }
}

/// Walks `layout` in table order, creating every directory and every file
/// (empty, truncated if it already exists) under `base`.
///
/// Stops at the first failure. Whatever was created before that point stays
/// on disk.
///
/// # Errors
///
/// Returns a [`MaterializeError`] naming the path that could not be created,
/// e.g. when a regular file sits where a directory is expected.
pub fn materialize(
    base: &Path,
    layout: &Layout,
    echo: bool,
) -> Result<Materialized, MaterializeError> {
    let mut materialized = Materialized::default();

    create_directory(base)?;

    for (directory, files) in &layout.entries {
        let directory_path = directory_path(base, directory);

        if !directory.is_empty() {
            create_directory(&directory_path)?;

            materialized.directories.push(directory_path.clone());
        }

        for file in files {
            let file_path = directory_path.join(file);

            write_empty_file(&file_path, echo)?;

            materialized.files.push(file_path);
        }
    }

    log::info!(
        "materialized {} directories and {} files under {}",
        materialized.directories.len(),
        materialized.files.len(),
        base.display()
    );

    Ok(materialized)
}
/// Creates all directories in the specified path if they do not exist.
fn create_directory(path: &Path) -> Result<(), MaterializeError> {
    log::debug!("ensuring directory: {}", path.display());

    fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.into(), error))?;

    Ok(())
}
/// Creates `path` as an empty file, discarding previous contents.
///
/// The handle is dropped before returning, so only one file is open at a time.
fn write_empty_file(path: &Path, echo: bool) -> Result<(), MaterializeError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() && metadata.len() > 0 => {
            log::warn!(
                "truncating {} ({} bytes)",
                path.display(),
                metadata.len()
            );
        }
        _ => {}
    }

    fs::File::create(path)
        .map_err(|error| IoError::new(FileOperation::Create, path.into(), error))?;

    log::debug!("created empty file: {}", path.display());

    if echo {
        println!("{} {}", "create".green(), path.display());
    }

    Ok(())
}
