//! Deferred lookups for build inputs.
//!
//! The application archive and the runtime classpath usually do not exist
//! when a build is configured; they appear once the host has packaged the
//! application. Each provider here is a closure that inspects the filesystem
//! only when called, and every call inspects it afresh.

use crate::error::{NativeImageError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;

/// A value computed on demand from the host's current state.
pub type Provider<T> = Box<dyn Fn() -> Result<T>>;

/// Provides `path`, failing when it is not an existing file.
#[must_use]
pub fn existing_file(path: Utf8PathBuf) -> Provider<Utf8PathBuf> {
    Box::new(move || {
        if path.is_file() {
            Ok(path.clone())
        } else {
            Err(NativeImageError::ArchiveUnavailable {
                location: path.to_string(),
                reason: "file does not exist".to_owned(),
            })
        }
    })
}

/// Provides the single `*.jar` file inside `dir`.
///
/// Zero or several matches are errors, so a stale archive left next to a new
/// one is never picked silently.
#[must_use]
pub fn single_jar_in(dir: Utf8PathBuf) -> Provider<Utf8PathBuf> {
    Box::new(move || {
        let pattern = jar_pattern(&dir);
        let mut jars = jars_matching(&pattern)?;
        match jars.len() {
            1 => Ok(jars.remove(0)),
            0 => Err(NativeImageError::ArchiveUnavailable {
                location: pattern,
                reason: "no archive found".to_owned(),
            }),
            count => Err(NativeImageError::ArchiveUnavailable {
                location: pattern,
                reason: format!("expected a single archive but found {count}"),
            }),
        }
    })
}

/// Provides the runtime classpath built from `entries`.
///
/// Files are kept as given. Directories are replaced by the `*.jar` files
/// they contain at call time, in name order. Missing entries are errors.
#[must_use]
pub fn classpath_entries(entries: Vec<Utf8PathBuf>) -> Provider<Vec<Utf8PathBuf>> {
    Box::new(move || {
        let mut classpath = Vec::with_capacity(entries.len());
        for entry in &entries {
            if entry.is_dir() {
                classpath.extend(jars_matching(&jar_pattern(entry))?);
            } else if entry.is_file() {
                classpath.push(entry.clone());
            } else {
                return Err(NativeImageError::InvalidClasspathEntry {
                    path: entry.clone(),
                    reason: "no such file or directory".to_owned(),
                });
            }
        }
        trace!("resolved runtime classpath: {classpath:?}");
        Ok(classpath)
    })
}

/// Provides an empty classpath.
#[must_use]
pub fn empty_classpath() -> Provider<Vec<Utf8PathBuf>> {
    Box::new(|| Ok(Vec::new()))
}

fn jar_pattern(dir: &Utf8Path) -> String {
    format!("{}/*.jar", glob::Pattern::escape(dir.as_str()))
}

fn jars_matching(pattern: &str) -> Result<Vec<Utf8PathBuf>> {
    let paths = glob::glob(pattern).map_err(|e| NativeImageError::ArchiveUnavailable {
        location: pattern.to_owned(),
        reason: e.to_string(),
    })?;

    let mut jars: Vec<Utf8PathBuf> = paths
        .filter_map(std::result::Result::ok)
        .filter(|path| path.is_file())
        .filter_map(|path| Utf8PathBuf::from_path_buf(path).ok())
        .collect();
    jars.sort();
    Ok(jars)
}
