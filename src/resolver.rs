//! GraalVM home auto-discovery.
//!
//! Candidate `bin` directories are gathered from four sources, in priority
//! order:
//!
//! 1. each entry of `PATH`, used directly since entries already name `bin`
//!    directories;
//! 2. `JAVA_HOME`;
//! 3. the `java.home` system property;
//! 4. every child of `$SDKMAN_CANDIDATES_DIR/java`.
//!
//! Sources 2–4 name installation roots, so they are kept only when they are
//! existing directories with an existing `bin` subdirectory. The first
//! candidate holding `gu` or `gu.cmd` wins, and the directory two levels above
//! that file is the installation root. Every candidate is made absolute
//! first, so a relative `PATH` entry still yields an absolute root.

use crate::environment::{
    EnvironmentProbe, JAVA_HOME_PROPERTY, JAVA_HOME_VARIABLE, PATH_VARIABLE,
    SDKMAN_CANDIDATES_VARIABLE,
};
use crate::home::{GU, GraalVmHome, binary_variants};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use std::ffi::OsStr;

/// Searches the environment for a GraalVM installation.
pub struct HomeResolver<'a> {
    probe: &'a dyn EnvironmentProbe,
}

impl<'a> HomeResolver<'a> {
    /// Creates a resolver reading from `probe`.
    #[must_use]
    pub const fn new(probe: &'a dyn EnvironmentProbe) -> Self {
        Self { probe }
    }

    /// Returns the first installation whose `bin` holds a component manager.
    ///
    /// `None` means no candidate matched; callers fall back to an explicitly
    /// configured home.
    #[must_use]
    pub fn resolve(&self) -> Option<GraalVmHome> {
        let found = self
            .candidate_bin_dirs()
            .into_iter()
            .flat_map(|bin_dir| {
                binary_variants(GU)
                    .into_iter()
                    .map(move |name| bin_dir.join(name))
            })
            .filter(|component_manager| {
                let exists = component_manager.exists();
                trace!("probing {component_manager}: exists={exists}");
                exists
            })
            .find_map(|component_manager| installation_root(&component_manager));

        match &found {
            Some(home) => debug!("discovered GraalVM home at {home}"),
            None => debug!("no GraalVM home discovered from the environment"),
        }

        found.map(GraalVmHome::new)
    }

    /// Lists candidate `bin` directories in priority order.
    #[must_use]
    pub fn candidate_bin_dirs(&self) -> Vec<Utf8PathBuf> {
        let path_entries = self
            .probe
            .env(PATH_VARIABLE)
            .map(|value| split_path_list(&value))
            .unwrap_or_default();

        let home_bins = self
            .probe
            .env(JAVA_HOME_VARIABLE)
            .into_iter()
            .chain(self.probe.property(JAVA_HOME_PROPERTY))
            .map(Utf8PathBuf::from)
            .chain(self.sdkman_java_homes())
            .filter(|home| home.is_dir())
            .map(|home| absolute(&home.join("bin")))
            .filter(|bin_dir| bin_dir.is_dir());

        path_entries
            .iter()
            .map(|entry| absolute(entry))
            .chain(home_bins)
            .collect()
    }

    /// Children of `$SDKMAN_CANDIDATES_DIR/java`, sorted by name.
    fn sdkman_java_homes(&self) -> Vec<Utf8PathBuf> {
        let Some(candidates) = self.probe.env(SDKMAN_CANDIDATES_VARIABLE) else {
            return Vec::new();
        };
        let java_dir = Utf8PathBuf::from(candidates).join("java");
        if !java_dir.is_dir() {
            return Vec::new();
        }

        let Ok(entries) = java_dir.read_dir_utf8() else {
            debug!("cannot list SDKMAN java candidates in {java_dir}");
            return Vec::new();
        };

        let mut homes: Vec<Utf8PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path().to_owned())
            .collect();
        homes.sort();
        homes
    }
}

/// Splits a path-list value on the platform separator.
///
/// Empty and non-UTF-8 entries are dropped.
#[must_use]
pub fn split_path_list(value: &str) -> Vec<Utf8PathBuf> {
    std::env::split_paths(OsStr::new(value))
        .filter_map(|entry| Utf8PathBuf::from_path_buf(entry).ok())
        .filter(|entry| !entry.as_str().is_empty())
        .collect()
}

fn installation_root(component_manager: &Utf8Path) -> Option<Utf8PathBuf> {
    component_manager
        .parent()
        .and_then(Utf8Path::parent)
        .map(Utf8Path::to_path_buf)
}

/// Anchors a relative path to the current directory without touching the
/// filesystem.
pub(crate) fn absolute(path: &Utf8Path) -> Utf8PathBuf {
    std::path::absolute(path)
        .ok()
        .and_then(|resolved| Utf8PathBuf::from_path_buf(resolved).ok())
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
