//! Error types for GraalVM discovery and native-image builds.
//!
//! Soft "not found" outcomes are modelled as `Option` by the lookup APIs and
//! never surface here. The variants below are the hard failures: a broken
//! installation, an incomplete configuration, or a tool that exited with a
//! failure status. Each variant carries the path or binary name needed to
//! diagnose the misconfiguration.

use camino::Utf8PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors raised while resolving a GraalVM installation or running a build.
#[derive(Debug, Error)]
pub enum NativeImageError {
    /// Neither auto-discovery nor an explicit path produced a GraalVM home.
    #[error(
        "no GraalVM home configured; set graalvm_home, enable find_graalvm_home, or define the java.home property"
    )]
    HomeNotConfigured,

    /// The installation root lacks a binary that the current operation needs.
    #[error("invalid GraalVM installation at {home}: {binary} not found in {home}/bin")]
    InvalidInstallation {
        /// Installation root that was inspected.
        home: Utf8PathBuf,
        /// Name of the missing binary.
        binary: &'static str,
    },

    /// The native-image tool is absent and installation was not requested.
    #[error(
        "native-image not found in {home}/bin; enable install_native_image or run: {home}/bin/gu install native-image"
    )]
    NativeImageNotFound {
        /// Installation root that was inspected.
        home: Utf8PathBuf,
    },

    /// The component manager failed to install a component.
    #[error("failed to install {component} with {gu}: {message}")]
    ComponentInstallFailed {
        /// Component that was being installed.
        component: &'static str,
        /// Component manager binary that was invoked.
        gu: Utf8PathBuf,
        /// Captured diagnostic output.
        message: String,
    },

    /// A required build setting was never supplied.
    #[error("missing required setting: {setting}")]
    MissingSetting {
        /// Name of the setting, as it appears in `native-image.toml`.
        setting: &'static str,
    },

    /// The application archive could not be resolved.
    #[error("application archive unavailable at {location}: {reason}")]
    ArchiveUnavailable {
        /// Path or glob pattern that was consulted.
        location: String,
        /// Why resolution failed.
        reason: String,
    },

    /// A runtime classpath entry could not be resolved.
    #[error("invalid classpath entry {path}: {reason}")]
    InvalidClasspathEntry {
        /// Offending entry.
        path: Utf8PathBuf,
        /// Why the entry was rejected.
        reason: String,
    },

    /// The settings file could not be parsed.
    #[error("invalid settings file {path}: {reason}")]
    InvalidSettings {
        /// Path to the settings file.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// An external process could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that was being launched.
        program: Utf8PathBuf,
        /// Underlying launch failure.
        #[source]
        source: std::io::Error,
    },

    /// native-image exited with a failure status.
    #[error("native-image build of {executable_name} failed ({status}): {message}")]
    BuildFailed {
        /// Requested executable name.
        executable_name: String,
        /// Exit status reported by the process.
        status: ExitStatus,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
        /// Condensed diagnostic drawn from the captured streams.
        message: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`NativeImageError`].
pub type Result<T> = std::result::Result<T, NativeImageError>;
