//! Output formatting for the native-image CLI.
//!
//! Progress and dry-run text go to stderr; the `locate` report goes to
//! stdout so scripts can capture it.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use graalvm_native_image::environment::{EnvironmentProbe, EnvironmentSnapshot};
use graalvm_native_image::task::{BuildOutcome, BuildPlan};
use graalvm_native_image::{HomeResolver, NativeImageConfig, NativeImageError};
use serde::Serialize;

/// Where a GraalVM installation was found and what it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocateReport {
    /// Installation a build would use.
    pub graalvm_home: Option<Utf8PathBuf>,
    /// Installation auto-discovery finds, whether or not it is enabled.
    pub discovered_home: Option<Utf8PathBuf>,
    /// Whether auto-discovery is enabled.
    pub find_graalvm_home: bool,
    /// The native-image tool, when installed.
    pub native_image: Option<Utf8PathBuf>,
    /// The component manager, when present.
    pub gu: Option<Utf8PathBuf>,
    /// Signals consulted during discovery.
    pub environment: EnvironmentSnapshot,
}

impl LocateReport {
    /// Resolves the installation for `config` without running anything.
    ///
    /// A missing home is reported as absent rather than as an error.
    ///
    /// # Errors
    ///
    /// Returns any resolution error other than an unconfigured home.
    pub fn resolve(config: &NativeImageConfig, probe: &dyn EnvironmentProbe) -> Result<Self> {
        let home = match config.resolve_home(probe) {
            Ok(home) => Some(home),
            Err(NativeImageError::HomeNotConfigured) => None,
            Err(other) => return Err(other.into()),
        };

        Ok(Self {
            graalvm_home: home.as_ref().map(|home| home.root().to_owned()),
            discovered_home: HomeResolver::new(probe)
                .resolve()
                .map(|home| home.root().to_owned()),
            find_graalvm_home: config.find_graalvm_home(),
            native_image: home.as_ref().and_then(|home| home.native_image()),
            gu: home.as_ref().and_then(|home| home.gu().ok()),
            environment: EnvironmentSnapshot::capture(probe),
        })
    }
}

/// Format a locate report for human-readable output.
///
/// # Examples
///
/// ```
/// use graalvm_native_image::environment::EnvironmentSnapshot;
/// use native_image_cli::output::{LocateReport, format_locate_human};
///
/// let report = LocateReport {
///     graalvm_home: None,
///     discovered_home: None,
///     find_graalvm_home: false,
///     native_image: None,
///     gu: None,
///     environment: EnvironmentSnapshot::new(),
/// };
/// assert!(format_locate_human(&report).contains("GraalVM home: not found"));
/// ```
#[must_use]
pub fn format_locate_human(report: &LocateReport) -> String {
    let show = |path: Option<&Utf8PathBuf>| {
        path.map_or_else(|| "not found".to_owned(), ToString::to_string)
    };
    let discovery = if report.find_graalvm_home {
        "enabled"
    } else {
        "disabled"
    };

    format!(
        concat!(
            "GraalVM home: {}\n",
            "Auto-discovery ({}): {}\n",
            "native-image: {}\n",
            "gu: {}"
        ),
        show(report.graalvm_home.as_ref()),
        discovery,
        show(report.discovered_home.as_ref()),
        show(report.native_image.as_ref()),
        show(report.gu.as_ref()),
    )
}

/// Format a locate report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error when serialisation fails.
pub fn format_locate_json(report: &LocateReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Lines describing what a build would do.
#[must_use]
pub fn dry_run_lines(plan: &BuildPlan, executable: &Utf8Path) -> Vec<String> {
    let install = if plan.requires_install {
        "yes (gu install native-image)"
    } else {
        "no"
    };

    vec![
        "Dry run - native-image will not be invoked".to_owned(),
        String::new(),
        format!("GraalVM home: {}", plan.home),
        format!("Install native-image: {install}"),
        format!("Working directory: {}", plan.command.working_dir()),
        format!("Executable: {executable}"),
        String::new(),
        format!("Command: {}", plan.command),
    ]
}

/// Format a success message after a build.
#[must_use]
pub fn success_message(outcome: &BuildOutcome) -> String {
    if outcome.installed_native_image {
        format!(
            "Installed native-image and built {}",
            outcome.executable
        )
    } else {
        format!("Built {}", outcome.executable)
    }
}
