//! native-image build orchestration.
//!
//! A [`NativeImageTask`] turns a [`NativeImageConfig`] into a single
//! invocation:
//!
//! ```text
//! <home>/bin/native-image -cp <jar>[:<classpath>...] -H:Name=<name> <main-class> [args...]
//! ```
//!
//! The process runs inside the output directory, so the executable lands
//! there. Configuration problems are reported before anything is spawned,
//! and a failed build is reported once with its captured output; it is never
//! retried.

use crate::command::{CommandExecutor, ResolvedCommand, failure_message};
use crate::config::NativeImageConfig;
use crate::environment::EnvironmentProbe;
use crate::error::{NativeImageError, Result};
use crate::home::{GraalVmHome, NATIVE_IMAGE};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::process::Output;

/// Component installed through `gu` when native-image is missing.
pub const NATIVE_IMAGE_COMPONENT: &str = "native-image";

/// Separator between classpath entries on this platform.
pub const CLASSPATH_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// What a build would do, computed without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    /// Installation the build uses.
    pub home: GraalVmHome,
    /// Whether native-image must be installed first.
    pub requires_install: bool,
    /// The native-image invocation.
    pub command: ResolvedCommand,
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Invocation that produced the executable.
    pub command: ResolvedCommand,
    /// Path of the produced executable.
    pub executable: Utf8PathBuf,
    /// Whether native-image was installed during this build.
    pub installed_native_image: bool,
    /// Captured output of the native-image process.
    pub output: Output,
}

/// Runs native-image for one configuration.
pub struct NativeImageTask<'a> {
    config: &'a NativeImageConfig,
    probe: &'a dyn EnvironmentProbe,
    executor: &'a dyn CommandExecutor,
}

impl<'a> NativeImageTask<'a> {
    /// Creates a task reading `config`, resolving homes through `probe`, and
    /// spawning processes through `executor`.
    #[must_use]
    pub const fn new(
        config: &'a NativeImageConfig,
        probe: &'a dyn EnvironmentProbe,
        executor: &'a dyn CommandExecutor,
    ) -> Self {
        Self {
            config,
            probe,
            executor,
        }
    }

    /// Resolves everything a build needs without spawning any process.
    ///
    /// When native-image is absent but installation is enabled, the plan
    /// points at the path `gu` will install it to.
    ///
    /// # Errors
    ///
    /// Returns an error when the home, a required setting, or an input
    /// cannot be resolved, or when native-image is absent and installation
    /// is disabled.
    pub fn plan(&self) -> Result<BuildPlan> {
        let home = self.config.resolve_home(self.probe)?;
        let arguments = self.arguments()?;

        let (native_image, requires_install) = match home.native_image() {
            Some(path) => (path, false),
            None if self.config.install_native_image() => {
                home.gu()?;
                (home.binary_path(NATIVE_IMAGE), true)
            }
            None => {
                return Err(NativeImageError::NativeImageNotFound {
                    home: home.root().to_owned(),
                });
            }
        };

        let command = ResolvedCommand::new(native_image, arguments, self.config.output_dir()?);
        Ok(BuildPlan {
            home,
            requires_install,
            command,
        })
    }

    /// Runs the build described by [`Self::plan`].
    ///
    /// # Errors
    ///
    /// Returns an error when resolution fails, when native-image cannot be
    /// installed, or when native-image exits unsuccessfully.
    pub fn run(&self) -> Result<BuildOutcome> {
        let BuildPlan {
            home,
            requires_install,
            command,
        } = self.plan()?;
        info!("using GraalVM home {home}");

        let command = if requires_install {
            self.install_native_image(&home, &command)?
        } else {
            command
        };
        let executable_name = self.config.executable_name()?;

        std::fs::create_dir_all(command.working_dir())?;
        info!("building {executable_name}: {command}");

        let output = self.executor.run(&command)?;
        if !output.status.success() {
            return Err(NativeImageError::BuildFailed {
                executable_name: executable_name.to_owned(),
                status: output.status,
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                message: failure_message(&output),
            });
        }

        Ok(BuildOutcome {
            executable: expected_executable(self.config)?,
            command,
            installed_native_image: requires_install,
            output,
        })
    }

    /// Native-image arguments, resolving the archive and classpath providers.
    ///
    /// # Errors
    ///
    /// Returns an error when a required setting is unset or an input cannot
    /// be resolved.
    pub fn arguments(&self) -> Result<Vec<String>> {
        let main_class = self.config.main_class()?;
        let executable_name = self.config.executable_name()?;

        let mut classpath = vec![self.config.jar_file()?];
        classpath.extend(self.config.runtime_classpath()?);

        Ok(native_image_arguments(
            &join_classpath(&classpath)?,
            executable_name,
            main_class,
            self.config.additional_arguments(),
        ))
    }

    // `gu` may install the `.cmd` variant rather than the planned path.
    fn install_native_image(
        &self,
        home: &GraalVmHome,
        planned: &ResolvedCommand,
    ) -> Result<ResolvedCommand> {
        install_component(self.executor, home, NATIVE_IMAGE_COMPONENT)?;
        let native_image = home
            .native_image()
            .ok_or_else(|| NativeImageError::NativeImageNotFound {
                home: home.root().to_owned(),
            })?;
        Ok(ResolvedCommand::new(
            native_image,
            planned.args().to_vec(),
            planned.working_dir(),
        ))
    }
}

/// Installs `component` with the installation's component manager.
///
/// # Errors
///
/// Returns [`NativeImageError::InvalidInstallation`] when `gu` is missing and
/// [`NativeImageError::ComponentInstallFailed`] when it exits unsuccessfully.
pub fn install_component(
    executor: &dyn CommandExecutor,
    home: &GraalVmHome,
    component: &'static str,
) -> Result<()> {
    let gu = home.gu()?;
    info!("installing {component} with {gu}");

    let command = ResolvedCommand::new(
        gu.clone(),
        vec!["install".to_owned(), component.to_owned()],
        home.root(),
    );
    let output = executor.run(&command)?;

    if output.status.success() {
        debug!("{component} installed into {home}");
        return Ok(());
    }

    Err(NativeImageError::ComponentInstallFailed {
        component,
        gu,
        message: failure_message(&output),
    })
}

/// Assembles the native-image argument vector.
///
/// # Examples
///
/// ```
/// use graalvm_native_image::task::native_image_arguments;
///
/// let args = native_image_arguments("app.jar", "app", "com.example.App", &["--no-fallback".to_owned()]);
/// assert_eq!(args, ["-cp", "app.jar", "-H:Name=app", "com.example.App", "--no-fallback"]);
/// ```
#[must_use]
pub fn native_image_arguments(
    classpath: &str,
    executable_name: &str,
    main_class: &str,
    extra: &[String],
) -> Vec<String> {
    let mut args = vec![
        "-cp".to_owned(),
        classpath.to_owned(),
        format!("-H:Name={executable_name}"),
        main_class.to_owned(),
    ];
    args.extend(extra.iter().cloned());
    args
}

/// Joins classpath entries with [`CLASSPATH_SEPARATOR`].
///
/// # Errors
///
/// Returns [`NativeImageError::InvalidClasspathEntry`] when an entry contains
/// the separator.
pub fn join_classpath(entries: &[Utf8PathBuf]) -> Result<String> {
    if let Some(entry) = entries
        .iter()
        .find(|entry| entry.as_str().contains(CLASSPATH_SEPARATOR))
    {
        return Err(NativeImageError::InvalidClasspathEntry {
            path: entry.clone(),
            reason: format!("contains the classpath separator '{CLASSPATH_SEPARATOR}'"),
        });
    }

    Ok(entries
        .iter()
        .map(|entry| entry.as_str())
        .collect::<Vec<_>>()
        .join(&CLASSPATH_SEPARATOR.to_string()))
}

/// File name native-image gives an executable called `name`.
#[must_use]
pub fn executable_file_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_owned()
    }
}

/// Location of the executable a build would produce.
///
/// # Errors
///
/// Returns [`NativeImageError::MissingSetting`] when the output directory or
/// executable name is unset.
pub fn expected_executable(config: &NativeImageConfig) -> Result<Utf8PathBuf> {
    Ok(config
        .output_dir()
        .map(Utf8Path::to_path_buf)?
        .join(executable_file_name(config.executable_name()?)))
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
