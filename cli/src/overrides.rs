//! Merges `native-image.toml` with command-line flags.
//!
//! Paths given on the command line are relative to the current directory;
//! paths in the settings file are relative to the project directory. Flags
//! are anchored to the current directory here so that both end up absolute
//! once the settings are turned into a build configuration.

use crate::cli::{BuildArgs, ProjectArgs};
use crate::error::{CliError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use graalvm_native_image::settings::{NativeImageSettings, SETTINGS_FILE_NAME};
use log::debug;

/// Project location plus the merged settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    /// Absolute project directory.
    pub project_dir: Utf8PathBuf,
    /// Settings after command-line overrides.
    pub settings: NativeImageSettings,
}

/// Returns the current directory as UTF-8.
///
/// # Errors
///
/// Returns an error when the directory cannot be read or is not valid UTF-8.
pub fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|e| CliError::NonUtf8CurrentDir {
        path: e.into_path_buf().display().to_string(),
    })
}

/// Loads the settings for `project` and applies its overrides.
///
/// An explicit `--config` file must exist; the default
/// `<project-dir>/native-image.toml` is optional.
///
/// # Errors
///
/// Returns an error when the settings file cannot be read or parsed.
pub fn load_project(project: &ProjectArgs, cwd: &Utf8Path) -> Result<ProjectSettings> {
    let project_dir = project
        .project_dir
        .as_ref()
        .map_or_else(|| cwd.to_owned(), |dir| cwd.join(dir));

    let mut settings = project.config.as_ref().map_or_else(
        || NativeImageSettings::load_or_default(&project_dir.join(SETTINGS_FILE_NAME)),
        |path| NativeImageSettings::load(&cwd.join(path)),
    )?;
    apply_project_overrides(&mut settings, project, cwd);
    debug!("project {project_dir} settings: {settings:?}");

    Ok(ProjectSettings {
        project_dir,
        settings,
    })
}

/// Applies installation and property flags.
pub fn apply_project_overrides(
    settings: &mut NativeImageSettings,
    project: &ProjectArgs,
    cwd: &Utf8Path,
) {
    if let Some(home) = &project.graalvm_home {
        settings.graalvm_home = Some(cwd.join(home));
    }
    if project.find_graalvm_home {
        settings.find_graalvm_home = true;
    }
    settings
        .properties
        .extend(project.properties.iter().cloned());
}

/// Applies build flags. Scalar flags replace file values and list flags
/// append to them.
pub fn apply_build_overrides(settings: &mut NativeImageSettings, args: &BuildArgs, cwd: &Utf8Path) {
    if args.install_native_image {
        settings.install_native_image = true;
    }
    if let Some(jar) = &args.jar {
        settings.jar = Some(cwd.join(jar));
    }
    if let Some(main_class) = &args.main_class {
        settings.main_class = Some(main_class.clone());
    }
    if let Some(name) = &args.executable_name {
        settings.executable_name = Some(name.clone());
    }
    if let Some(dir) = &args.output_dir {
        settings.output_dir = Some(cwd.join(dir));
    }
    settings
        .classpath
        .extend(args.classpath.iter().map(|entry| cwd.join(entry)));
    settings.arguments.extend(args.arguments.iter().cloned());
}
