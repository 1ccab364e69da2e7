//! Project settings loaded from `native-image.toml`.
//!
//! The file is optional. Every key falls back to its default when omitted, and
//! unknown keys are rejected so that typos surface instead of being ignored.
//! Relative paths are interpreted against the project directory when the
//! settings are turned into a [`NativeImageConfig`].
//!
//! ```toml
//! find_graalvm_home = true
//! main_class = "com.example.App"
//! executable_name = "app"
//! classpath = ["build/deps"]
//! arguments = ["--no-fallback"]
//!
//! [properties]
//! "java.home" = "/opt/graalvm"
//! ```

use crate::config::NativeImageConfig;
use crate::error::{NativeImageError, Result};
use crate::provider::{classpath_entries, existing_file, single_jar_in};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Conventional name of the settings file inside a project.
pub const SETTINGS_FILE_NAME: &str = "native-image.toml";

/// Directory searched for the application archive when `jar` is unset.
pub const DEFAULT_LIBS_DIR: &str = "build/libs";

/// Output directory used when `output_dir` is unset.
pub const DEFAULT_OUTPUT_DIR: &str = "build/native-image";

/// Contents of `native-image.toml`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NativeImageSettings {
    /// Explicit GraalVM installation root.
    pub graalvm_home: Option<Utf8PathBuf>,
    /// Search the environment for an installation before using
    /// `graalvm_home`.
    pub find_graalvm_home: bool,
    /// Install native-image through `gu` when it is missing.
    pub install_native_image: bool,
    /// Application archive. Defaults to the single `*.jar` in `build/libs`.
    pub jar: Option<Utf8PathBuf>,
    /// Application entry point.
    pub main_class: Option<String>,
    /// Name of the produced executable.
    pub executable_name: Option<String>,
    /// Runtime classpath entries; directories contribute their jars.
    pub classpath: Vec<Utf8PathBuf>,
    /// Extra native-image arguments.
    pub arguments: Vec<String>,
    /// Where the executable is written. Defaults to `build/native-image`.
    pub output_dir: Option<Utf8PathBuf>,
    /// System properties visible to home resolution, such as `java.home`.
    pub properties: BTreeMap<String, String>,
}

impl NativeImageSettings {
    /// Parses settings from TOML source.
    ///
    /// # Errors
    ///
    /// Returns the parser error when the source is malformed or contains
    /// unknown keys.
    pub fn from_toml_str(source: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Reads and parses the settings file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NativeImageError::Io`] when the file cannot be read and
    /// [`NativeImageError::InvalidSettings`] when it cannot be parsed.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let settings =
            Self::from_toml_str(&source).map_err(|e| NativeImageError::InvalidSettings {
                path: path.to_owned(),
                reason: e.message().to_owned(),
            })?;
        debug!("loaded settings from {path}");
        Ok(settings)
    }

    /// Like [`Self::load`], but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Utf8Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("no settings file at {path}; using defaults");
            Ok(Self::default())
        }
    }

    /// Builds a configuration for the project rooted at `project_dir`.
    ///
    /// Archive and classpath lookups are deferred; nothing is read from disk
    /// until the build asks for them.
    #[must_use]
    pub fn to_config(&self, project_dir: &Utf8Path) -> NativeImageConfig {
        let mut config = NativeImageConfig::new();

        if let Some(home) = &self.graalvm_home {
            config.set_graalvm_home(project_dir.join(home));
        }
        config.set_find_graalvm_home(self.find_graalvm_home);
        config.set_install_native_image(self.install_native_image);

        config.set_jar(self.jar.as_ref().map_or_else(
            || single_jar_in(project_dir.join(DEFAULT_LIBS_DIR)),
            |jar| existing_file(project_dir.join(jar)),
        ));
        if !self.classpath.is_empty() {
            config.set_runtime_classpath(classpath_entries(
                self.classpath
                    .iter()
                    .map(|entry| project_dir.join(entry))
                    .collect(),
            ));
        }

        if let Some(main_class) = &self.main_class {
            config.set_main_class(main_class);
        }
        if let Some(name) = &self.executable_name {
            config.set_executable_name(name);
        }
        config.add_arguments(&self.arguments);
        let output_dir = self
            .output_dir
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_OUTPUT_DIR));
        config.set_output_dir(project_dir.join(output_dir));

        config
    }
}
