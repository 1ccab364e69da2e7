//! Declarative settings for a native-image build.
//!
//! [`NativeImageConfig`] is filled in by the host before a build runs and is
//! only read afterwards. The archive and classpath are held as
//! [`Provider`]s and resolved each time they are read, because the host
//! usually produces those files after the configuration is declared.

use crate::environment::{EnvironmentProbe, JAVA_HOME_PROPERTY};
use crate::error::{NativeImageError, Result};
use crate::home::GraalVmHome;
use crate::provider::{Provider, empty_classpath};
use crate::resolver::{HomeResolver, absolute};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fmt;

/// A value accepted by [`NativeImageConfig::add_arguments`].
///
/// Absent and empty values are discarded.
pub trait IntoArgument {
    /// Converts the value, returning `None` when it should be skipped.
    fn into_argument(self) -> Option<String>;
}

impl IntoArgument for &str {
    fn into_argument(self) -> Option<String> {
        (!self.is_empty()).then(|| self.to_owned())
    }
}

impl IntoArgument for String {
    fn into_argument(self) -> Option<String> {
        (!self.is_empty()).then_some(self)
    }
}

impl IntoArgument for &String {
    fn into_argument(self) -> Option<String> {
        self.as_str().into_argument()
    }
}

impl<T: IntoArgument> IntoArgument for Option<T> {
    fn into_argument(self) -> Option<String> {
        self.and_then(IntoArgument::into_argument)
    }
}

/// Settings for one native-image build.
///
/// # Examples
///
/// ```
/// use graalvm_native_image::config::NativeImageConfig;
///
/// let mut config = NativeImageConfig::new();
/// config.set_main_class("com.example.App");
/// config.set_executable_name("app");
/// config.add_arguments(["", "--no-fallback"]);
/// config.add_arguments([None, Some("-Xmx2g")]);
///
/// assert_eq!(config.additional_arguments(), ["--no-fallback", "-Xmx2g"]);
/// ```
pub struct NativeImageConfig {
    graalvm_home: Option<Utf8PathBuf>,
    find_graalvm_home: bool,
    install_native_image: bool,
    jar: Option<Provider<Utf8PathBuf>>,
    main_class: Option<String>,
    executable_name: Option<String>,
    runtime_classpath: Provider<Vec<Utf8PathBuf>>,
    additional_arguments: Vec<String>,
    output_dir: Option<Utf8PathBuf>,
}

impl Default for NativeImageConfig {
    fn default() -> Self {
        Self {
            graalvm_home: None,
            find_graalvm_home: false,
            install_native_image: false,
            jar: None,
            main_class: None,
            executable_name: None,
            runtime_classpath: empty_classpath(),
            additional_arguments: Vec::new(),
            output_dir: None,
        }
    }
}

impl NativeImageConfig {
    /// Creates a configuration with discovery and installation disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `home` as the explicit GraalVM installation.
    pub fn set_graalvm_home(&mut self, home: impl Into<Utf8PathBuf>) {
        self.graalvm_home = Some(home.into());
    }

    /// Enables or disables auto-discovery of the GraalVM home.
    pub const fn set_find_graalvm_home(&mut self, enabled: bool) {
        self.find_graalvm_home = enabled;
    }

    /// Enables or disables installing native-image through `gu`.
    pub const fn set_install_native_image(&mut self, enabled: bool) {
        self.install_native_image = enabled;
    }

    /// Sets the deferred lookup for the application archive.
    pub fn set_jar(&mut self, provider: Provider<Utf8PathBuf>) {
        self.jar = Some(provider);
    }

    /// Sets the application entry point.
    pub fn set_main_class(&mut self, main_class: impl Into<String>) {
        self.main_class = Some(main_class.into());
    }

    /// Sets the name of the produced executable.
    pub fn set_executable_name(&mut self, name: impl Into<String>) {
        self.executable_name = Some(name.into());
    }

    /// Sets the deferred lookup for runtime classpath entries.
    pub fn set_runtime_classpath(&mut self, provider: Provider<Vec<Utf8PathBuf>>) {
        self.runtime_classpath = provider;
    }

    /// Sets the directory the executable is written to.
    pub fn set_output_dir(&mut self, dir: impl Into<Utf8PathBuf>) {
        self.output_dir = Some(dir.into());
    }

    /// Appends extra native-image arguments in call order.
    ///
    /// Absent and empty values are dropped; duplicates are kept.
    pub fn add_arguments<I>(&mut self, arguments: I)
    where
        I: IntoIterator,
        I::Item: IntoArgument,
    {
        self.additional_arguments
            .extend(arguments.into_iter().filter_map(IntoArgument::into_argument));
    }

    /// Explicitly configured home, if any.
    #[must_use]
    pub fn configured_graalvm_home(&self) -> Option<&Utf8Path> {
        self.graalvm_home.as_deref()
    }

    /// Whether auto-discovery is requested.
    #[must_use]
    pub const fn find_graalvm_home(&self) -> bool {
        self.find_graalvm_home
    }

    /// Whether a missing native-image should be installed.
    #[must_use]
    pub const fn install_native_image(&self) -> bool {
        self.install_native_image
    }

    /// Resolves the GraalVM installation to build with.
    ///
    /// With auto-discovery enabled the environment is searched first. When
    /// discovery is disabled or finds nothing, the explicit home is used,
    /// defaulting to the `java.home` property. Relative paths are anchored to
    /// the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`NativeImageError::HomeNotConfigured`] when no home can be
    /// determined.
    pub fn resolve_home(&self, probe: &dyn EnvironmentProbe) -> Result<GraalVmHome> {
        if self.find_graalvm_home {
            if let Some(home) = HomeResolver::new(probe).resolve() {
                return Ok(home);
            }
            debug!("auto-discovery found no GraalVM home; using configured home");
        }

        self.graalvm_home
            .clone()
            .or_else(|| probe.property(JAVA_HOME_PROPERTY).map(Utf8PathBuf::from))
            .map(|root| GraalVmHome::new(absolute(&root)))
            .ok_or(NativeImageError::HomeNotConfigured)
    }

    /// Resolves the application archive from its provider.
    ///
    /// # Errors
    ///
    /// Returns an error when no provider was set or the archive is
    /// unavailable.
    pub fn jar_file(&self) -> Result<Utf8PathBuf> {
        let provider = self
            .jar
            .as_ref()
            .ok_or(NativeImageError::MissingSetting { setting: "jar" })?;
        provider()
    }

    /// Resolves the runtime classpath from its provider.
    ///
    /// # Errors
    ///
    /// Returns an error when an entry cannot be resolved.
    pub fn runtime_classpath(&self) -> Result<Vec<Utf8PathBuf>> {
        (self.runtime_classpath)()
    }

    /// The application entry point.
    ///
    /// # Errors
    ///
    /// Returns [`NativeImageError::MissingSetting`] when unset.
    pub fn main_class(&self) -> Result<&str> {
        self.main_class
            .as_deref()
            .ok_or(NativeImageError::MissingSetting {
                setting: "main_class",
            })
    }

    /// The name of the produced executable.
    ///
    /// # Errors
    ///
    /// Returns [`NativeImageError::MissingSetting`] when unset.
    pub fn executable_name(&self) -> Result<&str> {
        self.executable_name
            .as_deref()
            .ok_or(NativeImageError::MissingSetting {
                setting: "executable_name",
            })
    }

    /// The directory the executable is written to.
    ///
    /// # Errors
    ///
    /// Returns [`NativeImageError::MissingSetting`] when unset.
    pub fn output_dir(&self) -> Result<&Utf8Path> {
        self.output_dir
            .as_deref()
            .ok_or(NativeImageError::MissingSetting {
                setting: "output_dir",
            })
    }

    /// Extra arguments in insertion order.
    #[must_use]
    pub fn additional_arguments(&self) -> &[String] {
        &self.additional_arguments
    }
}

fn show<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "<unset>".to_owned(), |v| v.to_string())
}

impl fmt::Debug for NativeImageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeImageConfig")
            .field("graalvm_home", &self.graalvm_home)
            .field("find_graalvm_home", &self.find_graalvm_home)
            .field("install_native_image", &self.install_native_image)
            .field("jar", &self.jar.as_ref().map(|_| "<deferred>"))
            .field("main_class", &self.main_class)
            .field("executable_name", &self.executable_name)
            .field("runtime_classpath", &"<deferred>")
            .field("additional_arguments", &self.additional_arguments)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl fmt::Display for NativeImageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            concat!(
                "NativeImageConfig{{graalvm_home={}, find_graalvm_home={}, ",
                "install_native_image={}, main_class={}, executable_name={}, ",
                "arguments=[{}], output_dir={}}}"
            ),
            show(self.graalvm_home.as_deref()),
            self.find_graalvm_home,
            self.install_native_image,
            show(self.main_class.as_deref()),
            show(self.executable_name.as_deref()),
            self.additional_arguments.join(", "),
            show(self.output_dir.as_deref()),
        )
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
