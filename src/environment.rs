//! Read-only access to environment variables and system properties.
//!
//! Home discovery never reads the process environment directly. It goes
//! through [`EnvironmentProbe`] so that tests can supply an
//! [`EnvironmentSnapshot`] instead of mutating real variables.

use std::collections::BTreeMap;

/// Path-list variable searched first during discovery.
pub const PATH_VARIABLE: &str = "PATH";

/// Variable naming the active Java installation.
pub const JAVA_HOME_VARIABLE: &str = "JAVA_HOME";

/// Variable naming SDKMAN's candidates directory.
pub const SDKMAN_CANDIDATES_VARIABLE: &str = "SDKMAN_CANDIDATES_DIR";

/// System property naming the running Java installation.
pub const JAVA_HOME_PROPERTY: &str = "java.home";

/// Source of environment variables and system properties.
#[cfg_attr(test, mockall::automock)]
pub trait EnvironmentProbe {
    /// Returns the value of an environment variable, if set.
    fn env(&self, name: &str) -> Option<String>;

    /// Returns the value of a system property, if set.
    fn property(&self, name: &str) -> Option<String>;
}

/// Probe backed by the current process environment.
///
/// Rust processes have no system properties of their own, so the host
/// supplies them at construction (typically from `-D key=value` flags or the
/// `[properties]` table of `native-image.toml`).
#[derive(Debug, Clone, Default)]
pub struct SystemEnvironment {
    properties: BTreeMap<String, String>,
}

impl SystemEnvironment {
    /// Creates a probe with no system properties.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a probe answering property lookups from `properties`.
    #[must_use]
    pub const fn with_properties(properties: BTreeMap<String, String>) -> Self {
        Self { properties }
    }
}

impl EnvironmentProbe for SystemEnvironment {
    fn env(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }
}

/// Immutable set of variables and properties.
///
/// # Examples
///
/// ```
/// use graalvm_native_image::environment::{EnvironmentProbe, EnvironmentSnapshot};
///
/// let snapshot = EnvironmentSnapshot::new()
///     .with_env("JAVA_HOME", "/opt/graal")
///     .with_property("java.home", "/usr/lib/jvm/default");
///
/// assert_eq!(snapshot.env("JAVA_HOME").as_deref(), Some("/opt/graal"));
/// assert_eq!(snapshot.env("PATH"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct EnvironmentSnapshot {
    variables: BTreeMap<String, String>,
    properties: BTreeMap<String, String>,
}

impl EnvironmentSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the snapshot with `name` set to `value`.
    #[must_use]
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Returns a copy of the snapshot with property `name` set to `value`.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Captures every signal that home discovery consults from `probe`.
    #[must_use]
    pub fn capture(probe: &dyn EnvironmentProbe) -> Self {
        let variables = [PATH_VARIABLE, JAVA_HOME_VARIABLE, SDKMAN_CANDIDATES_VARIABLE]
            .into_iter()
            .filter_map(|name| probe.env(name).map(|value| (name.to_owned(), value)))
            .collect();
        let properties = probe
            .property(JAVA_HOME_PROPERTY)
            .map(|value| (JAVA_HOME_PROPERTY.to_owned(), value))
            .into_iter()
            .collect();

        Self {
            variables,
            properties,
        }
    }

    /// Captured environment variables.
    #[must_use]
    pub const fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Captured system properties.
    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

impl EnvironmentProbe for EnvironmentSnapshot {
    fn env(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }

    fn property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }
}
