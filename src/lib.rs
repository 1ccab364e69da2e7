//! Locate a GraalVM installation and drive `native-image` builds.
//!
//! The crate is split along the steps of a build:
//!
//! - [`resolver`] searches the environment for an installation root.
//! - [`home`] answers questions about one installation.
//! - [`config`] and [`settings`] describe what to build.
//! - [`task`] assembles and runs the native-image invocation.
//!
//! Processes are spawned only through [`command::CommandExecutor`] and the
//! environment is read only through [`environment::EnvironmentProbe`], so
//! hosts and tests can substitute both.
//!
//! # Examples
//!
//! ```no_run
//! use graalvm_native_image::command::SystemCommandExecutor;
//! use graalvm_native_image::environment::SystemEnvironment;
//! use graalvm_native_image::settings::NativeImageSettings;
//! use graalvm_native_image::task::NativeImageTask;
//! use camino::Utf8Path;
//!
//! let project = Utf8Path::new("/work/app");
//! let settings = NativeImageSettings::load_or_default(&project.join("native-image.toml"))?;
//! let config = settings.to_config(project);
//! let env = SystemEnvironment::with_properties(settings.properties.clone());
//!
//! let outcome = NativeImageTask::new(&config, &env, &SystemCommandExecutor).run()?;
//! println!("built {}", outcome.executable);
//! # Ok::<(), graalvm_native_image::error::NativeImageError>(())
//! ```

pub mod command;
pub mod config;
pub mod environment;
pub mod error;
pub mod home;
pub mod provider;
pub mod resolver;
pub mod settings;
pub mod task;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use config::NativeImageConfig;
pub use error::{NativeImageError, Result};
pub use home::GraalVmHome;
pub use resolver::HomeResolver;
pub use task::NativeImageTask;
