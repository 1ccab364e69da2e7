//! Command-line front end for GraalVM native-image builds.
//!
//! The `native-image-build` binary reads `native-image.toml` from a project
//! directory, applies command-line overrides, and either runs native-image or
//! reports where the GraalVM installation was found.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Errors surfaced by the binary
//! - [`overrides`] - Merging settings files with command-line flags
//! - [`output`] - Human and JSON rendering of results

pub mod cli;
pub mod error;
pub mod output;
pub mod overrides;
