//! CLI argument definitions for `native-image-build`.
//!
//! Flags mirror the keys of `native-image.toml` and take precedence over
//! them. Repeatable list flags append to the values from the file.

use crate::error::CliError;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Build a native executable from a Java application with GraalVM.
#[derive(Parser, Debug, Default)]
#[command(name = "native-image-build")]
#[command(version, about)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Build using native-image.toml in the current directory:\n",
    "    $ native-image-build\n\n",
    "  Discover GraalVM from PATH, JAVA_HOME or SDKMAN and pass extra flags:\n",
    "    $ native-image-build --find-graalvm-home --arg --no-fallback\n\n",
    "  Show the native-image command without running it:\n",
    "    $ native-image-build --dry-run\n\n",
    "  Report the GraalVM installation for scripts:\n",
    "    $ native-image-build locate --json",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Build arguments (used when no subcommand is given). They cannot be
    /// combined with a subcommand, whose own flags follow its name.
    #[command(flatten)]
    pub build: BuildArgs,
}

impl Cli {
    /// The subcommand to run, defaulting to `build`.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Build(self.build))
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the native executable (default when no subcommand given).
    Build(BuildArgs),

    /// Report the GraalVM installation a build would use.
    Locate(LocateArgs),
}

/// Arguments shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project directory [default: current directory].
    #[arg(short = 'C', long, value_name = "DIR")]
    pub project_dir: Option<Utf8PathBuf>,

    /// Settings file [default: <project-dir>/native-image.toml].
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// GraalVM installation root.
    #[arg(long, value_name = "DIR")]
    pub graalvm_home: Option<Utf8PathBuf>,

    /// Search PATH, JAVA_HOME, java.home and SDKMAN for GraalVM first.
    #[arg(long)]
    pub find_graalvm_home: bool,

    /// Define a system property, such as -D java.home=/opt/graalvm (repeatable).
    #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,
}

/// Arguments for the build command.
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Project and installation selection.
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Install native-image with gu when it is missing.
    #[arg(long)]
    pub install_native_image: bool,

    /// Application archive [default: the single jar in build/libs].
    #[arg(long, value_name = "FILE")]
    pub jar: Option<Utf8PathBuf>,

    /// Fully qualified main class.
    #[arg(long, value_name = "CLASS")]
    pub main_class: Option<String>,

    /// Name of the produced executable.
    #[arg(long, value_name = "NAME")]
    pub executable_name: Option<String>,

    /// Runtime classpath entry; directories contribute their jars (repeatable).
    #[arg(long = "classpath", value_name = "PATH")]
    pub classpath: Vec<Utf8PathBuf>,

    /// Extra argument passed to native-image (repeatable).
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub arguments: Vec<String>,

    /// Output directory [default: build/native-image].
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,

    /// Show the native-image command and exit without running it.
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the locate command.
#[derive(Args, Debug, Clone, Default)]
pub struct LocateArgs {
    /// Project and installation selection.
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Output in JSON format for scripting.
    #[arg(long)]
    pub json: bool,
}

/// Parses a `KEY=VALUE` property definition.
///
/// # Errors
///
/// Returns [`CliError::InvalidProperty`] when there is no `=` or the key is
/// empty.
///
/// # Examples
///
/// ```
/// use native_image_cli::cli::parse_property;
///
/// let (key, value) = parse_property("java.home=/opt/graalvm")?;
/// assert_eq!(key, "java.home");
/// assert_eq!(value, "/opt/graalvm");
/// # Ok::<(), native_image_cli::error::CliError>(())
/// ```
pub fn parse_property(input: &str) -> Result<(String, String), CliError> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.to_owned()))
        }
        _ => Err(CliError::InvalidProperty {
            input: input.to_owned(),
        }),
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
