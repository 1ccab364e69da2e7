//! native-image CLI entrypoint.
//!
//! This binary loads `native-image.toml`, applies command-line overrides,
//! and either runs GraalVM's native-image tool or reports which installation
//! it would use.

use camino::Utf8Path;
use clap::Parser;
use graalvm_native_image::command::{CommandExecutor, SystemCommandExecutor};
use graalvm_native_image::environment::SystemEnvironment;
use graalvm_native_image::task::{NativeImageTask, expected_executable};
use native_image_cli::cli::{BuildArgs, Cli, Command, LocateArgs};
use native_image_cli::error::Result;
use native_image_cli::output::{
    LocateReport, dry_run_lines, format_locate_human, format_locate_json, success_message,
};
use native_image_cli::overrides::{apply_build_overrides, current_dir, load_project};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = current_dir().and_then(|cwd| {
        run(
            cli,
            &cwd,
            &SystemCommandExecutor,
            &mut stdout,
            &mut stderr,
        )
    });
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(
    cli: Cli,
    cwd: &Utf8Path,
    executor: &dyn CommandExecutor,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    match cli.into_command() {
        Command::Build(args) => run_build(&args, cwd, executor, stderr),
        Command::Locate(args) => run_locate(&args, cwd, stdout),
    }
}

/// Builds the executable, or describes the build in dry-run mode.
fn run_build(
    args: &BuildArgs,
    cwd: &Utf8Path,
    executor: &dyn CommandExecutor,
    stderr: &mut dyn Write,
) -> Result<()> {
    let mut project = load_project(&args.project, cwd)?;
    apply_build_overrides(&mut project.settings, args, cwd);

    let config = project.settings.to_config(&project.project_dir);
    let env = SystemEnvironment::with_properties(project.settings.properties.clone());
    let task = NativeImageTask::new(&config, &env, executor);

    if args.dry_run {
        let plan = task.plan()?;
        let executable = expected_executable(&config)?;
        for line in dry_run_lines(&plan, &executable) {
            write_stderr_line(stderr, line);
        }
        return Ok(());
    }

    if !args.quiet {
        write_stderr_line(stderr, format!("Configuration: {config}"));
    }

    let outcome = task.run()?;

    if !args.quiet {
        let tool_output = String::from_utf8_lossy(&outcome.output.stdout);
        for line in tool_output.lines() {
            write_stderr_line(stderr, line);
        }
        write_stderr_line(stderr, success_message(&outcome));
    }

    Ok(())
}

/// Prints the installation a build would use.
fn run_locate(args: &LocateArgs, cwd: &Utf8Path, stdout: &mut dyn Write) -> Result<()> {
    let project = load_project(&args.project, cwd)?;
    let config = project.settings.to_config(&project.project_dir);
    let env = SystemEnvironment::with_properties(project.settings.properties.clone());

    let report = LocateReport::resolve(&config, &env)?;
    let rendered = if args.json {
        format_locate_json(&report)?
    } else {
        format_locate_human(&report)
    };
    writeln!(stdout, "{rendered}")?;

    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
