use crate::cli::{CreateArgs, FromFileArgs, ReleaseOptions};
use crate::config::{self, ResolvedConfig};
use crate::template;
use crate::version::ReleaseTag;
use crate::version_source;
use anyhow::{Context, Result};
use log::debug;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

pub fn run_from_file(args: FromFileArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine current directory.")?;
    let mut runner = SystemShell;
    let mut stdout = io::stdout();
    run_from_file_with_runner(&cwd, &args, &mut runner, &mut stdout)
}

pub fn run_create(args: CreateArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine current directory.")?;
    let mut runner = SystemShell;
    let mut stdout = io::stdout();
    run_create_with_runner(&cwd, args, &mut runner, &mut stdout)
}

pub(crate) fn run_from_file_with_runner(
    cwd: &Path,
    args: &FromFileArgs,
    runner: &mut dyn ShellRunner,
    out: &mut dyn Write,
) -> Result<()> {
    let config = load_config(cwd, &args.options)?;
    let version_file = args
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.version_file));
    let version_path = cwd.join(&version_file);

    let version = version_source::read_version(&version_path, &config.version_key)?;
    match &version {
        Some(version) => debug!(
            "read version `{version}` from `{}`",
            version_path.display()
        ),
        None => debug!(
            "no `{}` line found in `{}`",
            config.version_key,
            version_path.display()
        ),
    }

    let tag = ReleaseTag::from_file_version(version.as_deref());
    create_release(cwd, &tag, &config, &args.options, runner, out)
}

pub(crate) fn run_create_with_runner(
    cwd: &Path,
    args: CreateArgs,
    runner: &mut dyn ShellRunner,
    out: &mut dyn Write,
) -> Result<()> {
    let version = version_source::from_argument(args.version)?;
    let config = load_config(cwd, &args.options)?;
    let tag = ReleaseTag::new(version);
    create_release(cwd, &tag, &config, &args.options, runner, out)
}

fn load_config(cwd: &Path, options: &ReleaseOptions) -> Result<ResolvedConfig> {
    let config = config::load(options.config.as_deref(), cwd)?;
    for warning in &config.warnings {
        eprintln!("warning: {warning}");
    }
    match config.source.path() {
        Some(path) => debug!("loaded config from `{}`", path.display()),
        None => debug!("no config file found, using defaults"),
    }
    Ok(config)
}

fn create_release(
    cwd: &Path,
    tag: &ReleaseTag,
    config: &ResolvedConfig,
    options: &ReleaseOptions,
    runner: &mut dyn ShellRunner,
    out: &mut dyn Write,
) -> Result<()> {
    if let Err(err) = tag.validate() {
        if config.strict || options.strict {
            return Err(err.into());
        }
        writeln!(out, "{err}")?;
    }

    let command = template::render_command(&config.command_template, tag.as_str())?;
    debug!("release command: {command}");

    if options.dry_run {
        writeln!(out, "Dry run: would run `{command}`")?;
        return Ok(());
    }

    writeln!(out, "Creating release {tag}...")?;
    out.flush()?;

    // The release tool reports its own failures; its status never changes ours.
    match runner.run(cwd, &command)? {
        Some(0) => debug!("release command succeeded"),
        Some(code) => debug!("release command exited with status {code}"),
        None => debug!("release command was terminated by a signal"),
    }

    writeln!(out, "Done!")?;
    Ok(())
}

/// Runs a command line through the platform shell and returns its exit code.
pub trait ShellRunner {
    fn run(&mut self, cwd: &Path, command: &str) -> Result<Option<i32>>;
}

struct SystemShell;

impl ShellRunner for SystemShell {
    fn run(&mut self, cwd: &Path, command: &str) -> Result<Option<i32>> {
        let status = shell_command(command)
            .current_dir(cwd)
            .status()
            .context("Failed to start the system shell.")?;
        Ok(status.code())
    }
}

fn shell_command(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}
