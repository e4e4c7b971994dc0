//! Shared front end for the md-tools binaries.
//!
//! Every binary is the same program parameterised by its [`Tool`]: read
//! standard input or the given files, run the transform, and print the
//! result or rewrite the files in place.

pub mod io;

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches, Parser, builder::RangedU64ValueParser};
use md_tools_config::Config;
use md_tools_engine::{Options, transform};

pub use md_tools_engine::Tool;

use crate::io::{InputError, read_file, read_input, write_if_changed};

#[derive(Debug, Parser)]
pub struct Args {
    /// Rewrite each file in place instead of printing the result
    #[arg(short = 'w', long = "write")]
    pub write: bool,

    /// Target line width, overriding the config file
    #[arg(long, value_name = "N", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub width: Option<usize>,

    /// Files to read; standard input when none are given
    pub files: Vec<PathBuf>,
}

/// The argument parser for `tool`. `--width` only shows up in `mdwrap`'s help.
pub fn command(tool: Tool) -> clap::Command {
    Args::command()
        .name(tool.name())
        .bin_name(tool.name())
        .about(tool.about())
        .mut_arg("width", |arg| arg.hide(tool != Tool::Wrap))
}

pub fn parse_args<I, T>(tool: Tool, argv: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command(tool).try_get_matches_from(argv)?;
    Args::from_arg_matches(&matches)
}

/// Entry point shared by every binary.
pub fn run(tool: Tool) -> ExitCode {
    init_logging();

    let args = match parse_args(tool, std::env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    match execute(tool, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{tool}: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr at `warn` unless `RUST_LOG` says otherwise.
fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}

pub fn execute(tool: Tool, args: &Args) -> anyhow::Result<()> {
    let options = options_for(tool, args)?;

    if args.write {
        if args.files.is_empty() {
            return Err(InputError::MissingFiles.into());
        }
        for path in &args.files {
            rewrite_in_place(tool, &options, path)?;
        }
        return Ok(());
    }

    let input = read_input(&args.files)?;
    let output = transform(tool, &options, &input)?;
    std::io::stdout()
        .lock()
        .write_all(&output)
        .context("writing to stdout")?;
    Ok(())
}

/// The command line width wins over the config file, which is only read
/// by the one tool that uses it.
fn options_for(tool: Tool, args: &Args) -> anyhow::Result<Options> {
    let wrap_width = match (tool, args.width) {
        (_, Some(width)) => width,
        (Tool::Wrap, None) => {
            Config::load()
                .context("loading configuration")?
                .wrap_width
        }
        _ => Options::default().wrap_width,
    };
    Ok(Options { wrap_width })
}

fn rewrite_in_place(tool: Tool, options: &Options, path: &Path) -> anyhow::Result<()> {
    let original = read_file(path)?;
    let output =
        transform(tool, options, &original).with_context(|| path.display().to_string())?;
    write_if_changed(path, &original, &output)?;
    Ok(())
}
