mod commands;
mod config;
mod error;
mod paths;

use std::fs::{self, File};
use std::io;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use log::LevelFilter;
use simplelog::{Config as LogConfig, WriteLogger};

use crate::commands::{Cli, Command};
use crate::config::Config;
use crate::error::CliError;

/// Start file logging in the cache directory, if there is one.
fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| CliError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    paths::rotate_logs();
    let log_file = File::create(&path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    WriteLogger::init(level, LogConfig::default(), log_file)?;
    Ok(())
}

fn run() -> Result<ExitCode, CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(ExitCode::SUCCESS);
            }
            _ => return Err(err.into()),
        },
    };

    let config = Config::load(paths::config_file().as_deref())?;
    if let Err(e) = init_logging(config.log_level.into()) {
        eprintln!("Warning: file logging disabled: {}", e);
    }
    log::debug!("Running {:?} with {:?}", cli.command, config);

    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Rules => {
            commands::write_rules(&mut stdout).map_err(CliError::Output)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check(opts) => {
            let report = commands::check(&opts, &config)?;
            commands::write_report(&mut stdout, &report, opts.json).map_err(CliError::Output)?;
            Ok(if report.is_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(CliError::Usage(rendered)) => {
            eprint!("{rendered}");
            ExitCode::from(2)
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
