//! Command-line argument parsing for SnakeEditor.
//!
//! `snake-editor [OPTIONS] [FILE]`

use crate::config::{Config, ConfigValue};
use std::path::PathBuf;

/// Command-line interface configuration.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Cli {
    /// File to open at startup
    pub file: Option<PathBuf>,

    /// Log file path override
    pub log_file: Option<PathBuf>,

    /// Color theme override
    pub theme: Option<String>,

    /// Print usage and exit
    pub help: bool,

    /// Print version and exit
    pub version: bool,
}

pub const USAGE: &str = "\
SnakeEditor - a minimal text editor

Usage: snake-editor [OPTIONS] [FILE]

Options:
  -h, --help            Show this help message
  -V, --version         Show version information
  -t, --theme NAME      Set color theme (dark, light)
      --log-file PATH   Write logs to PATH

Environment:
  RUST_LOG              Log filter (default: info)";

impl Cli {
    /// Parse the process arguments.
    pub fn parse() -> Result<Self, Box<dyn std::error::Error>> {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse arguments, excluding the program name.
    pub fn parse_from(
        args: impl IntoIterator<Item = String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut cli = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => cli.help = true,
                "-V" | "--version" => cli.version = true,
                "--log-file" => {
                    if let Some(path) = args.next() {
                        cli.log_file = Some(PathBuf::from(path));
                    } else {
                        return Err("--log-file requires a value".into());
                    }
                }
                "-t" | "--theme" => {
                    if let Some(t) = args.next() {
                        cli.theme = Some(t);
                    } else {
                        return Err("--theme requires a value".into());
                    }
                }
                arg if arg.starts_with('-') && arg != "-" => {
                    return Err(format!("Unknown flag: {}. Use --help for usage.", arg).into());
                }
                _ => {
                    if cli.file.is_some() {
                        return Err("Only one FILE may be given. Use --help for usage.".into());
                    }
                    cli.file = Some(PathBuf::from(arg));
                }
            }
        }

        Ok(cli)
    }

    /// Files to open, in order
    pub fn files(&self) -> Vec<PathBuf> {
        self.file.iter().cloned().collect()
    }

    /// Apply CLI overrides to a configuration object.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(theme) = &self.theme {
            config.set("theme", ConfigValue::String(theme.clone()));
        }
    }
}
