// SPDX-License-Identifier: MIT
//
// Command-line arguments.
//
//   ace [-c FILE] [-r FILE] [-o CMDS] [-b FILE] [-q] SOURCE [TARGET]
//   ace -s SCRIPT
//   ace --explain [ITEM]
//
// SOURCE and TARGET may be `-` for standard input and output. TARGET defaults
// to SOURCE, in which case the original is first copied to `SOURCE~`.

use std::path::PathBuf;

use clap::Parser;

/// A line-oriented context editor
#[derive(Parser, Debug)]
#[command(name = "ace", version, about = "A line-oriented context editor in the ECCE tradition")]
pub struct Cli {
    /// Read commands from FILE instead of standard input
    #[arg(short, long, value_name = "FILE")]
    pub command: Option<PathBuf>,

    /// Send printed lines and messages to FILE
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Run CMDS before the first command line
    #[arg(short = 'o', long = "option", value_name = "CMDS", allow_hyphen_values = true)]
    pub option: Option<String>,

    /// Record every command line read to FILE
    #[arg(short, long, value_name = "FILE")]
    pub backup: Option<PathBuf>,

    /// Print only the version line at startup
    #[arg(short, long)]
    pub quiet: bool,

    /// Filter standard input to standard output with the commands in SCRIPT
    #[arg(
        short,
        long,
        value_name = "SCRIPT",
        conflicts_with_all = ["command", "report", "option", "backup", "quiet", "source", "target"]
    )]
    pub shell: Option<PathBuf>,

    /// Describe a command (`F`, `F-`, `%F` or a name); list all without ITEM
    #[arg(long, value_name = "ITEM", num_args = 0..=1, default_missing_value = "")]
    pub explain: Option<String>,

    /// File to edit, or `-` for standard input
    #[arg(value_name = "SOURCE", required_unless_present_any = ["shell", "explain"])]
    pub source: Option<String>,

    /// File to save to, defaults to SOURCE
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,
}

impl Cli {
    /// Source and target paths for a regular edit.
    #[must_use]
    pub fn paths(&self) -> Option<(&str, &str)> {
        let source = self.source.as_deref()?;
        Some((source, self.target.as_deref().unwrap_or(source)))
    }
}
