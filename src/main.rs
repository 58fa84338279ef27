// SPDX-License-Identifier: MIT
//
// ace — a line-oriented context editor.
//
// This is the main binary that wires together the two crates:
//
//   ace-term → tty queries, terminal width, SIGINT/SIGTERM delivery
//   ace-core → session, parser, command model, buffer, interpreter
//
// A run goes:
//
//   arguments → session (settings, line source, report stream)
//             → load SOURCE → `-o` commands → first print
//             → read/execute loop → save TARGET (or a temporary file)
//
// Everything the user sees except saved text to `-` goes to the report
// stream, which is standard error unless `-r` names a file.

mod cli;
mod input;

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::Path;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ace_core::buffer::save_report;
use ace_core::session::exit;
use ace_core::{Buffer, Interpreter, LineSource, ReaderSource, Session, Settings, help};
use ace_term::signal::{self, SignalTargets};
use ace_term::terminal::{self, Stream};

use crate::cli::Cli;
use crate::input::Prompter;

// ─── Setup ──────────────────────────────────────────────────────────────────

/// Log to stderr, filtered by `RUST_LOG` (default `error`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(terminal::is_tty(Stream::Stderr))
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}

/// Where command lines come from: the shell script, the `-c` file, or an
/// interactive prompt on stdin.
fn line_source(cli: &Cli) -> anyhow::Result<Box<dyn LineSource>> {
    let Some(path) = cli.shell.as_ref().or(cli.command.as_ref()) else {
        return Ok(Box::new(Prompter::stdin()));
    };
    let file = File::open(path).with_context(|| format!("cannot open command file {}", path.display()))?;
    Ok(Box::new(ReaderSource::new(BufReader::new(file))))
}

fn open_for_writing(path: &Path, what: &str) -> anyhow::Result<File> {
    File::create(path).with_context(|| format!("cannot open {what} {}", path.display()))
}

/// The report stream: discarded in shell mode, the `-r` file when it can be
/// created, stderr otherwise.
fn diagnostics(cli: &Cli) -> Box<dyn Write> {
    if cli.shell.is_some() {
        return Box::new(io::sink());
    }
    if let Some(path) = &cli.report {
        match open_for_writing(path, "report file") {
            Ok(file) => return Box::new(file),
            Err(err) => eprintln!("ace: {err:#}"),
        }
    }
    Box::new(io::stderr())
}

fn settings(cli: &Cli) -> Settings {
    let mut settings = Settings::default();
    if cli.shell.is_none() && cli.report.is_none() && terminal::is_tty(Stream::Stderr) {
        settings.color = true;
    }
    settings
}

/// Copy `source` to `source~` before it is overwritten in place.
fn backup_source(source: &str) {
    let backup = format!("{source}~");
    if let Err(err) = fs::copy(source, &backup) {
        tracing::warn!("cannot back up {source} to {backup}: {err}");
    }
}

// ─── Shutdown ───────────────────────────────────────────────────────────────

/// The target could not be written: put the buffer in a fresh temporary file
/// instead.
fn fallback_save(interp: &mut Interpreter) -> i32 {
    interp
        .session_mut()
        .report("Attempting to save contents to an alternative file...");

    let saved = tempfile::Builder::new()
        .prefix("ace.tmp_")
        .tempfile()
        .context("cannot create a temporary file")
        .and_then(|file| {
            let (_, path) = file.keep().context("cannot keep the temporary file")?;
            let path = path.to_string_lossy().into_owned();
            let count = interp.buffer().save(&path)?;
            Ok(save_report(count, &path))
        });

    match saved {
        Ok(report) => {
            interp.session_mut().report(report);
            exit::FALLBACK_SAVED
        }
        Err(err) => {
            interp.session_mut().report(format_args!("{err:#}"));
            exit::FALLBACK_FAILED
        }
    }
}

// ─── Run ────────────────────────────────────────────────────────────────────

fn run(cli: &Cli) -> i32 {
    let shell = cli.shell.is_some();
    let (source, target) = cli.paths().unwrap_or((ace_core::buffer::STDIO_PATH, ace_core::buffer::STDIO_PATH));

    let lines = match line_source(cli) {
        Ok(lines) => lines,
        Err(err) => {
            eprintln!("ace: {err:#}");
            return exit::LOAD_FAILED;
        }
    };

    let mut session = Session::new(lines)
        .with_diagnostics(diagnostics(cli))
        .with_settings(settings(cli));
    session.set_target(target);
    if !shell && terminal::is_tty(Stream::Stderr) {
        if let Some(size) = terminal::get_size() {
            session.set_terminal_max(usize::from(size.cols));
        }
    }

    if !shell {
        if source == target && source != ace_core::buffer::STDIO_PATH {
            backup_source(source);
        }
        session.report(format_args!("ace {}", env!("CARGO_PKG_VERSION")));
        if !cli.quiet {
            session.report("Line-oriented context editor. Run `ace --explain` for the command list.");
        }
    }

    let buffer = match Buffer::load(source) {
        Ok(buffer) => buffer,
        Err(err) => {
            session.report(&err);
            return exit::LOAD_FAILED;
        }
    };
    tracing::info!(source, target, lines = buffer.line_count(), "loaded");

    let targets = SignalTargets {
        interrupt: session.interrupt_handle(),
        terminate: session.terminate_handle(),
    };
    let mut interp = Interpreter::new(buffer, session);

    if let Some(commands) = &cli.option {
        interp.run_commands(commands);
    }
    if !interp.session().close_requested() && !shell {
        interp.print_current();
    }

    if !signal::install(targets) {
        tracing::warn!("signal handlers already installed");
    }

    let mut log = cli.backup.as_deref().and_then(|path| {
        open_for_writing(path, "command log")
            .inspect_err(|err| eprintln!("ace: warning: {err:#}"))
            .ok()
    });
    interp.run(|line| {
        if let Some(log) = log.as_mut() {
            if let Err(err) = writeln!(log, "{line}") {
                tracing::warn!("command log write failed: {err}");
            }
        }
    });

    match interp.finish() {
        Ok(_) => interp.exit_code(),
        Err(err) => {
            tracing::warn!("{err}");
            interp.session_mut().report(&err);
            fallback_save(&mut interp)
        }
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { exit::INPUT_TERMINATED } else { exit::OK };
            let _ = err.print();
            process::exit(code);
        }
    };

    init_tracing();

    if let Some(item) = &cli.explain {
        let text = if item.is_empty() { help::summary() } else { help::explain(item) };
        print!("{text}");
        return;
    }

    process::exit(run(&cli));
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ace").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn missing_command_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.ace");
        let c = cli(&["-c", &missing.to_string_lossy(), "src.txt"]);
        let err = line_source(&c).err().unwrap();
        assert!(format!("{err:#}").starts_with("cannot open command file"));
    }

    #[test]
    fn shell_mode_has_no_colour() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("s.ace");
        let c = cli(&["-s", &script.to_string_lossy()]);
        assert!(!settings(&c).color);
    }

    #[test]
    fn backup_copies_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        fs::write(&source, "alpha\n").unwrap();
        let source = source.to_string_lossy().into_owned();

        backup_source(&source);
        assert_eq!(fs::read_to_string(format!("{source}~")).unwrap(), "alpha\n");
    }
}
