//! Auxiliary streams — the files behind `C`/`A` and `O`/`W`.
//!
//! `C/path/` connects an input file that `A` absorbs line by line; `O/path/`
//! opens an output file that `W` writes the current line to. At most one of
//! each is open; connecting a new one closes the old.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::source::read_line;

/// An open auxiliary input file.
#[derive(Debug)]
pub struct AuxInput {
    reader: BufReader<File>,
}

impl AuxInput {
    /// Open `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns the error from opening the file.
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self {
            reader: BufReader::new(File::open(path)?),
        })
    }

    /// Next line without its terminator, or `None` at end of file.
    pub fn next_line(&mut self) -> Option<String> {
        read_line(&mut self.reader)
    }
}

/// An open auxiliary output file.
#[derive(Debug)]
pub struct AuxOutput {
    writer: BufWriter<File>,
}

impl AuxOutput {
    /// Create (truncate) `path` for writing.
    ///
    /// # Errors
    ///
    /// Returns the error from creating the file.
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(File::create(path)?),
        })
    }

    /// Append `line` and a newline.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    /// Flush buffered lines to the file.
    ///
    /// # Errors
    ///
    /// Returns the underlying flush error.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
