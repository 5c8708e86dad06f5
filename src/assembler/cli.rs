// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface and input/output path mapping.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::assembler::error::{AsmError, AsmErrorKind, AsmRunError, Diagnostic};
use crate::assembler::translate;

pub const VERSION: &str = "1.0";

#[derive(Parser, Debug)]
#[command(
    name = "x816",
    version = VERSION,
    about = "MOS 6502 assembler for the x816 dialect"
)]
pub struct Cli {
    /// Input `.asm` file, or a directory assembled recursively.
    pub input: PathBuf,
    /// Output file for a single input; defaults to the input path with a
    /// `.bin` extension. Ignored when the input is a directory.
    pub output: Option<PathBuf>,
}

/// Run the assembler with command-line arguments.
pub fn run() -> Result<(), AsmRunError> {
    let cli = Cli::parse();
    run_with(&cli)
}

pub fn run_with(cli: &Cli) -> Result<(), AsmRunError> {
    if !cli.input.exists() {
        return Err(AsmRunError::new(
            AsmError::new(
                AsmErrorKind::Io,
                format!("No such file {}", cli.input.display()),
            ),
            Vec::new(),
        ));
    }

    if cli.input.is_dir() {
        run_directory(&cli.input)
    } else {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| output_path_for(&cli.input));
        assemble_file(&cli.input, &output)
    }
}

// Directory mode keeps going after a failed file so every diagnostic is
// reported, then fails the run as a whole.
fn run_directory(dir: &Path) -> Result<(), AsmRunError> {
    let mut files = Vec::new();
    collect_asm_files(dir, &mut files).map_err(|err| {
        AsmRunError::new(
            AsmError::new(
                AsmErrorKind::Io,
                format!("{}: {err}", dir.display()),
            ),
            Vec::new(),
        )
    })?;
    files.sort();

    let mut first_error: Option<AsmError> = None;
    let mut diagnostics = Vec::new();
    for file in &files {
        if let Err(err) = assemble_file(file, &output_path_for(file)) {
            diagnostics.extend(err.diagnostics().to_vec());
            if first_error.is_none() {
                first_error = Some(err.error().clone());
            }
        }
    }
    match first_error {
        Some(error) => Err(AsmRunError::new(error, diagnostics)),
        None => Ok(()),
    }
}

fn collect_asm_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_asm_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "asm") {
            out.push(path);
        }
    }
    Ok(())
}

/// Replace the final extension with `.bin`, or append it when the input
/// has none.
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension("bin")
}

// No partial binary: the output file is only written after the whole
// translation succeeded.
fn assemble_file(input: &Path, output: &Path) -> Result<(), AsmRunError> {
    let source = fs::read_to_string(input).map_err(|err| io_error(input, err))?;
    match translate(&source) {
        Ok(bytes) => fs::write(output, bytes).map_err(|err| io_error(output, err)),
        Err(err) => {
            let source_line = source
                .lines()
                .nth(err.line.saturating_sub(1) as usize)
                .map(str::to_string);
            let diagnostic = Diagnostic::from_translate(err.clone())
                .with_file(Some(input.display().to_string()))
                .with_source(source_line);
            Err(AsmRunError::new(err.error, vec![diagnostic]))
        }
    }
}

fn io_error(path: &Path, err: io::Error) -> AsmRunError {
    AsmRunError::new(
        AsmError::new(AsmErrorKind::Io, format!("{}: {err}", path.display())),
        Vec::new(),
    )
}
