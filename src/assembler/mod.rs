// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Assembler entry point.
//!
//! Ties the pipeline together: lexing and parsing build the statement
//! list, the resolver produces the symbol table, and the encoder emits
//! the flat binary. Data flows one way; the first failing stage aborts
//! the translation with its source line attached.

pub mod cli;
pub mod encoder;
pub mod error;
pub mod resolver;
#[cfg(test)]
mod tests;

use crate::lexer;
use crate::parser::{self, Statement};

use error::{AsmErrorKind, TranslateError};

pub use cli::{run, Cli, VERSION};
pub use error::{AsmError, AsmRunError, Diagnostic};

/// A single translation unit.
#[derive(Debug, Default)]
pub struct Assembler {
    statements: Vec<Statement>,
}

impl Assembler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lex and parse a source text, appending its statements.
    pub fn read(&mut self, source: &str) -> Result<(), TranslateError> {
        let lines = lexer::lex(source).map_err(|err| {
            TranslateError::new(AsmErrorKind::Lexer, err.message, err.line)
                .with_column(err.column)
        })?;
        for line in &lines {
            let statements = parser::parse_line(line)
                .map_err(|err| TranslateError::new(AsmErrorKind::Parser, err.message, err.line))?;
            self.statements.extend(statements);
        }
        Ok(())
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Resolve symbols and encode the loaded program.
    pub fn assemble(&self) -> Result<Vec<u8>, TranslateError> {
        let symbols = resolver::resolve(&self.statements)?;
        encoder::encode(&self.statements, &symbols)
    }
}

/// Assemble one source text to its binary image.
pub fn translate(source: &str) -> Result<Vec<u8>, TranslateError> {
    let mut assembler = Assembler::new();
    assembler.read(source)?;
    assembler.assemble()
}
