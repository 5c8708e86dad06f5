// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types, diagnostics, and reporting for the assembler.

use std::fmt;

/// Categories of assembler errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsmErrorKind {
    Lexer,
    Parser,
    Assembler,
    Io,
    Cli,
}

impl AsmErrorKind {
    fn stage(self) -> &'static str {
        match self {
            AsmErrorKind::Lexer => "lexer",
            AsmErrorKind::Parser => "parser",
            AsmErrorKind::Assembler => "assembler",
            AsmErrorKind::Io => "io",
            AsmErrorKind::Cli => "cli",
        }
    }
}

/// An assembler error with a kind and message.
#[derive(Debug, Clone)]
pub struct AsmError {
    kind: AsmErrorKind,
    message: String,
}

impl AsmError {
    pub fn new(kind: AsmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> AsmErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AsmError {}

/// First failure of a translation, with its source position attached.
///
/// Any stage aborts the whole translation with this; the caller turns it
/// into a [`Diagnostic`] for rendering.
#[derive(Debug, Clone)]
pub struct TranslateError {
    pub error: AsmError,
    pub line: u32,
    pub column: Option<usize>,
}

impl TranslateError {
    pub fn new(kind: AsmErrorKind, message: impl Into<String>, line: u32) -> Self {
        Self {
            error: AsmError::new(kind, message),
            line,
            column: None,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {})", self.error, self.line)
    }
}

impl std::error::Error for TranslateError {}

/// A renderable diagnostic with location and source context.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub line: u32,
    pub column: Option<usize>,
    pub error: AsmError,
    pub file: Option<String>,
    pub source: Option<String>,
}

impl Diagnostic {
    pub fn new(line: u32, error: AsmError) -> Self {
        Self {
            line,
            column: None,
            error,
            file: None,
            source: None,
        }
    }

    pub fn from_translate(err: TranslateError) -> Self {
        let TranslateError {
            error,
            line,
            column,
        } = err;
        Self {
            line,
            column,
            error,
            file: None,
            source: None,
        }
    }

    pub fn with_file(mut self, file: Option<String>) -> Self {
        self.file = file;
        self
    }

    pub fn with_column(mut self, column: Option<usize>) -> Self {
        self.column = column;
        self
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    /// Multi-line rendering: header, source gutter, caret, message.
    pub fn format_with_context(&self, use_color: bool) -> String {
        let mut out = String::new();
        let header = match &self.file {
            Some(file) => format!("{file}:{}: ERROR ({})", self.line, self.error.kind().stage()),
            None => format!("{}: ERROR ({})", self.line, self.error.kind().stage()),
        };
        out.push_str(&header);
        out.push('\n');

        if let Some(source) = &self.source {
            out.push_str(&format!("{:>5} | {}\n", self.line, source));
            if let Some(column) = self.column {
                out.push_str(&caret_line(column, use_color));
                out.push('\n');
            }
        }
        out.push_str(&format!("ERROR: {}", self.error.message()));
        out
    }
}

fn caret_line(column: usize, use_color: bool) -> String {
    let pad = " ".repeat(column.saturating_sub(1));
    if use_color {
        format!("{:>5} | {pad}\x1b[31m^\x1b[0m", "")
    } else {
        format!("{:>5} | {pad}^", "")
    }
}

/// Error from a failed assembler run, carrying everything the CLI needs
/// to print.
#[derive(Debug)]
pub struct AsmRunError {
    error: AsmError,
    diagnostics: Vec<Diagnostic>,
}

impl AsmRunError {
    pub fn new(error: AsmError, diagnostics: Vec<Diagnostic>) -> Self {
        Self { error, diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn error(&self) -> &AsmError {
        &self.error
    }
}

impl fmt::Display for AsmRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for AsmRunError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_renders_header_and_message() {
        let err = AsmError::new(AsmErrorKind::Assembler, "Bad thing");
        let diag = Diagnostic::new(12, err).with_file(Some("prog.asm".to_string()));
        let text = diag.format_with_context(false);
        assert!(text.starts_with("prog.asm:12: ERROR (assembler)"));
        assert!(text.ends_with("ERROR: Bad thing"));
    }

    #[test]
    fn diagnostic_renders_source_and_caret() {
        let err = AsmError::new(AsmErrorKind::Lexer, "No token pattern matches here");
        let diag = Diagnostic::new(3, err)
            .with_source(Some("LDA @$10".to_string()))
            .with_column(Some(5));
        let text = diag.format_with_context(false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "    3 | LDA @$10");
        assert_eq!(lines[2], "      |     ^");
    }

    #[test]
    fn color_wraps_the_caret_only() {
        let err = AsmError::new(AsmErrorKind::Lexer, "x");
        let diag = Diagnostic::new(1, err)
            .with_source(Some("y".to_string()))
            .with_column(Some(1));
        let text = diag.format_with_context(true);
        assert!(text.contains("\x1b[31m^\x1b[0m"));
    }
}
