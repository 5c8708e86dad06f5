// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Byte emission.
//!
//! Walks the statement list once with the resolved symbol table, picks a
//! concrete addressing mode per instruction, and writes opcode and
//! operand bytes little-endian into the output buffer. `.org` only moves
//! the origin used to rebase absolute jump targets; the program counter
//! itself stays file-relative.

use crate::assembler::error::{AsmErrorKind, TranslateError};
use crate::assembler::resolver::{org_value, shrunk_mode};
use crate::expr::ConstantFormula;
use crate::isa::{self, AddressingMode, Mnemonic, MnemonicClass};
use crate::parser::Statement;
use crate::symbol_table::SymbolTable;
use crate::token_value::Directive;

/// Encode the statement list into the flat binary image.
pub fn encode(statements: &[Statement], symbols: &SymbolTable) -> Result<Vec<u8>, TranslateError> {
    let mut out = Vec::new();
    let mut pc: i32 = 0;
    let mut org_offset: i32 = 0;

    for stmt in statements {
        match stmt {
            Statement::Comment { .. }
            | Statement::LabelDef { .. }
            | Statement::NamedConstantDef { .. } => {}

            Statement::Directive {
                directive,
                params,
                line,
            } => match directive {
                Directive::Org => {
                    org_offset = org_value(params)
                        .map_err(|err| TranslateError::new(AsmErrorKind::Assembler, err, *line))?;
                }
                Directive::Db => {
                    for param in params {
                        let (value, _) = resolve_param(param, symbols, *line)?;
                        out.push((value & 0xFF) as u8);
                        pc += 1;
                    }
                }
                Directive::Dw => {
                    for param in params {
                        let (value, _) = resolve_param(param, symbols, *line)?;
                        out.push((value & 0xFF) as u8);
                        out.push(((value >> 8) & 0xFF) as u8);
                        pc += 2;
                    }
                }
                Directive::Index | Directive::Mem => {}
            },

            Statement::Instruction {
                mnemonic,
                addressing_mode,
                formula,
                line,
            } => {
                pc = encode_instruction(
                    &mut out,
                    *mnemonic,
                    *addressing_mode,
                    formula.as_ref(),
                    symbols,
                    pc,
                    org_offset,
                    *line,
                )?;
            }
        }
    }
    Ok(out)
}

#[allow(clippy::too_many_arguments)]
fn encode_instruction(
    out: &mut Vec<u8>,
    mnemonic: Mnemonic,
    addressing_mode: Option<AddressingMode>,
    formula: Option<&ConstantFormula>,
    symbols: &SymbolTable,
    pc: i32,
    org_offset: i32,
    line: u32,
) -> Result<i32, TranslateError> {
    let (mut operand, mut size) = match formula {
        Some(formula) => resolve_param(formula, symbols, line)?,
        None => (0, 0),
    };

    // Mode selection: an explicit mode wins, otherwise the operand size
    // picks zero page or absolute.
    let mut mode = match addressing_mode {
        Some(mode) => mode,
        None => {
            if size == 1 {
                AddressingMode::ZeroPage
            } else {
                AddressingMode::Absolute
            }
        }
    };

    if matches!(mode, AddressingMode::AbsoluteX | AddressingMode::AbsoluteY) {
        if let Some(formula) = formula {
            let hint = formula
                .width_hint(|name| symbols.entry(name).map(|entry| entry.size))
                .map_err(|err| {
                    TranslateError::new(AsmErrorKind::Assembler, err.message, line)
                })?;
            let shrunk = shrunk_mode(mnemonic, mode, hint);
            if shrunk != mode {
                // The hint proved the value fits one byte even when the
                // literal was written wider.
                mode = shrunk;
                size = 1;
            }
        }
    }

    // The branch offset is relative to the address following the
    // instruction and always one byte.
    if mode == AddressingMode::Relative {
        operand -= pc + 2;
        if !(-128..=127).contains(&operand) {
            return Err(TranslateError::new(
                AsmErrorKind::Assembler,
                format!("Relative branch out of range (offset {operand})"),
                line,
            ));
        }
        size = 1;
    }

    if mode.operand_size() < size {
        return Err(TranslateError::new(
            AsmErrorKind::Assembler,
            format!("Operand value is too wide for {mode} addressing"),
            line,
        ));
    }

    let info = isa::lookup(mnemonic, mode).ok_or_else(|| {
        TranslateError::new(
            AsmErrorKind::Assembler,
            format!("Instruction {mnemonic} cannot be used with addressing mode {mode}"),
            line,
        )
    })?;

    if mnemonic.class() == MnemonicClass::Jump && mode == AddressingMode::Absolute {
        operand += org_offset;
    }

    out.push(info.opcode);
    let width = mode.operand_size();
    if width >= 1 {
        out.push((operand & 0xFF) as u8);
    }
    if width == 2 {
        out.push(((operand >> 8) & 0xFF) as u8);
    }
    Ok(pc + info.length as i32)
}

fn resolve_param(
    formula: &ConstantFormula,
    symbols: &SymbolTable,
    line: u32,
) -> Result<(i32, u8), TranslateError> {
    formula
        .resolve(symbols)
        .map_err(|err| TranslateError::new(AsmErrorKind::Assembler, err.message, line))
}
