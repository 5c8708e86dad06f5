// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Constant and label resolution.
//!
//! Four passes over the statement list: discover label names, size named
//! constants, assign label offsets by simulating the program counter, and
//! evaluate constant formulas. Labels may be referenced before they are
//! defined; named constants may only reference labels and constants
//! defined earlier in the source.

use crate::assembler::error::{AsmErrorKind, TranslateError};
use crate::expr::ConstantFormula;
use crate::isa::{self, AddressingMode, Mnemonic};
use crate::parser::Statement;
use crate::symbol_table::{SymbolTable, SymbolTableResult};
use crate::token_value::Directive;

/// Build the symbol table for a statement list.
pub fn resolve(statements: &[Statement]) -> Result<SymbolTable, TranslateError> {
    let labels = discover_labels(statements);
    let sizes = size_constants(statements, labels)?;
    let mut symbols = assign_label_offsets(statements, &sizes)?;
    evaluate_constants(statements, &mut symbols)?;
    Ok(symbols)
}

/// Known symbol widths before values exist: labels are always two bytes,
/// constants carry the size computed in pass 2.
pub struct SymbolSizes {
    labels: Vec<String>,
    constants: Vec<(String, u8)>,
}

impl SymbolSizes {
    pub fn get(&self, name: &str) -> Option<u8> {
        if self.labels.iter().any(|label| label == name) {
            return Some(2);
        }
        self.constants
            .iter()
            .find(|(constant, _)| constant == name)
            .map(|(_, size)| *size)
    }
}

// Pass 1. Duplicates are caught in pass 3 when offsets are assigned.
fn discover_labels(statements: &[Statement]) -> Vec<String> {
    statements
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::LabelDef { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect()
}

// Pass 2: size each named constant in source order, so a constant may
// only lean on labels and on constants defined above it.
fn size_constants(
    statements: &[Statement],
    labels: Vec<String>,
) -> Result<SymbolSizes, TranslateError> {
    let mut sizes = SymbolSizes {
        labels,
        constants: Vec::new(),
    };
    for stmt in statements {
        if let Statement::NamedConstantDef { name, formula, line } = stmt {
            let size = formula
                .inferred_size(|symbol| sizes.get(symbol))
                .map_err(|err| {
                    TranslateError::new(AsmErrorKind::Assembler, err.message, *line)
                })?;
            sizes.constants.push((name.clone(), size));
        }
    }
    Ok(sizes)
}

// Pass 3: simulate the program counter. `.org` does not reset the PC;
// label offsets stay file-relative and only absolute jump targets are
// rebased by the encoder.
fn assign_label_offsets(
    statements: &[Statement],
    sizes: &SymbolSizes,
) -> Result<SymbolTable, TranslateError> {
    let mut symbols = SymbolTable::new();
    let mut pc: i32 = 0;

    for stmt in statements {
        match stmt {
            Statement::LabelDef { name, line } => {
                if symbols.add(name, pc, 2) == SymbolTableResult::Duplicate {
                    return Err(TranslateError::new(
                        AsmErrorKind::Assembler,
                        format!("Found duplicate label {name}"),
                        *line,
                    ));
                }
            }
            Statement::Instruction {
                mnemonic,
                addressing_mode,
                formula,
                line,
            } => {
                let bytes = operand_bytes(*mnemonic, *addressing_mode, formula.as_ref(), sizes)
                    .map_err(|err| {
                        TranslateError::new(AsmErrorKind::Assembler, err, *line)
                    })?;
                pc += 1 + bytes as i32;
            }
            Statement::Directive {
                directive,
                params,
                line,
            } => match directive {
                Directive::Org => {
                    org_value(params)
                        .map_err(|err| TranslateError::new(AsmErrorKind::Assembler, err, *line))?;
                }
                Directive::Db => pc += params.len() as i32,
                Directive::Dw => pc += 2 * params.len() as i32,
                Directive::Index | Directive::Mem => {}
            },
            Statement::NamedConstantDef { .. } | Statement::Comment { .. } => {}
        }
    }
    Ok(symbols)
}

// Pass 4: labels are already in the table, so constants can be folded in
// a single forward sweep.
fn evaluate_constants(
    statements: &[Statement],
    symbols: &mut SymbolTable,
) -> Result<(), TranslateError> {
    for stmt in statements {
        if let Statement::NamedConstantDef { name, formula, line } = stmt {
            if symbols.contains(name) {
                return Err(TranslateError::new(
                    AsmErrorKind::Assembler,
                    format!("Constant {name} defined multiple times"),
                    *line,
                ));
            }
            let (value, size) = formula.resolve(symbols).map_err(|err| {
                TranslateError::new(AsmErrorKind::Assembler, err.message, *line)
            })?;
            let _ = symbols.add(name, value, size);
        }
    }
    Ok(())
}

/// Operand byte count for PC simulation, mirroring the encoder's mode
/// selection exactly.
fn operand_bytes(
    mnemonic: Mnemonic,
    mode: Option<AddressingMode>,
    formula: Option<&ConstantFormula>,
    sizes: &SymbolSizes,
) -> Result<u8, String> {
    match mode {
        Some(mode) => {
            let effective = match (mode, formula) {
                (AddressingMode::AbsoluteX | AddressingMode::AbsoluteY, Some(formula)) => {
                    let hint = formula
                        .width_hint(|symbol| sizes.get(symbol))
                        .map_err(|err| err.message)?;
                    shrunk_mode(mnemonic, mode, hint)
                }
                _ => mode,
            };
            Ok(effective.operand_size())
        }
        None => {
            let formula =
                formula.ok_or_else(|| "Instruction operand is missing".to_string())?;
            formula
                .inferred_size(|symbol| sizes.get(symbol))
                .map_err(|err| err.message)
        }
    }
}

/// Zero-page shrink: an absolute-indexed mode with a one-byte operand
/// drops to the zero-page-indexed variant when the instruction has one.
/// `ABS` never shrinks to `ZRP`; an explicit two-byte operand is kept.
pub fn shrunk_mode(mnemonic: Mnemonic, mode: AddressingMode, width_hint: u8) -> AddressingMode {
    if width_hint != 1 {
        return mode;
    }
    let zp_variant = match mode {
        AddressingMode::AbsoluteX => AddressingMode::ZeroPageX,
        AddressingMode::AbsoluteY => AddressingMode::ZeroPageY,
        _ => return mode,
    };
    if isa::table::has_mode(mnemonic, zp_variant) {
        zp_variant
    } else {
        mode
    }
}

/// `.org` takes exactly one parameter that is a bare integer.
pub fn org_value(params: &[ConstantFormula]) -> Result<i32, String> {
    if params.len() != 1 {
        return Err("ORG directive requires a single parameter".to_string());
    }
    params[0]
        .bare_literal()
        .ok_or_else(|| "ORG directive requires a number parameter".to_string())
}
