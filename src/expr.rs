// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Constant formula evaluation.
//!
//! A formula is the flattened form of a left-to-right add/subtract
//! expression over integer literals and symbol references, with an
//! optional byte mask per operand. The resolver sizes and evaluates
//! formulas; the encoder resolves instruction operands and directive
//! parameters through the same code.

use crate::symbol_table::SymbolTable;
use crate::token_value::{MaskKind, MathOp, TypedValue};

/// Error from formula sizing or evaluation.
#[derive(Debug, Clone)]
pub struct EvalError {
    pub message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

/// One operand position: an integer literal or a symbol reference.
#[derive(Debug, Clone, PartialEq)]
pub enum OperandValue {
    Literal(i32),
    Symbol(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormulaOperand {
    pub value: OperandValue,
    /// Lexically declared width for literals; absent for symbols.
    pub size: Option<u8>,
    pub mask: Option<MaskKind>,
}

/// Flattened constant arithmetic: N operands joined by N-1 operators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantFormula {
    pub operands: Vec<FormulaOperand>,
    pub operators: Vec<MathOp>,
}

impl ConstantFormula {
    /// Rebuild formulas from a flat typed-value stream.
    ///
    /// A mask applies to the operand that follows it, a size tag refines
    /// the operand that precedes it (the innermost rule's tag arrives
    /// last and wins), and an operand arriving while the current formula
    /// is not expecting one starts the next formula of a parameter list.
    /// Tags that are not part of formulas are ignored.
    pub fn collect(values: &[TypedValue]) -> Vec<ConstantFormula> {
        let mut formulas: Vec<ConstantFormula> = Vec::new();
        let mut current = ConstantFormula::default();
        let mut pending_mask = None;

        for value in values {
            match value {
                TypedValue::Mask(mask) => pending_mask = Some(*mask),
                TypedValue::Operator(op) => current.operators.push(*op),
                TypedValue::Size(size) => {
                    if let Some(operand) = current.operands.last_mut() {
                        operand.size = Some(*size);
                    }
                }
                TypedValue::Number(n) => {
                    push_operand(
                        &mut formulas,
                        &mut current,
                        OperandValue::Literal(*n),
                        pending_mask.take(),
                    );
                }
                TypedValue::Str(name) => {
                    push_operand(
                        &mut formulas,
                        &mut current,
                        OperandValue::Symbol(name.clone()),
                        pending_mask.take(),
                    );
                }
                TypedValue::Mnemonic(_)
                | TypedValue::Directive(_)
                | TypedValue::Mode(_)
                | TypedValue::Imm => {}
            }
        }

        if !current.operands.is_empty() {
            formulas.push(current);
        }
        formulas
    }

    /// The single integer of a bare literal formula (`.org` parameters):
    /// exactly one operand, no arithmetic, no mask.
    pub fn bare_literal(&self) -> Option<i32> {
        if self.operands.len() != 1 || !self.operators.is_empty() {
            return None;
        }
        let operand = &self.operands[0];
        if operand.mask.is_some() {
            return None;
        }
        match operand.value {
            OperandValue::Literal(n) => Some(n),
            OperandValue::Symbol(_) => None,
        }
    }

    /// Max operand width using declared literal sizes and the sizes of
    /// referenced symbols. A masked operand counts as one byte.
    pub fn inferred_size<F>(&self, symbol_size: F) -> Result<u8, EvalError>
    where
        F: Fn(&str) -> Option<u8>,
    {
        self.check_shape()?;
        let mut max_size = 0u8;
        for operand in &self.operands {
            let size = if operand.mask.is_some() {
                1
            } else {
                match &operand.value {
                    OperandValue::Literal(n) => {
                        operand.size.unwrap_or_else(|| byte_width(*n as i64))
                    }
                    OperandValue::Symbol(name) => symbol_size(name).ok_or_else(|| {
                        EvalError::new(format!("Reference to undefined constant {name}"))
                    })?,
                }
            };
            max_size = max_size.max(size);
        }
        Ok(max_size)
    }

    /// Width used by the absolute-to-zero-page shrink test.
    ///
    /// A formula of plain literals is folded statically and classified by
    /// the width of its value, so `$0010,X` shrinks to zero page. With
    /// symbols involved only sizes are known before label assignment, so
    /// the max-size rule applies. Resolver and encoder both use this, so
    /// the program counter simulation always agrees with emission.
    pub fn width_hint<F>(&self, symbol_size: F) -> Result<u8, EvalError>
    where
        F: Fn(&str) -> Option<u8>,
    {
        if let Some(value) = self.fold_literal() {
            if value >= 0 {
                return Ok(byte_width(value));
            }
        }
        self.inferred_size(symbol_size)
    }

    /// Evaluate against the symbol table, returning the value and the max
    /// operand size seen. The result must fit `max_size` bytes unsigned.
    pub fn resolve(&self, symbols: &SymbolTable) -> Result<(i32, u8), EvalError> {
        self.check_shape()?;
        let mut result: i64 = 0;
        let mut max_size = 0u8;

        for (ix, operand) in self.operands.iter().enumerate() {
            let (mut value, mut size) = match &operand.value {
                OperandValue::Literal(n) => {
                    (*n as i64, operand.size.unwrap_or_else(|| byte_width(*n as i64)))
                }
                OperandValue::Symbol(name) => {
                    let entry = symbols.entry(name).ok_or_else(|| {
                        EvalError::new(format!("Reference to undefined constant {name}"))
                    })?;
                    (entry.value as i64, entry.size)
                }
            };

            if let Some(mask) = operand.mask {
                value = apply_mask(mask, value);
                size = 1;
            }

            if ix == 0 {
                result = value;
            } else {
                match self.operators[ix - 1] {
                    MathOp::Add => result += value,
                    MathOp::Subtract => result -= value,
                }
            }
            max_size = max_size.max(size);
        }

        let ceiling = (1i64 << (8 * max_size as u32)) - 1;
        if result > ceiling {
            return Err(EvalError::new(format!(
                "Resolved value {result} is too large (max value of {ceiling})"
            )));
        }
        Ok((result as i32, max_size))
    }

    fn fold_literal(&self) -> Option<i64> {
        if self.check_shape().is_err() {
            return None;
        }
        let mut result: i64 = 0;
        for (ix, operand) in self.operands.iter().enumerate() {
            let mut value = match operand.value {
                OperandValue::Literal(n) => n as i64,
                OperandValue::Symbol(_) => return None,
            };
            if let Some(mask) = operand.mask {
                value = apply_mask(mask, value);
            }
            if ix == 0 {
                result = value;
            } else {
                match self.operators[ix - 1] {
                    MathOp::Add => result += value,
                    MathOp::Subtract => result -= value,
                }
            }
        }
        Some(result)
    }

    fn check_shape(&self) -> Result<(), EvalError> {
        if self.operands.is_empty() || self.operands.len() != self.operators.len() + 1 {
            return Err(EvalError::new("Malformed constant formula"));
        }
        Ok(())
    }
}

fn push_operand(
    formulas: &mut Vec<ConstantFormula>,
    current: &mut ConstantFormula,
    value: OperandValue,
    mask: Option<MaskKind>,
) {
    let expecting = current.operands.is_empty()
        || current.operators.len() == current.operands.len();
    if !expecting {
        formulas.push(std::mem::take(current));
    }
    current.operands.push(FormulaOperand {
        value,
        size: None,
        mask,
    });
}

fn apply_mask(mask: MaskKind, value: i64) -> i64 {
    match mask {
        MaskKind::Low => value & 0xFF,
        MaskKind::High => value >> 8,
    }
}

fn byte_width(value: i64) -> u8 {
    if (0..=0xFF).contains(&value) {
        1
    } else if (0..=0xFFFF).contains(&value) {
        2
    } else {
        4
    }
}
