// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Table-driven recursive-descent parser.
//!
//! One source line of tokens goes in, zero or more [`Statement`]s come
//! out. Matching walks the rule tables in [`grammar`]: for a statement
//! rule each expression kind in the pattern must match a prefix of the
//! remaining tokens, and an expression rule in turn matches terminals
//! directly and nonterminals recursively. A successful rule yields the
//! concatenation of its children's typed values (token payloads first,
//! then each child rule's metadata), and statement construction consumes
//! that flat list by type tag rather than by position.

pub mod grammar;

use crate::expr::ConstantFormula;
use crate::isa::{AddressingMode, Mnemonic, MnemonicClass};
use crate::lexer::Token;
use crate::token_value::{Directive, TypedValue};

use grammar::{
    ExprKind, PatternPart, RuleMeta, StatementKind, EXPRESSION_RULES, STATEMENT_RULES,
};

/// No statement pattern matched the remaining tokens of a line.
#[derive(Debug, Clone)]
pub struct ParserError {
    pub message: String,
    pub line: u32,
}

impl ParserError {
    fn new(message: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (line {})", self.message, self.line)
    }
}

impl std::error::Error for ParserError {}

/// A parsed top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Instruction {
        mnemonic: Mnemonic,
        /// `None` when the mode must be inferred from the operand size.
        addressing_mode: Option<AddressingMode>,
        formula: Option<ConstantFormula>,
        line: u32,
    },
    LabelDef {
        name: String,
        line: u32,
    },
    NamedConstantDef {
        name: String,
        formula: ConstantFormula,
        line: u32,
    },
    Directive {
        directive: Directive,
        params: Vec<ConstantFormula>,
        line: u32,
    },
    Comment {
        line: u32,
    },
}

impl Statement {
    pub fn line(&self) -> u32 {
        match self {
            Statement::Instruction { line, .. }
            | Statement::LabelDef { line, .. }
            | Statement::NamedConstantDef { line, .. }
            | Statement::Directive { line, .. }
            | Statement::Comment { line } => *line,
        }
    }
}

/// Parse one line of tokens into statements, consuming every token.
pub fn parse_line(tokens: &[Token]) -> Result<Vec<Statement>, ParserError> {
    let mut statements = Vec::new();
    let mut rest = tokens;
    while !rest.is_empty() {
        let (statement, consumed) = match_next_statement(rest)?;
        statements.push(statement);
        rest = &rest[consumed..];
    }
    Ok(statements)
}

fn match_next_statement(tokens: &[Token]) -> Result<(Statement, usize), ParserError> {
    for rule in STATEMENT_RULES {
        if let Some(found) = match_statement_rule(tokens, rule.pattern) {
            let statement = construct(rule.kind, found.line, found.values)?;
            return Ok((statement, found.consumed));
        }
    }
    Err(ParserError::new(
        "Failed to match any statement",
        tokens[0].span.line,
    ))
}

struct Match {
    values: Vec<TypedValue>,
    consumed: usize,
    line: u32,
}

fn match_statement_rule(tokens: &[Token], pattern: &[ExprKind]) -> Option<Match> {
    let mut values = Vec::new();
    let mut consumed = 0;
    let mut line = 0;

    for goal in pattern {
        let child = match_expression(&tokens[consumed..], *goal)?;
        values.extend(child.values);
        if line == 0 {
            line = child.line;
        }
        consumed += child.consumed;
    }
    Some(Match {
        values,
        consumed,
        line,
    })
}

fn match_expression(tokens: &[Token], goal: ExprKind) -> Option<Match> {
    for rule in EXPRESSION_RULES.iter().filter(|rule| rule.kind == goal) {
        if let Some(mut found) = match_expression_rule(tokens, rule.pattern) {
            for meta in rule.meta {
                found.values.push(meta_value(*meta));
            }
            return Some(found);
        }
    }
    None
}

fn match_expression_rule(tokens: &[Token], pattern: &[PatternPart]) -> Option<Match> {
    let mut values = Vec::new();
    let mut consumed = 0;
    let mut line = 0;

    for part in pattern {
        match part {
            PatternPart::Tok(ttype) => {
                let token = tokens.get(consumed)?;
                if token.ttype != *ttype {
                    return None;
                }
                if let Some(value) = &token.value {
                    values.push(value.clone());
                }
                if line == 0 {
                    line = token.span.line;
                }
                consumed += 1;
            }
            PatternPart::Expr(kind) => {
                let child = match_expression(&tokens[consumed..], *kind)?;
                values.extend(child.values);
                if line == 0 {
                    line = child.line;
                }
                consumed += child.consumed;
            }
        }
    }
    Some(Match {
        values,
        consumed,
        line,
    })
}

fn meta_value(meta: RuleMeta) -> TypedValue {
    match meta {
        RuleMeta::Mode(mode) => TypedValue::Mode(mode),
        RuleMeta::Size(size) => TypedValue::Size(size),
        RuleMeta::Imm => TypedValue::Imm,
    }
}

// Statement factory: consumes the flat value list by type tag.
fn construct(
    kind: StatementKind,
    line: u32,
    values: Vec<TypedValue>,
) -> Result<Statement, ParserError> {
    match kind {
        StatementKind::Comment => Ok(Statement::Comment { line }),

        StatementKind::LabelDef => {
            let name = take_first_str(&values)
                .ok_or_else(|| ParserError::new("Label definition without a name", line))?;
            Ok(Statement::LabelDef { name, line })
        }

        StatementKind::NamedConstantDef => {
            let (name, name_ix) = values
                .iter()
                .enumerate()
                .find_map(|(ix, v)| match v {
                    TypedValue::Str(name) => Some((name.clone(), ix)),
                    _ => None,
                })
                .ok_or_else(|| {
                    ParserError::new("Constant definition without a name", line)
                })?;
            let mut formulas = ConstantFormula::collect(&values[name_ix + 1..]);
            if formulas.len() != 1 {
                return Err(ParserError::new(
                    "Constant definition requires a single formula",
                    line,
                ));
            }
            Ok(Statement::NamedConstantDef {
                name,
                formula: formulas.remove(0),
                line,
            })
        }

        StatementKind::Directive => {
            let directive = values
                .iter()
                .find_map(|v| match v {
                    TypedValue::Directive(d) => Some(*d),
                    _ => None,
                })
                .ok_or_else(|| ParserError::new("Directive statement without a directive", line))?;
            let params = ConstantFormula::collect(&values);
            Ok(Statement::Directive {
                directive,
                params,
                line,
            })
        }

        StatementKind::Instruction => {
            let mnemonic = values
                .iter()
                .find_map(|v| match v {
                    TypedValue::Mnemonic(m) => Some(*m),
                    _ => None,
                })
                .ok_or_else(|| ParserError::new("Instruction without a mnemonic", line))?;
            let target_mode = values.iter().find_map(|v| match v {
                TypedValue::Mode(mode) => Some(*mode),
                _ => None,
            });
            let immediate = values.iter().any(|v| matches!(v, TypedValue::Imm));
            let formula = ConstantFormula::collect(&values).into_iter().next();

            // A bare mnemonic is implicit; branches always encode a
            // relative offset. Everything else without a target keeps the
            // mode open for size inference.
            let addressing_mode = if formula.is_none() {
                Some(AddressingMode::Implied)
            } else if immediate {
                Some(AddressingMode::Immediate)
            } else if let Some(mode) = target_mode {
                Some(mode)
            } else if mnemonic.class() == MnemonicClass::Branch {
                Some(AddressingMode::Relative)
            } else {
                None
            };

            Ok(Statement::Instruction {
                mnemonic,
                addressing_mode,
                formula,
                line,
            })
        }
    }
}

fn take_first_str(values: &[TypedValue]) -> Option<String> {
    values.iter().find_map(|v| match v {
        TypedValue::Str(name) => Some(name.clone()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::OperandValue;
    use crate::lexer::tokenize;
    use crate::token_value::MaskKind;

    fn parse(line: &str) -> Vec<Statement> {
        parse_line(&tokenize(line, 1).unwrap()).unwrap()
    }

    fn single_instruction(line: &str) -> (Mnemonic, Option<AddressingMode>, Option<ConstantFormula>) {
        let statements = parse(line);
        assert_eq!(statements.len(), 1, "expected one statement for {line}");
        match &statements[0] {
            Statement::Instruction {
                mnemonic,
                addressing_mode,
                formula,
                ..
            } => (*mnemonic, *addressing_mode, formula.clone()),
            other => panic!("expected instruction, got {other:?}"),
        }
    }

    #[test]
    fn comment_line_parses_to_comment() {
        assert_eq!(parse("; hello"), vec![Statement::Comment { line: 1 }]);
    }

    #[test]
    fn label_then_instruction_on_one_line() {
        let statements = parse("start: LDA #$01");
        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[0],
            Statement::LabelDef {
                name: "start".to_string(),
                line: 1
            }
        );
        assert!(matches!(
            statements[1],
            Statement::Instruction {
                mnemonic: Mnemonic::Lda,
                addressing_mode: Some(AddressingMode::Immediate),
                ..
            }
        ));
    }

    #[test]
    fn named_constant_definition() {
        let statements = parse("FOO = $1234");
        match &statements[0] {
            Statement::NamedConstantDef { name, formula, .. } => {
                assert_eq!(name, "FOO");
                assert_eq!(formula.operands.len(), 1);
                assert_eq!(formula.operands[0].size, Some(2));
            }
            other => panic!("expected constant def, got {other:?}"),
        }
    }

    #[test]
    fn literal_targets_select_modes_by_width() {
        assert_eq!(single_instruction("LDA $10").1, Some(AddressingMode::ZeroPage));
        assert_eq!(single_instruction("LDA $0010").1, Some(AddressingMode::Absolute));
        assert_eq!(single_instruction("LDA $10,X").1, Some(AddressingMode::ZeroPageX));
        assert_eq!(single_instruction("LDX $10,Y").1, Some(AddressingMode::ZeroPageY));
        assert_eq!(single_instruction("LDA $0010,X").1, Some(AddressingMode::AbsoluteX));
        assert_eq!(single_instruction("LDA $1234,Y").1, Some(AddressingMode::AbsoluteY));
        assert_eq!(single_instruction("JMP ($1234)").1, Some(AddressingMode::Indirect));
        assert_eq!(
            single_instruction("LDA ($10,X)").1,
            Some(AddressingMode::IndexedIndirectX)
        );
        assert_eq!(
            single_instruction("LDA ($10),Y").1,
            Some(AddressingMode::IndirectIndexedY)
        );
    }

    #[test]
    fn bare_constant_operand_leaves_mode_open() {
        let (mnemonic, mode, formula) = single_instruction("JMP start");
        assert_eq!(mnemonic, Mnemonic::Jmp);
        assert_eq!(mode, None);
        let formula = formula.unwrap();
        assert_eq!(
            formula.operands[0].value,
            OperandValue::Symbol("start".to_string())
        );
    }

    #[test]
    fn branch_with_constant_operand_is_relative() {
        let (_, mode, _) = single_instruction("BNE back");
        assert_eq!(mode, Some(AddressingMode::Relative));
    }

    #[test]
    fn bare_mnemonic_is_implied() {
        let (mnemonic, mode, formula) = single_instruction("NOP");
        assert_eq!(mnemonic, Mnemonic::Nop);
        assert_eq!(mode, Some(AddressingMode::Implied));
        assert!(formula.is_none());
    }

    #[test]
    fn immediate_with_mask_keeps_symbol_and_mask() {
        let (_, mode, formula) = single_instruction("LDA #<FOO");
        assert_eq!(mode, Some(AddressingMode::Immediate));
        let formula = formula.unwrap();
        assert_eq!(formula.operands[0].mask, Some(MaskKind::Low));
        assert_eq!(
            formula.operands[0].value,
            OperandValue::Symbol("FOO".to_string())
        );
    }

    #[test]
    fn constant_arithmetic_flattens_in_source_order() {
        let (_, mode, formula) = single_instruction("LDA FOO+1");
        assert_eq!(mode, None);
        let formula = formula.unwrap();
        assert_eq!(formula.operands.len(), 2);
        assert_eq!(formula.operators.len(), 1);
    }

    #[test]
    fn directive_parameter_lists() {
        let statements = parse(".db $01, $02, $03");
        match &statements[0] {
            Statement::Directive {
                directive, params, ..
            } => {
                assert_eq!(*directive, Directive::Db);
                assert_eq!(params.len(), 3);
            }
            other => panic!("expected directive, got {other:?}"),
        }

        let statements = parse(".org $8000");
        match &statements[0] {
            Statement::Directive {
                directive, params, ..
            } => {
                assert_eq!(*directive, Directive::Org);
                assert_eq!(params.len(), 1);
                assert_eq!(params[0].bare_literal(), Some(0x8000));
            }
            other => panic!("expected directive, got {other:?}"),
        }
    }

    #[test]
    fn every_token_is_consumed_or_the_line_fails() {
        let tokens = tokenize("LDA ($1234),X", 1).unwrap();
        let err = parse_line(&tokens).unwrap_err();
        assert_eq!(err.line, 1);

        let tokens = tokenize("LDA ,", 1).unwrap();
        assert!(parse_line(&tokens).is_err());
    }

    #[test]
    fn statement_line_numbers_come_from_their_first_token() {
        let tokens = tokenize("RTS", 42).unwrap();
        let statements = parse_line(&tokens).unwrap();
        assert_eq!(statements[0].line(), 42);
    }
}
