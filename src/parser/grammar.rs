// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Declarative grammar tables for the x816 dialect.
//!
//! The parser is driven entirely by these two tables. Each rule maps a
//! nonterminal (with optional metadata baked in) to one ordered pattern of
//! token types and nonterminals; a nonterminal with several alternatives
//! appears once per alternative. Table order encodes priority: the matcher
//! tries rules top to bottom and the first full match wins, so more
//! specific shapes (a two-byte target before a one-byte one, an immediate
//! operand before a bare constant) must precede the general ones.

use crate::isa::AddressingMode;
use crate::lexer::TokenType;

/// Nonterminals of the expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    Comment,
    Mnemonic,
    LabelDef,
    NamedConstantDef,
    Directive,
    /// Four-byte literal.
    Qword,
    /// Two-byte literal.
    Dword,
    /// One-byte literal.
    Word,
    Mask,
    /// A syntactic addressing form; metadata carries the selected mode.
    Target,
    Number,
    ArithOp,
    Constant,
    /// Comma-separated constants (directive parameters).
    ParamList,
    ImmValue,
}

/// Statement shapes, in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Comment,
    LabelDef,
    NamedConstantDef,
    Directive,
    Instruction,
}

/// One element of a rule pattern: a terminal or a nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternPart {
    Tok(TokenType),
    Expr(ExprKind),
}

/// Metadata baked into an expression rule, appended to the values the
/// rule's children yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMeta {
    Mode(AddressingMode),
    /// Nominal operand width in bytes.
    Size(u8),
    /// Immediate-addressing marker.
    Imm,
}

pub struct ExprRule {
    pub kind: ExprKind,
    pub meta: &'static [RuleMeta],
    pub pattern: &'static [PatternPart],
}

pub struct StatementRule {
    pub kind: StatementKind,
    pub pattern: &'static [ExprKind],
}

use self::ExprKind as K;
use self::PatternPart::{Expr as E, Tok as T};
use self::RuleMeta::{Imm, Mode, Size};
use crate::isa::AddressingMode as M;
use crate::lexer::TokenType as Tk;

#[rustfmt::skip]
pub static EXPRESSION_RULES: &[ExprRule] = &[
    ExprRule { kind: K::Comment,          meta: &[],                   pattern: &[T(Tk::Comment)] },
    ExprRule { kind: K::Mnemonic,         meta: &[],                   pattern: &[T(Tk::Mnemonic)] },
    ExprRule { kind: K::LabelDef,         meta: &[],                   pattern: &[T(Tk::Identifier), T(Tk::Colon)] },
    ExprRule { kind: K::NamedConstantDef, meta: &[],                   pattern: &[T(Tk::Identifier), T(Tk::Equals), E(K::Constant)] },
    ExprRule { kind: K::Directive,        meta: &[],                   pattern: &[T(Tk::Directive)] },

    ExprRule { kind: K::Qword,            meta: &[Size(4)],            pattern: &[T(Tk::HexQword)] },
    ExprRule { kind: K::Qword,            meta: &[Size(4)],            pattern: &[T(Tk::BinQword)] },
    ExprRule { kind: K::Dword,            meta: &[Size(2)],            pattern: &[T(Tk::HexDword)] },
    ExprRule { kind: K::Dword,            meta: &[Size(2)],            pattern: &[T(Tk::BinDword)] },
    ExprRule { kind: K::Word,             meta: &[Size(1)],            pattern: &[T(Tk::HexWord)] },
    ExprRule { kind: K::Word,             meta: &[Size(1)],            pattern: &[T(Tk::DecWord)] },
    ExprRule { kind: K::Word,             meta: &[Size(1)],            pattern: &[T(Tk::BinWord)] },
    // A masked wider literal reduces to one byte.
    ExprRule { kind: K::Word,             meta: &[Size(1)],            pattern: &[E(K::Mask), E(K::Dword)] },

    // The mask payload rides on the token itself.
    ExprRule { kind: K::Mask,             meta: &[],                   pattern: &[T(Tk::GreaterThan)] },
    ExprRule { kind: K::Mask,             meta: &[],                   pattern: &[T(Tk::LessThan)] },

    ExprRule { kind: K::Target,           meta: &[Mode(M::AbsoluteX)], pattern: &[E(K::Dword), T(Tk::Comma), T(Tk::X)] },
    ExprRule { kind: K::Target,           meta: &[Mode(M::AbsoluteY)], pattern: &[E(K::Dword), T(Tk::Comma), T(Tk::Y)] },
    ExprRule { kind: K::Target,           meta: &[Mode(M::ZeroPageX)], pattern: &[E(K::Word), T(Tk::Comma), T(Tk::X)] },
    ExprRule { kind: K::Target,           meta: &[Mode(M::ZeroPageY)], pattern: &[E(K::Word), T(Tk::Comma), T(Tk::Y)] },
    ExprRule { kind: K::Target,           meta: &[Mode(M::Absolute)],  pattern: &[E(K::Dword)] },
    ExprRule { kind: K::Target,           meta: &[Mode(M::ZeroPage)],  pattern: &[E(K::Word)] },
    ExprRule { kind: K::Target,           meta: &[Mode(M::Indirect)],  pattern: &[T(Tk::LeftParen), E(K::Dword), T(Tk::RightParen)] },
    ExprRule { kind: K::Target,           meta: &[Mode(M::IndexedIndirectX)], pattern: &[T(Tk::LeftParen), E(K::Word), T(Tk::Comma), T(Tk::X), T(Tk::RightParen)] },
    ExprRule { kind: K::Target,           meta: &[Mode(M::IndirectIndexedY)], pattern: &[T(Tk::LeftParen), E(K::Word), T(Tk::RightParen), T(Tk::Comma), T(Tk::Y)] },

    ExprRule { kind: K::Number,           meta: &[],                   pattern: &[E(K::Qword)] },
    ExprRule { kind: K::Number,           meta: &[],                   pattern: &[E(K::Dword)] },
    ExprRule { kind: K::Number,           meta: &[],                   pattern: &[E(K::Word)] },

    ExprRule { kind: K::ArithOp,          meta: &[],                   pattern: &[T(Tk::Plus)] },
    ExprRule { kind: K::ArithOp,          meta: &[],                   pattern: &[T(Tk::Minus)] },

    ExprRule { kind: K::Constant,         meta: &[],                   pattern: &[T(Tk::Identifier), E(K::ArithOp), E(K::Constant)] },
    ExprRule { kind: K::Constant,         meta: &[],                   pattern: &[E(K::Number), E(K::ArithOp), E(K::Constant)] },
    ExprRule { kind: K::Constant,         meta: &[],                   pattern: &[T(Tk::Identifier)] },
    ExprRule { kind: K::Constant,         meta: &[],                   pattern: &[E(K::Number)] },
    ExprRule { kind: K::Constant,         meta: &[],                   pattern: &[E(K::Mask), E(K::Constant)] },

    ExprRule { kind: K::ParamList,        meta: &[],                   pattern: &[E(K::Constant), T(Tk::Comma), E(K::ParamList)] },
    ExprRule { kind: K::ParamList,        meta: &[],                   pattern: &[E(K::Constant)] },

    ExprRule { kind: K::ImmValue,         meta: &[Imm],                pattern: &[T(Tk::Pound), E(K::Constant)] },
];

#[rustfmt::skip]
pub static STATEMENT_RULES: &[StatementRule] = &[
    StatementRule { kind: StatementKind::Comment,          pattern: &[K::Comment] },
    StatementRule { kind: StatementKind::LabelDef,         pattern: &[K::LabelDef] },
    StatementRule { kind: StatementKind::NamedConstantDef, pattern: &[K::NamedConstantDef] },
    StatementRule { kind: StatementKind::Directive,        pattern: &[K::Directive, K::ParamList] },
    StatementRule { kind: StatementKind::Directive,        pattern: &[K::Directive] },
    StatementRule { kind: StatementKind::Instruction,      pattern: &[K::Mnemonic, K::ImmValue] },
    StatementRule { kind: StatementKind::Instruction,      pattern: &[K::Mnemonic, K::Target] },
    StatementRule { kind: StatementKind::Instruction,      pattern: &[K::Mnemonic, K::Constant] },
    StatementRule { kind: StatementKind::Instruction,      pattern: &[K::Mnemonic] },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_rules_prefer_wider_forms() {
        let modes: Vec<AddressingMode> = EXPRESSION_RULES
            .iter()
            .filter(|rule| rule.kind == ExprKind::Target)
            .filter_map(|rule| match rule.meta {
                [RuleMeta::Mode(mode)] => Some(*mode),
                _ => None,
            })
            .collect();
        let abx = modes.iter().position(|m| *m == M::AbsoluteX).unwrap();
        let zpx = modes.iter().position(|m| *m == M::ZeroPageX).unwrap();
        let abs = modes.iter().position(|m| *m == M::Absolute).unwrap();
        let zrp = modes.iter().position(|m| *m == M::ZeroPage).unwrap();
        assert!(abx < zpx);
        assert!(abs < zrp);
        assert_eq!(modes.len(), 9);
    }

    #[test]
    fn every_target_rule_carries_a_mode() {
        for rule in EXPRESSION_RULES.iter().filter(|r| r.kind == ExprKind::Target) {
            assert!(matches!(rule.meta, [RuleMeta::Mode(_)]));
        }
    }

    #[test]
    fn statement_rules_put_specific_instruction_shapes_first() {
        let instr: Vec<&StatementRule> = STATEMENT_RULES
            .iter()
            .filter(|rule| rule.kind == StatementKind::Instruction)
            .collect();
        assert_eq!(instr[0].pattern, &[K::Mnemonic, K::ImmValue]);
        assert_eq!(instr[1].pattern, &[K::Mnemonic, K::Target]);
        assert_eq!(instr[2].pattern, &[K::Mnemonic, K::Constant]);
        assert_eq!(instr[3].pattern, &[K::Mnemonic]);
    }
}
