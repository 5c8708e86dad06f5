// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Shared MOS 6502 instruction-set model.
//!
//! [`Mnemonic`] covers the 56 documented instructions, [`AddressingMode`]
//! the modes of the x816 dialect together with their encoded operand
//! widths, and [`MnemonicClass`] the coarse grouping the encoder cares
//! about: branches always use relative addressing, and absolute jumps are
//! rebased against the `.org` origin.

pub mod table;

pub use table::{lookup, InstructionInfo, INSTRUCTION_TABLE};

use std::fmt;

/// The 56 documented 6502 mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

/// Coarse instruction grouping used during encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicClass {
    /// `JMP`/`JSR`: absolute targets are offset by the `.org` origin.
    Jump,
    /// Conditional branches: the operand is a relative offset.
    Branch,
    Other,
}

impl Mnemonic {
    /// Case-insensitive lookup of a three-letter mnemonic.
    pub fn parse(text: &str) -> Option<Mnemonic> {
        use Mnemonic::*;
        let m = match text.to_ascii_uppercase().as_str() {
            "ADC" => Adc, "AND" => And, "ASL" => Asl, "BCC" => Bcc,
            "BCS" => Bcs, "BEQ" => Beq, "BIT" => Bit, "BMI" => Bmi,
            "BNE" => Bne, "BPL" => Bpl, "BRK" => Brk, "BVC" => Bvc,
            "BVS" => Bvs, "CLC" => Clc, "CLD" => Cld, "CLI" => Cli,
            "CLV" => Clv, "CMP" => Cmp, "CPX" => Cpx, "CPY" => Cpy,
            "DEC" => Dec, "DEX" => Dex, "DEY" => Dey, "EOR" => Eor,
            "INC" => Inc, "INX" => Inx, "INY" => Iny, "JMP" => Jmp,
            "JSR" => Jsr, "LDA" => Lda, "LDX" => Ldx, "LDY" => Ldy,
            "LSR" => Lsr, "NOP" => Nop, "ORA" => Ora, "PHA" => Pha,
            "PHP" => Php, "PLA" => Pla, "PLP" => Plp, "ROL" => Rol,
            "ROR" => Ror, "RTI" => Rti, "RTS" => Rts, "SBC" => Sbc,
            "SEC" => Sec, "SED" => Sed, "SEI" => Sei, "STA" => Sta,
            "STX" => Stx, "STY" => Sty, "TAX" => Tax, "TAY" => Tay,
            "TSX" => Tsx, "TXA" => Txa, "TXS" => Txs, "TYA" => Tya,
            _ => return None,
        };
        Some(m)
    }

    pub fn class(self) -> MnemonicClass {
        use Mnemonic::*;
        match self {
            Jmp | Jsr => MnemonicClass::Jump,
            Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs => MnemonicClass::Branch,
            _ => MnemonicClass::Other,
        }
    }

    pub fn name(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC",
            Bcs => "BCS", Beq => "BEQ", Bit => "BIT", Bmi => "BMI",
            Bne => "BNE", Bpl => "BPL", Brk => "BRK", Bvc => "BVC",
            Bvs => "BVS", Clc => "CLC", Cld => "CLD", Cli => "CLI",
            Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR",
            Inc => "INC", Inx => "INX", Iny => "INY", Jmp => "JMP",
            Jsr => "JSR", Lda => "LDA", Ldx => "LDX", Ldy => "LDY",
            Lsr => "LSR", Nop => "NOP", Ora => "ORA", Pha => "PHA",
            Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC",
            Sec => "SEC", Sed => "SED", Sei => "SEI", Sta => "STA",
            Stx => "STX", Sty => "STY", Tax => "TAX", Tay => "TAY",
            Tsx => "TSX", Txa => "TXA", Txs => "TXS", Tya => "TYA",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Addressing modes of the x816 dialect.
///
/// Accumulator-operand instructions (`ASL`, `LSR`, `ROL`, `ROR` without an
/// operand) are folded into [`AddressingMode::Implied`] since the dialect
/// has no explicit `A` operand syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand.
    Implied,
    /// `#$nn` - 8-bit immediate value.
    Immediate,
    /// `$nn` - zero page (8-bit address).
    ZeroPage,
    /// `$nn,X` - zero page indexed by X.
    ZeroPageX,
    /// `$nn,Y` - zero page indexed by Y.
    ZeroPageY,
    /// Branch offset (8-bit signed).
    Relative,
    /// `$nnnn` - absolute (16-bit address).
    Absolute,
    /// `$nnnn,X` - absolute indexed by X.
    AbsoluteX,
    /// `$nnnn,Y` - absolute indexed by Y.
    AbsoluteY,
    /// `($nnnn)` - indirect (JMP only).
    Indirect,
    /// `($nn,X)` - indexed indirect (zero page).
    IndexedIndirectX,
    /// `($nn),Y` - indirect indexed (zero page).
    IndirectIndexedY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub fn operand_size(self) -> u8 {
        match self {
            AddressingMode::Implied => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndexedIndirectX
            | AddressingMode::IndirectIndexedY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AddressingMode::Implied => "implied",
            AddressingMode::Immediate => "immediate",
            AddressingMode::ZeroPage => "zero page",
            AddressingMode::ZeroPageX => "zero page,X",
            AddressingMode::ZeroPageY => "zero page,Y",
            AddressingMode::Relative => "relative",
            AddressingMode::Absolute => "absolute",
            AddressingMode::AbsoluteX => "absolute,X",
            AddressingMode::AbsoluteY => "absolute,Y",
            AddressingMode::Indirect => "indirect",
            AddressingMode::IndexedIndirectX => "indexed indirect,X",
            AddressingMode::IndirectIndexedY => "indirect indexed,Y",
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
