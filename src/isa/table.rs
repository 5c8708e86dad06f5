// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Instruction table for the MOS 6502.
//!
//! The table is small enough that linear search is sufficient.

use crate::isa::{AddressingMode, Mnemonic};

/// Result of an instruction lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionInfo {
    pub opcode: u8,
    /// Total encoded length including the opcode byte.
    pub length: u8,
}

#[rustfmt::skip]
pub static INSTRUCTION_TABLE: &[(Mnemonic, AddressingMode, u8)] = &[
    (Mnemonic::Adc, AddressingMode::Immediate,        0x69),
    (Mnemonic::Adc, AddressingMode::ZeroPage,         0x65),
    (Mnemonic::Adc, AddressingMode::ZeroPageX,        0x75),
    (Mnemonic::Adc, AddressingMode::Absolute,         0x6D),
    (Mnemonic::Adc, AddressingMode::AbsoluteX,        0x7D),
    (Mnemonic::Adc, AddressingMode::AbsoluteY,        0x79),
    (Mnemonic::Adc, AddressingMode::IndexedIndirectX, 0x61),
    (Mnemonic::Adc, AddressingMode::IndirectIndexedY, 0x71),
    (Mnemonic::And, AddressingMode::Immediate,        0x29),
    (Mnemonic::And, AddressingMode::ZeroPage,         0x25),
    (Mnemonic::And, AddressingMode::ZeroPageX,        0x35),
    (Mnemonic::And, AddressingMode::Absolute,         0x2D),
    (Mnemonic::And, AddressingMode::AbsoluteX,        0x3D),
    (Mnemonic::And, AddressingMode::AbsoluteY,        0x39),
    (Mnemonic::And, AddressingMode::IndexedIndirectX, 0x21),
    (Mnemonic::And, AddressingMode::IndirectIndexedY, 0x31),
    (Mnemonic::Asl, AddressingMode::Implied,          0x0A),
    (Mnemonic::Asl, AddressingMode::ZeroPage,         0x06),
    (Mnemonic::Asl, AddressingMode::ZeroPageX,        0x16),
    (Mnemonic::Asl, AddressingMode::Absolute,         0x0E),
    (Mnemonic::Asl, AddressingMode::AbsoluteX,        0x1E),
    (Mnemonic::Bcc, AddressingMode::Relative,         0x90),
    (Mnemonic::Bcs, AddressingMode::Relative,         0xB0),
    (Mnemonic::Beq, AddressingMode::Relative,         0xF0),
    (Mnemonic::Bit, AddressingMode::ZeroPage,         0x24),
    (Mnemonic::Bit, AddressingMode::Absolute,         0x2C),
    (Mnemonic::Bmi, AddressingMode::Relative,         0x30),
    (Mnemonic::Bne, AddressingMode::Relative,         0xD0),
    (Mnemonic::Bpl, AddressingMode::Relative,         0x10),
    (Mnemonic::Brk, AddressingMode::Implied,          0x00),
    (Mnemonic::Bvc, AddressingMode::Relative,         0x50),
    (Mnemonic::Bvs, AddressingMode::Relative,         0x70),
    (Mnemonic::Clc, AddressingMode::Implied,          0x18),
    (Mnemonic::Cld, AddressingMode::Implied,          0xD8),
    (Mnemonic::Cli, AddressingMode::Implied,          0x58),
    (Mnemonic::Clv, AddressingMode::Implied,          0xB8),
    (Mnemonic::Cmp, AddressingMode::Immediate,        0xC9),
    (Mnemonic::Cmp, AddressingMode::ZeroPage,         0xC5),
    (Mnemonic::Cmp, AddressingMode::ZeroPageX,        0xD5),
    (Mnemonic::Cmp, AddressingMode::Absolute,         0xCD),
    (Mnemonic::Cmp, AddressingMode::AbsoluteX,        0xDD),
    (Mnemonic::Cmp, AddressingMode::AbsoluteY,        0xD9),
    (Mnemonic::Cmp, AddressingMode::IndexedIndirectX, 0xC1),
    (Mnemonic::Cmp, AddressingMode::IndirectIndexedY, 0xD1),
    (Mnemonic::Cpx, AddressingMode::Immediate,        0xE0),
    (Mnemonic::Cpx, AddressingMode::ZeroPage,         0xE4),
    (Mnemonic::Cpx, AddressingMode::Absolute,         0xEC),
    (Mnemonic::Cpy, AddressingMode::Immediate,        0xC0),
    (Mnemonic::Cpy, AddressingMode::ZeroPage,         0xC4),
    (Mnemonic::Cpy, AddressingMode::Absolute,         0xCC),
    (Mnemonic::Dec, AddressingMode::ZeroPage,         0xC6),
    (Mnemonic::Dec, AddressingMode::ZeroPageX,        0xD6),
    (Mnemonic::Dec, AddressingMode::Absolute,         0xCE),
    (Mnemonic::Dec, AddressingMode::AbsoluteX,        0xDE),
    (Mnemonic::Dex, AddressingMode::Implied,          0xCA),
    (Mnemonic::Dey, AddressingMode::Implied,          0x88),
    (Mnemonic::Eor, AddressingMode::Immediate,        0x49),
    (Mnemonic::Eor, AddressingMode::ZeroPage,         0x45),
    (Mnemonic::Eor, AddressingMode::ZeroPageX,        0x55),
    (Mnemonic::Eor, AddressingMode::Absolute,         0x4D),
    (Mnemonic::Eor, AddressingMode::AbsoluteX,        0x5D),
    (Mnemonic::Eor, AddressingMode::AbsoluteY,        0x59),
    (Mnemonic::Eor, AddressingMode::IndexedIndirectX, 0x41),
    (Mnemonic::Eor, AddressingMode::IndirectIndexedY, 0x51),
    (Mnemonic::Inc, AddressingMode::ZeroPage,         0xE6),
    (Mnemonic::Inc, AddressingMode::ZeroPageX,        0xF6),
    (Mnemonic::Inc, AddressingMode::Absolute,         0xEE),
    (Mnemonic::Inc, AddressingMode::AbsoluteX,        0xFE),
    (Mnemonic::Inx, AddressingMode::Implied,          0xE8),
    (Mnemonic::Iny, AddressingMode::Implied,          0xC8),
    (Mnemonic::Jmp, AddressingMode::Absolute,         0x4C),
    (Mnemonic::Jmp, AddressingMode::Indirect,         0x6C),
    (Mnemonic::Jsr, AddressingMode::Absolute,         0x20),
    (Mnemonic::Lda, AddressingMode::Immediate,        0xA9),
    (Mnemonic::Lda, AddressingMode::ZeroPage,         0xA5),
    (Mnemonic::Lda, AddressingMode::ZeroPageX,        0xB5),
    (Mnemonic::Lda, AddressingMode::Absolute,         0xAD),
    (Mnemonic::Lda, AddressingMode::AbsoluteX,        0xBD),
    (Mnemonic::Lda, AddressingMode::AbsoluteY,        0xB9),
    (Mnemonic::Lda, AddressingMode::IndexedIndirectX, 0xA1),
    (Mnemonic::Lda, AddressingMode::IndirectIndexedY, 0xB1),
    (Mnemonic::Ldx, AddressingMode::Immediate,        0xA2),
    (Mnemonic::Ldx, AddressingMode::ZeroPage,         0xA6),
    (Mnemonic::Ldx, AddressingMode::ZeroPageY,        0xB6),
    (Mnemonic::Ldx, AddressingMode::Absolute,         0xAE),
    (Mnemonic::Ldx, AddressingMode::AbsoluteY,        0xBE),
    (Mnemonic::Ldy, AddressingMode::Immediate,        0xA0),
    (Mnemonic::Ldy, AddressingMode::ZeroPage,         0xA4),
    (Mnemonic::Ldy, AddressingMode::ZeroPageX,        0xB4),
    (Mnemonic::Ldy, AddressingMode::Absolute,         0xAC),
    (Mnemonic::Ldy, AddressingMode::AbsoluteX,        0xBC),
    (Mnemonic::Lsr, AddressingMode::Implied,          0x4A),
    (Mnemonic::Lsr, AddressingMode::ZeroPage,         0x46),
    (Mnemonic::Lsr, AddressingMode::ZeroPageX,        0x56),
    (Mnemonic::Lsr, AddressingMode::Absolute,         0x4E),
    (Mnemonic::Lsr, AddressingMode::AbsoluteX,        0x5E),
    (Mnemonic::Nop, AddressingMode::Implied,          0xEA),
    (Mnemonic::Ora, AddressingMode::Immediate,        0x09),
    (Mnemonic::Ora, AddressingMode::ZeroPage,         0x05),
    (Mnemonic::Ora, AddressingMode::ZeroPageX,        0x15),
    (Mnemonic::Ora, AddressingMode::Absolute,         0x0D),
    (Mnemonic::Ora, AddressingMode::AbsoluteX,        0x1D),
    (Mnemonic::Ora, AddressingMode::AbsoluteY,        0x19),
    (Mnemonic::Ora, AddressingMode::IndexedIndirectX, 0x01),
    (Mnemonic::Ora, AddressingMode::IndirectIndexedY, 0x11),
    (Mnemonic::Pha, AddressingMode::Implied,          0x48),
    (Mnemonic::Php, AddressingMode::Implied,          0x08),
    (Mnemonic::Pla, AddressingMode::Implied,          0x68),
    (Mnemonic::Plp, AddressingMode::Implied,          0x28),
    (Mnemonic::Rol, AddressingMode::Implied,          0x2A),
    (Mnemonic::Rol, AddressingMode::ZeroPage,         0x26),
    (Mnemonic::Rol, AddressingMode::ZeroPageX,        0x36),
    (Mnemonic::Rol, AddressingMode::Absolute,         0x2E),
    (Mnemonic::Rol, AddressingMode::AbsoluteX,        0x3E),
    (Mnemonic::Ror, AddressingMode::Implied,          0x6A),
    (Mnemonic::Ror, AddressingMode::ZeroPage,         0x66),
    (Mnemonic::Ror, AddressingMode::ZeroPageX,        0x76),
    (Mnemonic::Ror, AddressingMode::Absolute,         0x6E),
    (Mnemonic::Ror, AddressingMode::AbsoluteX,        0x7E),
    (Mnemonic::Rti, AddressingMode::Implied,          0x40),
    (Mnemonic::Rts, AddressingMode::Implied,          0x60),
    (Mnemonic::Sbc, AddressingMode::Immediate,        0xE9),
    (Mnemonic::Sbc, AddressingMode::ZeroPage,         0xE5),
    (Mnemonic::Sbc, AddressingMode::ZeroPageX,        0xF5),
    (Mnemonic::Sbc, AddressingMode::Absolute,         0xED),
    (Mnemonic::Sbc, AddressingMode::AbsoluteX,        0xFD),
    (Mnemonic::Sbc, AddressingMode::AbsoluteY,        0xF9),
    (Mnemonic::Sbc, AddressingMode::IndexedIndirectX, 0xE1),
    (Mnemonic::Sbc, AddressingMode::IndirectIndexedY, 0xF1),
    (Mnemonic::Sec, AddressingMode::Implied,          0x38),
    (Mnemonic::Sed, AddressingMode::Implied,          0xF8),
    (Mnemonic::Sei, AddressingMode::Implied,          0x78),
    (Mnemonic::Sta, AddressingMode::ZeroPage,         0x85),
    (Mnemonic::Sta, AddressingMode::ZeroPageX,        0x95),
    (Mnemonic::Sta, AddressingMode::Absolute,         0x8D),
    (Mnemonic::Sta, AddressingMode::AbsoluteX,        0x9D),
    (Mnemonic::Sta, AddressingMode::AbsoluteY,        0x99),
    (Mnemonic::Sta, AddressingMode::IndexedIndirectX, 0x81),
    (Mnemonic::Sta, AddressingMode::IndirectIndexedY, 0x91),
    (Mnemonic::Stx, AddressingMode::ZeroPage,         0x86),
    (Mnemonic::Stx, AddressingMode::ZeroPageY,        0x96),
    (Mnemonic::Stx, AddressingMode::Absolute,         0x8E),
    (Mnemonic::Sty, AddressingMode::ZeroPage,         0x84),
    (Mnemonic::Sty, AddressingMode::ZeroPageX,        0x94),
    (Mnemonic::Sty, AddressingMode::Absolute,         0x8C),
    (Mnemonic::Tax, AddressingMode::Implied,          0xAA),
    (Mnemonic::Tay, AddressingMode::Implied,          0xA8),
    (Mnemonic::Tsx, AddressingMode::Implied,          0xBA),
    (Mnemonic::Txa, AddressingMode::Implied,          0x8A),
    (Mnemonic::Txs, AddressingMode::Implied,          0x9A),
    (Mnemonic::Tya, AddressingMode::Implied,          0x98),
];

/// Look up an instruction by mnemonic and addressing mode.
pub fn lookup(mnemonic: Mnemonic, mode: AddressingMode) -> Option<InstructionInfo> {
    INSTRUCTION_TABLE
        .iter()
        .find(|(m, am, _)| *m == mnemonic && *am == mode)
        .map(|(_, am, opcode)| InstructionInfo {
            opcode: *opcode,
            length: 1 + am.operand_size(),
        })
}

/// Check whether a `(mnemonic, mode)` pair exists.
pub fn has_mode(mnemonic: Mnemonic, mode: AddressingMode) -> bool {
    lookup(mnemonic, mode).is_some()
}
