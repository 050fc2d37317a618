//! 8-bit ALU: arithmetic, logic, and the implemented shift/rotate variants.

use super::flags::FlagsUpdate;
use crate::decoder::AluOp;

/// Result value and flag update produced by one ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult {
    /// 8-bit result.
    pub value: u8,
    /// Flags to commit.
    pub flags: FlagsUpdate,
}

const fn signed_overflow(wide: i16) -> bool {
    wide < i8::MIN as i16 || wide > i8::MAX as i16
}

const fn nzcv(value: u8, carry: bool, overflow: bool) -> AluResult {
    AluResult {
        value,
        flags: FlagsUpdate::UpdateNZCV {
            zero: value == 0,
            negative: value & 0x80 != 0,
            carry,
            overflow,
        },
    }
}

/// Adds `a + b + carry_in`; `C` is the unsigned carry-out.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn add(a: u8, b: u8, carry_in: bool) -> AluResult {
    let c = carry_in as u16;
    let wide = a as u16 + b as u16 + c;
    let signed = (a as i8) as i16 + (b as i8) as i16 + c as i16;
    nzcv(wide as u8, wide > 0xFF, signed_overflow(signed))
}

/// Subtracts `a - b - borrow_in`; `C` is the borrow.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn sub(a: u8, b: u8, borrow_in: bool) -> AluResult {
    let c = borrow_in as u16;
    let borrow = (a as u16) < b as u16 + c;
    let value = a.wrapping_sub(b).wrapping_sub(c as u8);
    let signed = (a as i8) as i16 - (b as i8) as i16 - c as i16;
    nzcv(value, borrow, signed_overflow(signed))
}

/// Runs a two-operand ALU op with the current carry flag as carry/borrow-in.
#[must_use]
pub const fn execute_alu(op: AluOp, a: u8, b: u8, carry_flag: bool) -> AluResult {
    match op {
        AluOp::Add => add(a, b, false),
        AluOp::Adc => add(a, b, carry_flag),
        AluOp::Sub | AluOp::Cmp => sub(a, b, false),
        AluOp::Sbc => sub(a, b, carry_flag),
        AluOp::And => nzcv(a & b, false, false),
        AluOp::Or => nzcv(a | b, false, false),
        AluOp::Eor => nzcv(a ^ b, false, false),
    }
}

const fn nzc(value: u8, carry: bool) -> AluResult {
    AluResult {
        value,
        flags: FlagsUpdate::UpdateNZC {
            zero: value == 0,
            negative: value & 0x80 != 0,
            carry,
        },
    }
}

/// `SRA`: arithmetic right shift, bit 7 replicated, old bit 0 into `C`.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub const fn shift_right_arithmetic(a: u8) -> AluResult {
    nzc(((a as i8) >> 1) as u8, a & 0x01 != 0)
}

/// `RLL`: rotate left, old bit 7 into bit 0 and into `C`.
#[must_use]
pub const fn rotate_left_logical(a: u8) -> AluResult {
    nzc(a.rotate_left(1), a & 0x80 != 0)
}
