//! Operand resolution and branch-condition helpers.

use crate::api::IoBuffer;
use crate::decoder::{AddressingMode, BranchCondition};
use crate::fault::FaultCode;
use crate::memory::{read_word, region_address};
use crate::state::ArchitecturalState;

/// Operand after addressing-mode resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOperand {
    /// Operand value (register, immediate or memory word).
    pub value: u8,
    /// Full 9-bit address for memory modes.
    pub effective_address: Option<u16>,
}

/// Computes the effective address of a memory mode.
///
/// Index modes add `IX` modulo 256 before the region bit is applied.
#[must_use]
pub const fn compute_effective_address(
    mode: AddressingMode,
    displacement: u8,
    ix: u8,
) -> Option<u16> {
    let Some(region) = mode.region() else {
        return None;
    };
    let low = if mode.is_indexed() {
        ix.wrapping_add(displacement)
    } else {
        displacement
    };
    Some(region_address(region, low))
}

/// Resolves a B-field operand.
///
/// `second_word` is the already consumed second instruction word, present
/// exactly when `mode` needs one.
///
/// # Errors
///
/// Returns [`FaultCode::OperandFetch`] when a mode that needs the second
/// word is resolved without it, or when the effective address is not
/// backed by `memory`.
pub fn resolve_operand(
    mode: AddressingMode,
    second_word: Option<u8>,
    arch: &ArchitecturalState,
    memory: &[u8],
) -> Result<ResolvedOperand, FaultCode> {
    if let Some(reg) = mode.register() {
        return Ok(ResolvedOperand {
            value: arch.reg(reg),
            effective_address: None,
        });
    }

    let word = second_word.ok_or(FaultCode::OperandFetch)?;
    if mode == AddressingMode::Immediate {
        return Ok(ResolvedOperand {
            value: word,
            effective_address: None,
        });
    }

    let addr =
        compute_effective_address(mode, word, arch.ix()).ok_or(FaultCode::OperandFetch)?;
    if usize::from(addr) >= memory.len() {
        return Err(FaultCode::OperandFetch);
    }
    Ok(ResolvedOperand {
        value: read_word(memory, addr),
        effective_address: Some(addr),
    })
}

/// Evaluates a branch condition against the flags and I/O handshake.
///
/// `NoInput` and `NoOutput` are only taken when the I/O collaborator is
/// attached, which `ibuf` being `Some` stands for on both sides.
#[must_use]
pub fn branch_taken(
    cond: BranchCondition,
    arch: &ArchitecturalState,
    obuf: IoBuffer,
    ibuf: Option<IoBuffer>,
) -> bool {
    let (c, v, n, z) = (arch.carry(), arch.overflow(), arch.negative(), arch.zero());
    match cond {
        BranchCondition::Always => true,
        BranchCondition::Overflow => v,
        BranchCondition::NotZero => !z,
        BranchCondition::Zero => z,
        BranchCondition::ZeroOrPositive => !n,
        BranchCondition::Negative => n,
        BranchCondition::Positive => !(n || z),
        BranchCondition::ZeroOrNegative => n || z,
        BranchCondition::NoInput => ibuf.is_some_and(|input| !input.flag),
        BranchCondition::NoOutput => ibuf.is_some() && obuf.flag,
        BranchCondition::NoCarry => !c,
        BranchCondition::Carry => c,
        BranchCondition::GreaterOrEqual => v == n,
        BranchCondition::LessThan => v != n,
        BranchCondition::GreaterThan => v == n && !z,
        BranchCondition::LessOrEqual => v != n || z,
    }
}
