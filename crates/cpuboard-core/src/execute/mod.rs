//! Single-step execution pipeline.
//!
//! Each step runs the phases in order:
//! 1. Fetch the first word at `PC` and advance `PC`
//! 2. Decode it
//! 3. Resolve the operand, consuming the second word when required
//! 4. Execute on the ALU
//! 5. Write back registers, memory, flags and I/O buffers
//! 6. Resolve the next `PC`
//!
//! Phases 1 to 4 only accumulate side effects in [`ExecuteState`]; nothing
//! but `PC` changes until [`commit_execution`] runs, so a faulting
//! instruction leaves registers, flags, memory and I/O untouched.

mod alu;
mod flags;
mod helpers;

pub use alu::{add, execute_alu, rotate_left_logical, shift_right_arithmetic, sub, AluResult};
pub use flags::FlagsUpdate;
pub use helpers::{branch_taken, compute_effective_address, resolve_operand, ResolvedOperand};

use tracing::{debug, trace, warn};

use crate::decoder::{DecodedInstruction, Decoder, Instruction, ShiftMode};
use crate::fault::FaultCode;
use crate::memory::{read_word, region_address, write_word, MemoryRegion};
use crate::state::{Register, RunState};
use crate::{CpuBoard, IoBuffer, StepOutcome};

/// Side effects accumulated by one instruction before commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecuteState {
    /// `PC` of the first instruction word.
    pub pc_at_fetch: u8,
    /// Register written back, with its value.
    pub register_write: Option<(Register, u8)>,
    /// Memory word written back (`ST`).
    pub memory_write: Option<(u16, u8)>,
    /// Flag update to apply.
    pub flags_update: FlagsUpdate,
    /// `PC` override for taken branches and jumps.
    pub next_pc: Option<u8>,
    /// Value latched into the output buffer (`OUT`).
    pub output: Option<u8>,
    /// Input buffer was read and must be marked empty (`IN`).
    pub input_consumed: bool,
    /// `HLT` executed.
    pub halt: bool,
}

impl ExecuteState {
    /// Creates an empty execute state for the instruction fetched at `pc`.
    #[must_use]
    pub fn new(pc_at_fetch: u8) -> Self {
        Self {
            pc_at_fetch,
            ..Self::default()
        }
    }
}

fn fetch_word(board: &mut CpuBoard) -> u8 {
    let pc = board.arch.advance_pc();
    read_word(&board.memory, region_address(MemoryRegion::Program, pc))
}

/// Runs operand resolution and execute for a decoded instruction.
///
/// Consumes the second instruction word from `board` when the instruction
/// has one; no other state is modified.
///
/// # Errors
///
/// Returns [`FaultCode::UnsupportedShiftMode`] for unimplemented shift or
/// rotate sub-modes and [`FaultCode::OperandFetch`] for a store without an
/// effective address.
pub fn execute_instruction(
    decoded: &DecodedInstruction,
    board: &mut CpuBoard,
    pc_at_fetch: u8,
) -> Result<ExecuteState, FaultCode> {
    let mut exec = ExecuteState::new(pc_at_fetch);

    match decoded.instruction {
        Instruction::Nop => {}
        Instruction::Halt => exec.halt = true,
        Instruction::Out => exec.output = Some(board.arch.acc()),
        Instruction::In => match board.ibuf {
            Some(input) => {
                exec.register_write = Some((Register::Acc, input.buf));
                exec.input_consumed = true;
            }
            None => warn!(pc = pc_at_fetch, "IN executed with no input attached"),
        },
        Instruction::ClearCarry => exec.flags_update = FlagsUpdate::Carry(false),
        Instruction::SetCarry => exec.flags_update = FlagsUpdate::Carry(true),
        Instruction::Load { reg, mode } => {
            let second = mode.needs_second_word().then(|| fetch_word(board));
            let operand = resolve_operand(mode, second, &board.arch, &board.memory)?;
            exec.register_write = Some((reg, operand.value));
        }
        Instruction::Store { reg, mode } => {
            let second = mode.needs_second_word().then(|| fetch_word(board));
            let operand = resolve_operand(mode, second, &board.arch, &board.memory)?;
            let addr = operand.effective_address.ok_or(FaultCode::OperandFetch)?;
            exec.memory_write = Some((addr, board.arch.reg(reg)));
        }
        Instruction::Alu { op, reg, mode } => {
            let second = mode.needs_second_word().then(|| fetch_word(board));
            let operand = resolve_operand(mode, second, &board.arch, &board.memory)?;
            let result = execute_alu(op, board.arch.reg(reg), operand.value, board.arch.carry());
            if op.writes_back() {
                exec.register_write = Some((reg, result.value));
            }
            exec.flags_update = result.flags;
        }
        Instruction::Shift { reg, mode } => {
            if mode != ShiftMode::ArithmeticRight {
                return Err(FaultCode::UnsupportedShiftMode);
            }
            let result = shift_right_arithmetic(board.arch.reg(reg));
            exec.register_write = Some((reg, result.value));
            exec.flags_update = result.flags;
        }
        Instruction::Rotate { reg, mode } => {
            if mode != ShiftMode::LogicalLeft {
                return Err(FaultCode::UnsupportedShiftMode);
            }
            let result = rotate_left_logical(board.arch.reg(reg));
            exec.register_write = Some((reg, result.value));
            exec.flags_update = result.flags;
        }
        Instruction::Branch { cond } => {
            let target = fetch_word(board);
            if branch_taken(cond, &board.arch, board.obuf, board.ibuf) {
                debug!(pc = pc_at_fetch, target, ?cond, "branch taken");
                exec.next_pc = Some(target);
            }
        }
        Instruction::CallAndLink => {
            let target = fetch_word(board);
            exec.register_write = Some((Register::Acc, pc_at_fetch.wrapping_add(2)));
            exec.next_pc = Some(target);
        }
        Instruction::JumpRegister => exec.next_pc = Some(board.arch.acc()),
    }

    Ok(exec)
}

/// Applies the accumulated side effects of a successfully executed instruction.
pub fn commit_execution(board: &mut CpuBoard, exec: &ExecuteState) {
    let pc = exec.pc_at_fetch;

    if let Some((reg, value)) = exec.register_write {
        debug!(pc, reg = reg.name(), value, "register write-back");
        board.arch.set_reg(reg, value);
    }

    if let Some((addr, value)) = exec.memory_write {
        debug!(pc, addr, value, "memory write-back");
        if !write_word(&mut board.memory, addr, value) {
            warn!(pc, addr, "memory write-back dropped: address not backed");
        }
    }

    exec.flags_update.apply(&mut board.arch);

    if let Some(value) = exec.output {
        board.obuf = IoBuffer {
            flag: true,
            buf: value,
        };
    }

    if exec.input_consumed {
        if let Some(input) = board.ibuf.as_mut() {
            input.flag = false;
        }
    }

    if let Some(pc) = exec.next_pc {
        board.arch.set_pc(pc);
    }

    if exec.halt {
        board.run_state = RunState::Halted;
    }
}

/// Executes exactly one instruction on `board`.
///
/// A halted or fault-latched board is left untouched and reports its
/// latched outcome again.
pub fn step_one(board: &mut CpuBoard) -> StepOutcome {
    if !board.run_state.is_running() {
        return match board.run_state.latched_fault() {
            Some(cause) => StepOutcome::Fault {
                cause,
                pc: board.latched_fault_pc.unwrap_or(board.arch.pc()),
            },
            None => StepOutcome::Halted,
        };
    }

    let pc_at_fetch = board.arch.pc();
    let word = fetch_word(board);
    trace!(pc = pc_at_fetch, word, "fetch");

    let result = Result::<DecodedInstruction, FaultCode>::from(Decoder::decode(word))
        .and_then(|decoded| {
            trace!(
                pc = pc_at_fetch,
                instruction = ?decoded.instruction,
                words = decoded.words(),
                "decode"
            );
            execute_instruction(&decoded, board, pc_at_fetch).map(|exec| (decoded, exec))
        });

    match result {
        Ok((decoded, exec)) => {
            commit_execution(board, &exec);
            debug!(
                pc = pc_at_fetch,
                mnemonic = decoded.opcode.mnemonic(),
                next_pc = board.arch.pc(),
                "retired"
            );
            if exec.halt {
                StepOutcome::Halted
            } else {
                StepOutcome::Continue
            }
        }
        Err(cause) => {
            warn!(pc = pc_at_fetch, word, %cause, class = ?cause.class(), "fault raised");
            board.run_state = RunState::FaultLatched(cause);
            board.latched_fault_pc = Some(pc_at_fetch);
            StepOutcome::Fault {
                cause,
                pc: pc_at_fetch,
            }
        }
    }
}
