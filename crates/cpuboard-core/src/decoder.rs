//! Instruction decoder for the board ISA.
//!
//! Decoding looks at the first instruction word only. It fixes the
//! instruction variant, its register and addressing mode, and how many
//! words the instruction occupies; the operand phase consumes the second
//! word when one is required.

use crate::encoding::{
    a_field, b_field, branch_condition_bits, classify_word, shift_mode_bits, Opcode,
};
use crate::fault::FaultCode;
use crate::memory::MemoryRegion;
use crate::state::Register;

/// Operand addressing modes selected by the B-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AddressingMode {
    /// `ACC` register operand (`000`).
    Acc,
    /// `IX` register operand (`001`).
    Ix,
    /// Second word is the operand value (`010`).
    Immediate,
    /// `[d]`: absolute program-region address (`100`).
    AbsoluteProgram,
    /// `(d)`: absolute data-region address (`101`).
    AbsoluteData,
    /// `[IX+d]`: index-modified program-region address (`110`).
    IndexProgram,
    /// `(IX+d)`: index-modified data-region address (`111`).
    IndexData,
}

impl AddressingMode {
    /// Converts a 3-bit B-field into an addressing mode; `011` is undefined.
    #[must_use]
    pub const fn from_u3(value: u8) -> Option<Self> {
        match value {
            0b000 => Some(Self::Acc),
            0b001 => Some(Self::Ix),
            0b010 => Some(Self::Immediate),
            0b100 => Some(Self::AbsoluteProgram),
            0b101 => Some(Self::AbsoluteData),
            0b110 => Some(Self::IndexProgram),
            0b111 => Some(Self::IndexData),
            _ => None,
        }
    }

    /// Register read by register-direct modes.
    #[must_use]
    pub const fn register(self) -> Option<Register> {
        match self {
            Self::Acc => Some(Register::Acc),
            Self::Ix => Some(Register::Ix),
            _ => None,
        }
    }

    /// Returns `true` when the mode consumes the second instruction word.
    #[must_use]
    pub const fn needs_second_word(self) -> bool {
        !matches!(self, Self::Acc | Self::Ix)
    }

    /// Memory region targeted by memory modes.
    #[must_use]
    pub const fn region(self) -> Option<MemoryRegion> {
        match self {
            Self::AbsoluteProgram | Self::IndexProgram => Some(MemoryRegion::Program),
            Self::AbsoluteData | Self::IndexData => Some(MemoryRegion::Data),
            Self::Acc | Self::Ix | Self::Immediate => None,
        }
    }

    /// Returns `true` for `[IX+d]` and `(IX+d)`.
    #[must_use]
    pub const fn is_indexed(self) -> bool {
        matches!(self, Self::IndexProgram | Self::IndexData)
    }
}

/// Shift/rotate sub-mode (bits 1..0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum ShiftMode {
    ArithmeticRight,
    ArithmeticLeft,
    LogicalRight,
    LogicalLeft,
}

impl ShiftMode {
    /// Converts the 2-bit sub-mode field.
    #[must_use]
    pub const fn from_u2(value: u8) -> Self {
        match value & 0x03 {
            0b00 => Self::ArithmeticRight,
            0b01 => Self::ArithmeticLeft,
            0b10 => Self::LogicalRight,
            _ => Self::LogicalLeft,
        }
    }
}

/// Branch condition (bits 3..0 of a `0x3_` word).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum BranchCondition {
    /// `BA`, always.
    Always,
    /// `BVF`, `V = 1`.
    Overflow,
    /// `BNZ`, `Z = 0`.
    NotZero,
    /// `BZ`, `Z = 1`.
    Zero,
    /// `BZP`, `N = 0`.
    ZeroOrPositive,
    /// `BN`, `N = 1`.
    Negative,
    /// `BP`, `N = 0` and `Z = 0`.
    Positive,
    /// `BZN`, `N = 1` or `Z = 1`.
    ZeroOrNegative,
    /// `BNI`, input buffer empty.
    NoInput,
    /// `BNO`, output buffer still full.
    NoOutput,
    /// `BNC`, `C = 0`.
    NoCarry,
    /// `BC`, `C = 1`.
    Carry,
    /// `BGE`, `V xor N = 0`.
    GreaterOrEqual,
    /// `BLT`, `V xor N = 1`.
    LessThan,
    /// `BGT`, `(V xor N) or Z = 0`.
    GreaterThan,
    /// `BLE`, `(V xor N) or Z = 1`.
    LessOrEqual,
}

impl BranchCondition {
    /// Converts the 4-bit condition field.
    #[must_use]
    pub const fn from_u4(value: u8) -> Self {
        match value & 0x0F {
            0b0000 => Self::Always,
            0b1000 => Self::Overflow,
            0b0001 => Self::NotZero,
            0b1001 => Self::Zero,
            0b0010 => Self::ZeroOrPositive,
            0b1010 => Self::Negative,
            0b0011 => Self::Positive,
            0b1011 => Self::ZeroOrNegative,
            0b0100 => Self::NoInput,
            0b1100 => Self::NoOutput,
            0b0101 => Self::NoCarry,
            0b1101 => Self::Carry,
            0b0110 => Self::GreaterOrEqual,
            0b1110 => Self::LessThan,
            0b0111 => Self::GreaterThan,
            _ => Self::LessOrEqual,
        }
    }

    /// Returns `true` for conditions that read the I/O handshake flags.
    #[must_use]
    pub const fn reads_io(self) -> bool {
        matches!(self, Self::NoInput | Self::NoOutput)
    }
}

/// ALU operation selected by the opcode prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    Cmp,
    And,
    Or,
    Eor,
}

impl AluOp {
    /// Returns `true` when the result is written back to the register.
    #[must_use]
    pub const fn writes_back(self) -> bool {
        !matches!(self, Self::Cmp)
    }
}

/// Decoded instruction variant with exactly the payload it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Instruction {
    Nop,
    Halt,
    Out,
    In,
    ClearCarry,
    SetCarry,
    Load { reg: Register, mode: AddressingMode },
    Store { reg: Register, mode: AddressingMode },
    Alu { op: AluOp, reg: Register, mode: AddressingMode },
    Shift { reg: Register, mode: ShiftMode },
    Rotate { reg: Register, mode: ShiftMode },
    Branch { cond: BranchCondition },
    CallAndLink,
    JumpRegister,
}

impl Instruction {
    /// Number of words the instruction occupies (1 or 2).
    #[must_use]
    pub const fn words(self) -> u8 {
        match self {
            Self::Load { mode, .. } | Self::Store { mode, .. } | Self::Alu { mode, .. } => {
                if mode.needs_second_word() {
                    2
                } else {
                    1
                }
            }
            Self::Branch { .. } | Self::CallAndLink => 2,
            _ => 1,
        }
    }
}

/// First instruction word together with its decoded form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DecodedInstruction {
    /// Raw first word.
    pub word: u8,
    /// Category from the opcode table.
    pub opcode: Opcode,
    /// Decoded variant.
    pub instruction: Instruction,
}

impl DecodedInstruction {
    /// Number of words the instruction occupies (1 or 2).
    #[must_use]
    pub const fn words(&self) -> u8 {
        self.instruction.words()
    }
}

/// Result of decoding an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedOrFault {
    /// Successfully decoded instruction.
    Instruction(DecodedInstruction),
    /// Decoding failed with a fault.
    Fault(FaultCode),
}

impl DecodedOrFault {
    /// Returns the decoded instruction if present.
    #[must_use]
    pub const fn instruction(self) -> Option<DecodedInstruction> {
        match self {
            Self::Instruction(i) => Some(i),
            Self::Fault(_) => None,
        }
    }

    /// Returns the fault code if decoding failed.
    #[must_use]
    pub const fn fault(self) -> Option<FaultCode> {
        match self {
            Self::Instruction(_) => None,
            Self::Fault(f) => Some(f),
        }
    }
}

impl From<DecodedOrFault> for Result<DecodedInstruction, FaultCode> {
    fn from(value: DecodedOrFault) -> Self {
        match value {
            DecodedOrFault::Instruction(i) => Ok(i),
            DecodedOrFault::Fault(code) => Err(code),
        }
    }
}

/// Instruction decoder for the board ISA.
pub struct Decoder;

impl Decoder {
    /// Decodes the first word of an instruction.
    ///
    /// Faults with [`FaultCode::UnknownInstruction`] for bytes outside the
    /// opcode table and for the undefined B-field `011`. Unsupported shift
    /// and rotate sub-modes decode successfully and fault at execute.
    #[must_use]
    pub fn decode(word: u8) -> DecodedOrFault {
        let Some(opcode) = classify_word(word) else {
            return DecodedOrFault::Fault(FaultCode::UnknownInstruction);
        };

        let reg = Register::from_a_field(a_field(word));
        let mode = if opcode.uses_b_field_addressing() {
            let Some(mode) = AddressingMode::from_u3(b_field(word)) else {
                return DecodedOrFault::Fault(FaultCode::UnknownInstruction);
            };
            Some(mode)
        } else {
            None
        };
        let alu = |op| mode.map(|mode| Instruction::Alu { op, reg, mode });

        let instruction = match opcode {
            Opcode::Nop => Some(Instruction::Nop),
            Opcode::Hlt => Some(Instruction::Halt),
            Opcode::Out => Some(Instruction::Out),
            Opcode::In => Some(Instruction::In),
            Opcode::Rcf => Some(Instruction::ClearCarry),
            Opcode::Scf => Some(Instruction::SetCarry),
            Opcode::Jal => Some(Instruction::CallAndLink),
            Opcode::Jr => Some(Instruction::JumpRegister),
            Opcode::Branch => Some(Instruction::Branch {
                cond: BranchCondition::from_u4(branch_condition_bits(word)),
            }),
            Opcode::Shift => Some(Instruction::Shift {
                reg,
                mode: ShiftMode::from_u2(shift_mode_bits(word)),
            }),
            Opcode::Rotate => Some(Instruction::Rotate {
                reg,
                mode: ShiftMode::from_u2(shift_mode_bits(word)),
            }),
            Opcode::Ld => mode.map(|mode| Instruction::Load { reg, mode }),
            Opcode::St => mode.map(|mode| Instruction::Store { reg, mode }),
            Opcode::Add => alu(AluOp::Add),
            Opcode::Adc => alu(AluOp::Adc),
            Opcode::Sub => alu(AluOp::Sub),
            Opcode::Sbc => alu(AluOp::Sbc),
            Opcode::Cmp => alu(AluOp::Cmp),
            Opcode::And => alu(AluOp::And),
            Opcode::Or => alu(AluOp::Or),
            Opcode::Eor => alu(AluOp::Eor),
        };

        let Some(instruction) = instruction else {
            return DecodedOrFault::Fault(FaultCode::UnknownInstruction);
        };

        DecodedOrFault::Instruction(DecodedInstruction {
            word,
            opcode,
            instruction,
        })
    }
}
