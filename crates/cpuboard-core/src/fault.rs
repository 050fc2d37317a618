use thiserror::Error;

/// Pipeline phase a fault is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// Decoder rejected the opcode byte or its B-field.
    Decode,
    /// ALU rejected a decoded shift/rotate sub-mode.
    Execute,
    /// Operand resolution had no rule for the addressing mode.
    Operand,
}

/// Fatal fault taxonomy for a single step.
///
/// Every fault stops the run; none of them is recoverable by retrying the
/// same instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum FaultCode {
    /// Opcode byte or B-field does not map to a defined instruction.
    #[error("unknown instruction encoding")]
    UnknownInstruction = 0x01,
    /// Shift/rotate sub-mode is not one of the implemented variants.
    #[error("unsupported shift/rotate mode")]
    UnsupportedShiftMode = 0x02,
    /// Addressing mode has no effective-address rule for this instruction.
    #[error("operand fetch failed for addressing mode")]
    OperandFetch = 0x03,
}

impl FaultCode {
    /// Converts a fault code to its stable byte value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a stable byte value back into a fault code.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::UnknownInstruction),
            0x02 => Some(Self::UnsupportedShiftMode),
            0x03 => Some(Self::OperandFetch),
            _ => None,
        }
    }

    /// Returns the pipeline phase this fault belongs to.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::UnknownInstruction => FaultClass::Decode,
            Self::UnsupportedShiftMode => FaultClass::Execute,
            Self::OperandFetch => FaultClass::Operand,
        }
    }
}
