//! Instruction-set simulator core for an educational 8-bit accumulator board.

/// Memory model primitives and fixed region map.
pub mod memory;
pub use memory::{
    decode_memory_region, new_address_space, read_word, region_address, write_word, MemoryRegion,
    RegionDescriptor, ADDRESS_MASK, DATA_END, DATA_START, FIXED_MEMORY_REGIONS, MEMORY_WORDS,
    PROGRAM_END, PROGRAM_START, REGION_BIT,
};

/// Host-facing board, configuration and step outcome types.
pub mod api;
pub use api::{BoardConfig, CpuBoard, IoBuffer, StepOutcome};

/// Architectural CPU state model primitives.
pub mod state;
pub use state::{
    ArchitecturalState, Register, RunState, DATA_REGISTER_COUNT, FLAGS_ACTIVE_MASK, FLAG_C,
    FLAG_N, FLAG_V, FLAG_Z,
};

/// Opcode table and instruction field extraction.
pub mod encoding;
pub use encoding::{
    classify_word, Opcode, OpcodePrefix, FULL_BYTE_OPCODE_TABLE, OPCODE_PREFIX_TABLE,
};

/// Instruction decode into tagged instruction variants.
pub mod decoder;
pub use decoder::{
    AddressingMode, AluOp, BranchCondition, DecodedInstruction, DecodedOrFault, Decoder,
    Instruction, ShiftMode,
};

/// Fault taxonomy.
pub mod fault;
pub use fault::{FaultClass, FaultCode};

/// Single-step execution pipeline.
pub mod execute;
pub use execute::{
    commit_execution, execute_instruction, step_one, ExecuteState, FlagsUpdate, ResolvedOperand,
};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
