//! Architectural CPU state model primitives.

/// Register file, program counter and flag storage.
pub mod registers;
mod run_state;

pub use registers::{
    ArchitecturalState, Register, DATA_REGISTER_COUNT, FLAGS_ACTIVE_MASK, FLAG_C, FLAG_N, FLAG_V,
    FLAG_Z,
};
pub use run_state::RunState;
