//! FLAGS update behaviors for different instruction classes.

use crate::state::{ArchitecturalState, FLAG_C, FLAG_N, FLAG_V, FLAG_Z};

/// Describes how FLAGS should be updated after an instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagsUpdate {
    /// No change to FLAGS.
    #[default]
    None,
    /// Only `C` changes (`RCF`/`SCF`).
    Carry(bool),
    /// Update all four flags (arithmetic and logical ALU ops).
    UpdateNZCV {
        /// Zero flag.
        zero: bool,
        /// Negative flag.
        negative: bool,
        /// Carry flag.
        carry: bool,
        /// Overflow flag.
        overflow: bool,
    },
    /// Update `N`, `Z` and `C`; `V` is preserved (shift/rotate).
    UpdateNZC {
        /// Zero flag.
        zero: bool,
        /// Negative flag.
        negative: bool,
        /// Carry flag.
        carry: bool,
    },
}

impl FlagsUpdate {
    /// Applies the update to the flag byte of `arch`.
    pub const fn apply(self, arch: &mut ArchitecturalState) {
        match self {
            Self::None => {}
            Self::Carry(carry) => arch.set_flag(FLAG_C, carry),
            Self::UpdateNZCV {
                zero,
                negative,
                carry,
                overflow,
            } => {
                arch.set_flag(FLAG_Z, zero);
                arch.set_flag(FLAG_N, negative);
                arch.set_flag(FLAG_C, carry);
                arch.set_flag(FLAG_V, overflow);
            }
            Self::UpdateNZC {
                zero,
                negative,
                carry,
            } => {
                arch.set_flag(FLAG_Z, zero);
                arch.set_flag(FLAG_N, negative);
                arch.set_flag(FLAG_C, carry);
            }
        }
    }
}
