//! Host-facing board types: configuration, machine state and step outcomes.

use crate::memory::{new_address_space, read_word, write_word};
use crate::{ArchitecturalState, FaultCode, RunState};

/// Top-level configuration for a board instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BoardConfig {
    /// `PC` after construction and canonical reset.
    pub entry_pc: u8,
    /// Whether the I/O collaborator is wired in.
    ///
    /// Gates `ibuf` and both handshake branch conditions: `BNI` reads the
    /// input flag and `BNO` reads the output flag, and neither is taken
    /// while this is `false`. `OUT` latches `obuf` either way.
    pub input_attached: bool,
}

/// One direction of the I/O handshake: a full/empty flag and a data word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct IoBuffer {
    /// `true` while `buf` holds a word not yet taken by the other side.
    pub flag: bool,
    /// Data word.
    pub buf: u8,
}

/// Complete machine state of one board, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CpuBoard {
    /// Configuration used for construction and reset.
    pub config: BoardConfig,
    /// `ACC`, `IX`, `PC` and flags.
    pub arch: ArchitecturalState,
    /// 512-word unified program/data memory.
    pub memory: Box<[u8]>,
    /// Output buffer filled by `OUT`.
    pub obuf: IoBuffer,
    /// Input buffer drained by `IN`; `None` when input is not attached.
    pub ibuf: Option<IoBuffer>,
    /// Run state of the board.
    pub run_state: RunState,
    /// `PC` of the instruction that latched the current fault.
    pub latched_fault_pc: Option<u8>,
}

impl Default for CpuBoard {
    fn default() -> Self {
        Self::with_config(&BoardConfig::default())
    }
}

impl CpuBoard {
    /// Creates a board with zeroed memory and registers.
    #[must_use]
    pub fn with_config(config: &BoardConfig) -> Self {
        let mut arch = ArchitecturalState::default();
        arch.set_pc(config.entry_pc);

        Self {
            config: *config,
            arch,
            memory: new_address_space(),
            obuf: IoBuffer::default(),
            ibuf: config.input_attached.then(IoBuffer::default),
            run_state: RunState::Running,
            latched_fault_pc: None,
        }
    }

    /// Restores registers, flags, `PC`, run state and I/O buffers; memory is kept.
    pub fn reset_canonical(&mut self) {
        self.arch = ArchitecturalState::default();
        self.arch.set_pc(self.config.entry_pc);
        self.obuf = IoBuffer::default();
        self.ibuf = self.config.input_attached.then(IoBuffer::default);
        self.run_state = RunState::Running;
        self.latched_fault_pc = None;
    }

    /// Clears a halt so stepping continues after the `HLT`.
    ///
    /// Returns `false` and leaves the board alone when it is not halted.
    pub fn resume(&mut self) -> bool {
        if self.run_state == RunState::Halted {
            self.run_state = RunState::Running;
            true
        } else {
            false
        }
    }

    /// Executes one instruction.
    pub fn step(&mut self) -> StepOutcome {
        crate::step_one(self)
    }

    /// Copies `words` into memory starting at `start`, wrapping inside the
    /// 9-bit space.
    ///
    /// Returns `false` when a word landed outside the backing store and was
    /// dropped.
    pub fn load(&mut self, start: u16, words: &[u8]) -> bool {
        let mut addr = start;
        let mut complete = true;
        for word in words {
            complete &= write_word(&mut self.memory, addr, *word);
            addr = addr.wrapping_add(1);
        }
        complete
    }

    /// Reads one memory word.
    #[must_use]
    pub fn read_memory(&self, addr: u16) -> u8 {
        read_word(&self.memory, addr)
    }

    /// Writes one memory word; `false` when `addr` is not backed.
    pub fn write_memory(&mut self, addr: u16, value: u8) -> bool {
        write_word(&mut self.memory, addr, value)
    }
}

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// Instruction retired; the board can keep running.
    Continue,
    /// `HLT` executed (or the board was already halted).
    Halted,
    /// Fatal fault at the instruction fetched from `pc`.
    Fault {
        /// Fault code.
        cause: FaultCode,
        /// `PC` of the faulting instruction's first word.
        pc: u8,
    },
}

impl StepOutcome {
    /// Returns `true` when the step stopped on `HLT`.
    #[must_use]
    pub const fn is_halt(self) -> bool {
        matches!(self, Self::Halted)
    }

    /// Returns `true` when the step raised a fault.
    #[must_use]
    pub const fn is_fault(self) -> bool {
        matches!(self, Self::Fault { .. })
    }

    /// Fault code carried by a fault outcome.
    #[must_use]
    pub const fn fault(self) -> Option<FaultCode> {
        match self {
            Self::Fault { cause, .. } => Some(cause),
            Self::Continue | Self::Halted => None,
        }
    }
}
