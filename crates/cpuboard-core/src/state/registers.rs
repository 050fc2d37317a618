/// Number of user-visible data registers (`ACC`, `IX`).
pub const DATA_REGISTER_COUNT: usize = 2;
/// Flag bit for carry/borrow.
pub const FLAG_C: u8 = 1 << 3;
/// Flag bit for signed overflow.
pub const FLAG_V: u8 = 1 << 2;
/// Flag bit for negative result.
pub const FLAG_N: u8 = 1 << 1;
/// Flag bit for zero result.
pub const FLAG_Z: u8 = 1 << 0;
/// Mask of architecturally active flag bits (`C/V/N/Z`).
pub const FLAGS_ACTIVE_MASK: u8 = FLAG_C | FLAG_V | FLAG_N | FLAG_Z;

/// User-visible data register selected by the A-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Register {
    /// Accumulator.
    Acc = 0,
    /// Index register.
    Ix = 1,
}

impl Register {
    /// Ordered list of both data registers.
    pub const ALL: [Self; DATA_REGISTER_COUNT] = [Self::Acc, Self::Ix];

    /// Returns the array index for this register.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes the 1-bit A-field (`0` selects `ACC`, `1` selects `IX`).
    #[must_use]
    pub const fn from_a_field(bit: u8) -> Self {
        if bit & 1 == 0 {
            Self::Acc
        } else {
            Self::Ix
        }
    }

    /// Short register mnemonic.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Acc => "ACC",
            Self::Ix => "IX",
        }
    }
}

/// Register file, program counter and status flags of the board CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ArchitecturalState {
    regs: [u8; DATA_REGISTER_COUNT],
    pc: u8,
    flags: u8,
}

impl ArchitecturalState {
    /// Reads a data register.
    #[must_use]
    pub const fn reg(&self, reg: Register) -> u8 {
        self.regs[reg.index()]
    }

    /// Writes a data register.
    pub const fn set_reg(&mut self, reg: Register, value: u8) {
        self.regs[reg.index()] = value;
    }

    /// Reads `ACC`.
    #[must_use]
    pub const fn acc(&self) -> u8 {
        self.reg(Register::Acc)
    }

    /// Writes `ACC`.
    pub const fn set_acc(&mut self, value: u8) {
        self.set_reg(Register::Acc, value);
    }

    /// Reads `IX`.
    #[must_use]
    pub const fn ix(&self) -> u8 {
        self.reg(Register::Ix)
    }

    /// Writes `IX`.
    pub const fn set_ix(&mut self, value: u8) {
        self.set_reg(Register::Ix, value);
    }

    /// Reads `PC`. The counter only ever addresses the program region.
    #[must_use]
    pub const fn pc(&self) -> u8 {
        self.pc
    }

    /// Writes `PC`.
    pub const fn set_pc(&mut self, value: u8) {
        self.pc = value;
    }

    /// Returns `PC` and advances it by one word, wrapping inside the program region.
    pub const fn advance_pc(&mut self) -> u8 {
        let current = self.pc;
        self.pc = current.wrapping_add(1);
        current
    }

    /// Reads the packed flag byte.
    #[must_use]
    pub const fn flags(&self) -> u8 {
        self.flags
    }

    /// Writes the packed flag byte; inactive bits are dropped.
    pub const fn set_flags(&mut self, value: u8) {
        self.flags = value & FLAGS_ACTIVE_MASK;
    }

    /// Returns `true` when a specific flag bit is set.
    #[must_use]
    pub const fn flag_is_set(&self, flag: u8) -> bool {
        (self.flags & flag) != 0
    }

    /// Sets or clears a specific active flag bit.
    pub const fn set_flag(&mut self, flag: u8, enabled: bool) {
        if enabled {
            self.flags |= flag & FLAGS_ACTIVE_MASK;
        } else {
            self.flags &= !(flag & FLAGS_ACTIVE_MASK);
        }
    }

    /// Carry/borrow flag.
    #[must_use]
    pub const fn carry(&self) -> bool {
        self.flag_is_set(FLAG_C)
    }

    /// Overflow flag.
    #[must_use]
    pub const fn overflow(&self) -> bool {
        self.flag_is_set(FLAG_V)
    }

    /// Negative flag.
    #[must_use]
    pub const fn negative(&self) -> bool {
        self.flag_is_set(FLAG_N)
    }

    /// Zero flag.
    #[must_use]
    pub const fn zero(&self) -> bool {
        self.flag_is_set(FLAG_Z)
    }
}
