/// Opcode prefixes (bits 7..4 of the first instruction word).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum OpcodePrefix {
    Control = 0x0,
    Io = 0x1,
    CarryFlag = 0x2,
    Branch = 0x3,
    ShiftRotate = 0x4,
    Load = 0x6,
    Store = 0x7,
    Sbc = 0x8,
    Adc = 0x9,
    Sub = 0xA,
    Add = 0xB,
    Eor = 0xC,
    Or = 0xD,
    And = 0xE,
    Cmp = 0xF,
}

impl OpcodePrefix {
    /// Converts a 4-bit prefix into an assigned prefix; `0x5` is unassigned.
    #[must_use]
    pub const fn from_u4(prefix: u8) -> Option<Self> {
        match prefix {
            0x0 => Some(Self::Control),
            0x1 => Some(Self::Io),
            0x2 => Some(Self::CarryFlag),
            0x3 => Some(Self::Branch),
            0x4 => Some(Self::ShiftRotate),
            0x6 => Some(Self::Load),
            0x7 => Some(Self::Store),
            0x8 => Some(Self::Sbc),
            0x9 => Some(Self::Adc),
            0xA => Some(Self::Sub),
            0xB => Some(Self::Add),
            0xC => Some(Self::Eor),
            0xD => Some(Self::Or),
            0xE => Some(Self::And),
            0xF => Some(Self::Cmp),
            _ => None,
        }
    }

    /// Returns `true` when this prefix aliases several instructions that are
    /// told apart by the full byte value.
    #[must_use]
    pub const fn is_aliased(self) -> bool {
        matches!(self, Self::Control | Self::Io | Self::CarryFlag)
    }
}

/// Instruction categories recognized by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Opcode {
    Nop,
    Hlt,
    Out,
    In,
    Rcf,
    Scf,
    Ld,
    St,
    Add,
    Adc,
    Sub,
    Sbc,
    Cmp,
    And,
    Or,
    Eor,
    Shift,
    Rotate,
    Branch,
    Jal,
    Jr,
}

impl Opcode {
    /// Assembly mnemonic for this category.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::Hlt => "HLT",
            Self::Out => "OUT",
            Self::In => "IN",
            Self::Rcf => "RCF",
            Self::Scf => "SCF",
            Self::Ld => "LD",
            Self::St => "ST",
            Self::Add => "ADD",
            Self::Adc => "ADC",
            Self::Sub => "SUB",
            Self::Sbc => "SBC",
            Self::Cmp => "CMP",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Eor => "EOR",
            Self::Shift => "Ssm",
            Self::Rotate => "Rsm",
            Self::Branch => "Bbc",
            Self::Jal => "JAL",
            Self::Jr => "JR",
        }
    }

    /// Returns `true` for categories whose B-field selects an addressing mode.
    #[must_use]
    pub const fn uses_b_field_addressing(self) -> bool {
        matches!(
            self,
            Self::Ld
                | Self::St
                | Self::Add
                | Self::Adc
                | Self::Sub
                | Self::Sbc
                | Self::Cmp
                | Self::And
                | Self::Or
                | Self::Eor
        )
    }
}

/// Full-byte encodings inside the aliased `0x0_`/`0x1_`/`0x2_` prefixes.
///
/// Any other byte under those prefixes is unknown by definition.
pub const FULL_BYTE_OPCODE_TABLE: &[(u8, Opcode)] = &[
    (0x00, Opcode::Nop),
    (0x0A, Opcode::Jal),
    (0x0B, Opcode::Jr),
    (0x0F, Opcode::Hlt),
    (0x10, Opcode::Out),
    (0x1F, Opcode::In),
    (0x20, Opcode::Rcf),
    (0x2F, Opcode::Scf),
];

/// Prefix encodings where every byte under the prefix belongs to one category.
///
/// Shift and rotate share prefix `0x4` and are split by bit 3.
pub const OPCODE_PREFIX_TABLE: &[(u8, Opcode)] = &[
    (0x3, Opcode::Branch),
    (0x6, Opcode::Ld),
    (0x7, Opcode::St),
    (0x8, Opcode::Sbc),
    (0x9, Opcode::Adc),
    (0xA, Opcode::Sub),
    (0xB, Opcode::Add),
    (0xC, Opcode::Eor),
    (0xD, Opcode::Or),
    (0xE, Opcode::And),
    (0xF, Opcode::Cmp),
];

/// Extracts the opcode prefix (bits 7..4).
#[must_use]
pub const fn opcode_prefix(word: u8) -> u8 {
    word >> 4
}

/// Extracts the A-field (bit 3).
#[must_use]
pub const fn a_field(word: u8) -> u8 {
    (word >> 3) & 0x01
}

/// Extracts the B-field (bits 2..0).
#[must_use]
pub const fn b_field(word: u8) -> u8 {
    word & 0x07
}

/// Extracts the shift/rotate sub-mode (bits 1..0).
#[must_use]
pub const fn shift_mode_bits(word: u8) -> u8 {
    word & 0x03
}

/// Extracts the branch condition code (bits 3..0).
#[must_use]
pub const fn branch_condition_bits(word: u8) -> u8 {
    word & 0x0F
}

/// Classifies the first instruction word into a category.
///
/// Aliased prefixes are looked up by full byte in [`FULL_BYTE_OPCODE_TABLE`],
/// shift/rotate is split on bit 3, and every other prefix is looked up in
/// [`OPCODE_PREFIX_TABLE`]. `None` means the byte does not encode any
/// defined instruction.
#[must_use]
pub const fn classify_word(word: u8) -> Option<Opcode> {
    let Some(prefix) = OpcodePrefix::from_u4(opcode_prefix(word)) else {
        return None;
    };

    if prefix.is_aliased() {
        return lookup(FULL_BYTE_OPCODE_TABLE, word);
    }

    if matches!(prefix, OpcodePrefix::ShiftRotate) {
        return if a_field(word) == 0 {
            Some(Opcode::Shift)
        } else {
            Some(Opcode::Rotate)
        };
    }

    lookup(OPCODE_PREFIX_TABLE, prefix as u8)
}

const fn lookup(table: &[(u8, Opcode)], key: u8) -> Option<Opcode> {
    let mut i = 0;
    while i < table.len() {
        let (entry, opcode) = table[i];
        if entry == key {
            return Some(opcode);
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{
        a_field, b_field, branch_condition_bits, classify_word, opcode_prefix, shift_mode_bits,
        Opcode, OpcodePrefix, FULL_BYTE_OPCODE_TABLE, OPCODE_PREFIX_TABLE,
    };

    #[test]
    fn tables_contain_unique_keys() {
        let bytes: HashSet<_> = FULL_BYTE_OPCODE_TABLE.iter().map(|(b, _)| *b).collect();
        assert_eq!(bytes.len(), FULL_BYTE_OPCODE_TABLE.len());

        let prefixes: HashSet<_> = OPCODE_PREFIX_TABLE.iter().map(|(p, _)| *p).collect();
        assert_eq!(prefixes.len(), OPCODE_PREFIX_TABLE.len());
    }

    #[test]
    fn every_full_byte_entry_resolves_via_classifier() {
        for (word, opcode) in FULL_BYTE_OPCODE_TABLE {
            assert_eq!(classify_word(*word), Some(*opcode));
        }
    }

    #[test]
    fn every_prefix_entry_covers_all_sixteen_bytes() {
        for (prefix, opcode) in OPCODE_PREFIX_TABLE {
            for low in 0x0_u8..=0xF {
                assert_eq!(classify_word((prefix << 4) | low), Some(*opcode));
            }
        }
    }

    #[test]
    fn aliased_prefixes_only_accept_their_full_byte_entries() {
        for word in 0x00_u8..=0x2F {
            let listed = FULL_BYTE_OPCODE_TABLE
                .iter()
                .find_map(|(byte, opcode)| (*byte == word).then_some(*opcode));
            assert_eq!(classify_word(word), listed, "word {word:#04X}");
        }
    }

    #[test]
    fn unassigned_prefix_is_unknown() {
        assert_eq!(OpcodePrefix::from_u4(0x5), None);
        for low in 0x0_u8..=0xF {
            assert_eq!(classify_word(0x50 | low), None);
        }
    }

    #[test]
    fn shift_and_rotate_split_on_bit_three() {
        assert_eq!(classify_word(0x40), Some(Opcode::Shift));
        assert_eq!(classify_word(0x47), Some(Opcode::Shift));
        assert_eq!(classify_word(0x48), Some(Opcode::Rotate));
        assert_eq!(classify_word(0x4B), Some(Opcode::Rotate));
    }

    #[test]
    fn field_extraction_matches_layout() {
        let word = 0b1011_1101_u8;
        assert_eq!(opcode_prefix(word), 0xB);
        assert_eq!(a_field(word), 1);
        assert_eq!(b_field(word), 0b101);
        assert_eq!(shift_mode_bits(word), 0b01);
        assert_eq!(branch_condition_bits(word), 0b1101);
    }

    #[test]
    fn aliased_prefix_helper_matches_full_byte_table() {
        for (word, _) in FULL_BYTE_OPCODE_TABLE {
            let prefix = OpcodePrefix::from_u4(opcode_prefix(*word)).expect("assigned prefix");
            assert!(prefix.is_aliased());
        }
        assert!(!OpcodePrefix::Add.is_aliased());
    }

    #[test]
    fn b_field_addressing_categories() {
        assert!(Opcode::St.uses_b_field_addressing());
        assert!(Opcode::Cmp.uses_b_field_addressing());
        assert!(!Opcode::Branch.uses_b_field_addressing());
        assert!(!Opcode::Jal.uses_b_field_addressing());
        assert!(!Opcode::Shift.uses_b_field_addressing());
    }
}
