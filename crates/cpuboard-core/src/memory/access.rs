//! Word-sized accessors over the 512-word backing store.

use super::map::ADDRESS_MASK;

/// Reads the word at `addr`, masked into the 9-bit space.
///
/// Backing stores shorter than the full space read as zero past their end.
#[must_use]
pub fn read_word(memory: &[u8], addr: u16) -> u8 {
    memory
        .get(usize::from(addr & ADDRESS_MASK))
        .copied()
        .unwrap_or_default()
}

/// Writes the word at `addr`, masked into the 9-bit space.
///
/// Returns `false` when the backing store is too short to hold `addr`.
pub fn write_word(memory: &mut [u8], addr: u16, value: u8) -> bool {
    memory
        .get_mut(usize::from(addr & ADDRESS_MASK))
        .map(|slot| *slot = value)
        .is_some()
}
