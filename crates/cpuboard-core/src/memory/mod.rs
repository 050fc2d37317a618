//! Memory model primitives for the 512-word unified program/data space.

/// Word read/write helpers.
pub mod access;
/// Fixed program/data region map and address decoder.
pub mod map;

pub use access::{read_word, write_word};
pub use map::{
    decode_memory_region, region_address, MemoryRegion, RegionDescriptor, ADDRESS_MASK,
    DATA_END, DATA_START, FIXED_MEMORY_REGIONS, PROGRAM_END, PROGRAM_START, REGION_BIT,
};

/// Number of words in the unified program/data space.
pub const MEMORY_WORDS: usize = 512;

/// Allocates a canonical zeroed 512-word backing store.
#[must_use]
pub fn new_address_space() -> Box<[u8]> {
    vec![0; MEMORY_WORDS].into_boxed_slice()
}
