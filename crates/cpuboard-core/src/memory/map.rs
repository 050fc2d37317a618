//! Fixed program/data region map and address-forming helpers.

/// Inclusive start address of the program region.
pub const PROGRAM_START: u16 = 0x000;
/// Inclusive end address of the program region.
pub const PROGRAM_END: u16 = 0x0FF;
/// Inclusive start address of the data region.
pub const DATA_START: u16 = 0x100;
/// Inclusive end address of the data region.
pub const DATA_END: u16 = 0x1FF;
/// Address bit that selects the data region.
pub const REGION_BIT: u16 = 0x100;
/// Mask of the 9-bit unified address space.
pub const ADDRESS_MASK: u16 = 0x1FF;

/// Canonical fixed-region descriptor for the board memory map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionDescriptor {
    /// Region classification.
    pub region: MemoryRegion,
    /// Inclusive start address.
    pub start: u16,
    /// Inclusive end address.
    pub end: u16,
}

/// Region classification for board addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum MemoryRegion {
    /// Program region (`0x000..=0x0FF`).
    Program,
    /// Data region (`0x100..=0x1FF`).
    Data,
}

impl MemoryRegion {
    /// Returns the inclusive bounds for this region.
    #[must_use]
    pub const fn bounds(self) -> (u16, u16) {
        match self {
            Self::Program => (PROGRAM_START, PROGRAM_END),
            Self::Data => (DATA_START, DATA_END),
        }
    }

    /// Returns `true` when `addr` belongs to this region.
    #[must_use]
    pub const fn contains(self, addr: u16) -> bool {
        let (start, end) = self.bounds();
        addr >= start && addr <= end
    }

    /// Returns the canonical descriptor for this region.
    #[must_use]
    pub const fn descriptor(self) -> RegionDescriptor {
        let (start, end) = self.bounds();
        RegionDescriptor {
            region: self,
            start,
            end,
        }
    }
}

/// Canonical fixed region layout in ascending address order.
pub const FIXED_MEMORY_REGIONS: [RegionDescriptor; 2] = [
    MemoryRegion::Program.descriptor(),
    MemoryRegion::Data.descriptor(),
];

const _: () = assert_fixed_region_layout();

const fn assert_fixed_region_layout() {
    assert!(
        FIXED_MEMORY_REGIONS[0].end + 1 == FIXED_MEMORY_REGIONS[1].start,
        "program and data regions must be contiguous"
    );
    assert!(
        FIXED_MEMORY_REGIONS[1].start == REGION_BIT,
        "data region must start at the region bit"
    );
    assert!(
        FIXED_MEMORY_REGIONS[1].end == ADDRESS_MASK,
        "regions must cover the full 9-bit space"
    );
}

/// Forms a full address from an 8-bit low byte by forcing the region bit.
#[must_use]
pub const fn region_address(region: MemoryRegion, low: u8) -> u16 {
    match region {
        MemoryRegion::Program => low as u16,
        MemoryRegion::Data => REGION_BIT | low as u16,
    }
}

/// Decodes an address into its region; bits above the 9-bit space are ignored.
#[must_use]
pub const fn decode_memory_region(addr: u16) -> MemoryRegion {
    if addr & REGION_BIT == 0 {
        MemoryRegion::Program
    } else {
        MemoryRegion::Data
    }
}

#[cfg(test)]
mod tests {
    use super::{
        decode_memory_region, region_address, MemoryRegion, DATA_END, DATA_START,
        FIXED_MEMORY_REGIONS, PROGRAM_END, PROGRAM_START,
    };

    #[test]
    fn region_decode_is_correct_at_boundaries() {
        assert_eq!(decode_memory_region(PROGRAM_START), MemoryRegion::Program);
        assert_eq!(decode_memory_region(PROGRAM_END), MemoryRegion::Program);
        assert_eq!(decode_memory_region(DATA_START), MemoryRegion::Data);
        assert_eq!(decode_memory_region(DATA_END), MemoryRegion::Data);
    }

    #[test]
    fn region_address_forces_bit_eight() {
        for low in 0_u8..=u8::MAX {
            let program = region_address(MemoryRegion::Program, low);
            let data = region_address(MemoryRegion::Data, low);
            assert_eq!(program, u16::from(low));
            assert_eq!(data, 0x100 | u16::from(low));
            assert!(MemoryRegion::Program.contains(program));
            assert!(MemoryRegion::Data.contains(data));
        }
    }

    #[test]
    fn contains_matches_decoder_for_all_addresses() {
        for addr in PROGRAM_START..=DATA_END {
            let region = decode_memory_region(addr);
            assert!(region.contains(addr));
            assert_eq!(
                MemoryRegion::Program.contains(addr),
                region == MemoryRegion::Program
            );
        }
    }

    #[test]
    fn descriptors_cover_both_halves() {
        assert_eq!(FIXED_MEMORY_REGIONS[0].region, MemoryRegion::Program);
        assert_eq!(FIXED_MEMORY_REGIONS[1].region, MemoryRegion::Data);
        assert_eq!(
            usize::from(FIXED_MEMORY_REGIONS[1].end - FIXED_MEMORY_REGIONS[0].start) + 1,
            crate::MEMORY_WORDS
        );
    }
}
