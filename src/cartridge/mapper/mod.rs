//! NES mappers for PRG/CHR memory mapping.
//!
//! - **Mapper 0** ([NROM](https://www.nesdev.org/wiki/NROM)): no bank switching. The only mapper
//!   this emulator implements; cartridges declaring any other mapper number fail to load.
//!
//! Nametable mirroring is a property of the cartridge, not the mapper (NROM boards wire it in
//! hardware via the header's mirroring bit), so it lives on `Cartridge` directly. See
//! [PPU nametables](https://www.nesdev.org/wiki/PPU_nametables#Nametable_mirroring).

/// Nametable mirroring: Vertical = left/right pairs share data; Horizontal = top/bottom pairs
/// share data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

pub mod mapper;
pub mod mapper0;
