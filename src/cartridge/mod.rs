//! NES cartridge loading and mapper support.
//!
//! - **cartridge**: loads iNES (.nes) files, holds PRG/CHR and the mapper.
//! - **mapper**: NROM (Mapper 0) PRG/CHR address translation.

pub mod cartridge;
pub mod mapper;