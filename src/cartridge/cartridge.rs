//! NES cartridge loading from iNES format (.nes files).
//!
//! Header: 16 bytes (magic `NES\x1A`, PRG size × 16 KiB, CHR size × 8 KiB, flags, mapper number).
//! Then an optional 512-byte trainer, then PRG ROM, then CHR ROM (or CHR RAM if the header
//! declares zero CHR banks).

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::cartridge::mapper::Mirroring;
use crate::cartridge::mapper::mapper::Mapper;
use crate::cartridge::mapper::mapper0::Mapper0;

const HEADER_LEN: usize = 16;
const MAGIC: [u8; 4] = [b'N', b'E', b'S', 0x1A];
const PRG_BANK_LEN: usize = 16 * 1024;
const CHR_BANK_LEN: usize = 8 * 1024;
const TRAINER_LEN: usize = 512;

/// Failure modes for loading an iNES file, per the emulator's error taxonomy.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("failed to read ROM file: {0}")]
    Io(#[from] std::io::Error),
    #[error("not an iNES file (bad magic bytes)")]
    BadMagic,
    #[error("ROM file is truncated: expected at least {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },
    #[error("mapper {0} is not supported (only Mapper 0 / NROM is implemented)")]
    UnsupportedMapper(u8),
}

/// Cartridge: owns PRG/CHR storage and the mapper that translates bus addresses into it.
pub struct Cartridge {
    pub mapper: Box<dyn Mapper>,
    pub vertical_mirroring: bool,
}

impl Cartridge {
    /// Load and validate an iNES ROM image.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RomError> {
        let data = fs::read(path)?;
        Self::load_from_bytes(&data)
    }

    /// Parse and validate an iNES image already held in memory.
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, RomError> {
        if data.len() < HEADER_LEN {
            return Err(RomError::Truncated {
                expected: HEADER_LEN,
                got: data.len(),
            });
        }
        if data[0..4] != MAGIC {
            return Err(RomError::BadMagic);
        }

        let prg_banks = (data[4] as usize) | (((data[9] & 0x0F) as usize) << 8);
        let chr_banks = (data[5] as usize) | (((data[9] & 0xF0) as usize) << 4);

        let vertical_mirroring = data[6] & 0x01 != 0;
        let has_trainer = data[6] & 0x04 != 0;
        let mapper_id = (data[6] >> 4) | (data[7] & 0xF0);

        let mut offset = HEADER_LEN;
        if has_trainer {
            offset += TRAINER_LEN;
        }

        let prg_size = prg_banks * PRG_BANK_LEN;
        let prg_end = offset + prg_size;
        if data.len() < prg_end {
            return Err(RomError::Truncated {
                expected: prg_end,
                got: data.len(),
            });
        }
        let prg_rom = data[offset..prg_end].to_vec();
        offset = prg_end;

        let chr_is_ram = chr_banks == 0;
        let chr_rom = if chr_is_ram {
            vec![0u8; CHR_BANK_LEN]
        } else {
            let chr_size = chr_banks * CHR_BANK_LEN;
            let chr_end = offset + chr_size;
            if data.len() < chr_end {
                return Err(RomError::Truncated {
                    expected: chr_end,
                    got: data.len(),
                });
            }
            data[offset..chr_end].to_vec()
        };

        let mapper: Box<dyn Mapper> = match mapper_id {
            0 => Box::new(Mapper0::new(prg_rom, chr_rom, chr_is_ram)),
            other => return Err(RomError::UnsupportedMapper(other)),
        };

        Ok(Self {
            mapper,
            vertical_mirroring,
        })
    }

    pub fn mirroring(&self) -> Mirroring {
        if self.vertical_mirroring {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }

    /// CPU-visible read: `$8000-$FFFF` via the mapper, open bus (`None`) otherwise.
    pub fn cpu_read(&self, addr: u16) -> Option<u8> {
        self.mapper.cpu_read(addr)
    }

    /// CPU-visible write. Mapper 0 rejects all of these.
    pub fn cpu_write(&mut self, addr: u16, data: u8) -> bool {
        self.mapper.cpu_write(addr, data)
    }

    /// PPU-visible read: CHR at `$0000-$1FFF`.
    pub fn ppu_read(&self, addr: u16) -> Option<u8> {
        self.mapper.ppu_read(addr)
    }

    /// PPU-visible write: only succeeds against CHR-RAM.
    pub fn ppu_write(&mut self, addr: u16, data: u8) -> bool {
        self.mapper.ppu_write(addr, data)
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
