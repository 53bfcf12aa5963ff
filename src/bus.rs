//! Memory bus and address decoding for the NES.
//!
//! Implements the [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map):
//!
//! | Range       | Size   | Device |
//! |-------------|--------|--------|
//! | $0000–$07FF | 2 KiB  | Internal RAM |
//! | $0800–$1FFF | mirror | Mirrors of $0000–$07FF (incomplete decode) |
//! | $2000–$2007 | 8 B    | [PPU registers](https://www.nesdev.org/wiki/PPU_registers) (mirrored every 8 bytes to $3FFF) |
//! | $4014       |        | OAM DMA trigger |
//! | $4016       |        | Controller 1 |
//! | $4018–$7FFF |        | Unmapped / cartridge (e.g. PRG RAM at $6000–$7FFF) |
//! | $8000–$FFFF |        | Cartridge PRG ROM and mapper registers |
//!
//! PPU runs at 3× CPU clock; each `tick(cycles)` advances PPU by `cycles*3`.

use crate::{cartridge::cartridge::Cartridge, controller::Controller, ppu::ppu::PPU};

/// Trait for memory-mapped I/O and bus access used by the CPU.
/// See NESdev "CPU memory map" for read/write behavior and open bus.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
    fn tick(&mut self, cycles: usize);
    fn poll_nmi(&mut self) -> bool;
    /// Consumes and returns a pending OAM-DMA source page (written to $4014), if any.
    fn take_oam_dma(&mut self) -> Option<u8>;
}

/// Main NES bus: 2 KiB internal RAM, PPU, cartridge, controller.
/// Decoding matches the NES 2A03 address map; unmapped reads return open bus ($40 typical).
pub struct NesBus {
    /// Internal RAM; $0000–$07FF is the only physical RAM; $0800–$1FFF mirror it (addr & $07FF).
    pub ram: [u8; 2048],
    pub cart: Cartridge,
    pub ppu: PPU,
    /// Controller port 1 ($4016). Port 2 ($4017) not implemented. See Controller_reading.
    pub controller: Controller,
    oam_dma_pending: Option<u8>,
}

impl NesBus {
    /// Create a new bus with the given cartridge.
    pub fn new(cart: Cartridge) -> Self {
        Self {
            ram: [0; 2048],
            cart,
            ppu: PPU::new(),
            controller: Controller { state: 0, shift: 0 },
            oam_dma_pending: None,
        }
    }

    /// True once the PPU has completed a frame; cleared by `clear_frame_ready`.
    pub fn frame_ready(&self) -> bool {
        self.ppu.frame_ready
    }

    /// Clear frame_ready after presenting (so the next frame can set it at vblank).
    pub fn clear_frame_ready(&mut self) {
        self.ppu.frame_ready = false;
    }
}

impl Bus for NesBus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            // $0000–$1FFF: Internal RAM; addresses incompletely decoded → 4 mirrors (addr & $07FF).
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            // $2000–$3FFF: PPU registers; incompletely decoded → repeat every 8 bytes. $2002=PPUSTATUS,
            // $2004=OAMDATA, $2007=PPUDATA are readable; others return open bus (e.g. $40).
            0x2000..=0x3FFF => {
                let r = addr & 0x2007;
                match r {
                    0x2002 => self.ppu.read_status(),
                    0x2004 => self.ppu.read_oam_data(),
                    0x2007 => self.ppu.read_data(&mut self.cart),
                    _ => 0x40, // Write-only or unused; open bus (Open_bus_behavior).
                }
            }
            0x4000..=0x4015 | 0x4018..=0x401F => 0x40,
            0x4016 => self.controller.read(),
            0x4017 => 0x40, // Controller port 2: unimplemented.
            // $4020–$7FFF: Unmapped; available for cartridge (e.g. PRG RAM $6000–$7FFF). Open bus.
            0x4020..=0x7FFF => 0x40,
            // $8000–$FFFF: Cartridge PRG ROM (and fixed last bank for vectors $FFFA–$FFFF).
            0x8000..=0xFFFF => self.cart.cpu_read(addr).unwrap_or(0x40),
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = data,
            // PPU: $2000=PPUCTRL, $2001=PPUMASK, $2003=OAMADDR, $2004=OAMDATA, $2005=PPUSCROLL,
            // $2006=PPUADDR, $2007=PPUDATA. Writes to $2002 (PPUSTATUS) fill internal latch only.
            0x2000..=0x3FFF => {
                let r = addr & 0x2007;
                match r {
                    0x2000 => self.ppu.write_ctrl(data),
                    0x2001 => self.ppu.write_mask(data),
                    0x2003 => self.ppu.write_oam_addr(data),
                    0x2004 => self.ppu.write_oam_data(data),
                    0x2005 => self.ppu.write_scroll(data),
                    0x2006 => self.ppu.write_addr(data),
                    0x2007 => self.ppu.write_data(&mut self.cart, data),
                    _ => {}
                }
            }
            // $4014 only enqueues the DMA; the CPU services the stall-and-transfer protocol
            // itself so the PPU keeps ticking at the correct rate while it runs.
            0x4014 => self.oam_dma_pending = Some(data),
            0x4016 => self.controller.write(data), // Latch (bit 0): 1=strobe, then read $4016 for bits.
            0x4000..=0x4013 | 0x4015 | 0x4017..=0x401F => {}
            0x4020..=0x7FFF => {}
            // Cartridge: mapper registers. Mapper 0 rejects all of these.
            0x8000..=0xFFFF => {
                self.cart.cpu_write(addr, data);
            }
        }
    }

    /// Advance the PPU by `cycles * 3` ticks. See Cycle_reference_chart.
    fn tick(&mut self, cycles: usize) {
        for _ in 0..(cycles * 3) {
            self.ppu.step(&mut self.cart);
        }
    }

    /// Consumes a pending NMI edge latched by the PPU at vblank start (or a rising edge on
    /// PPUCTRL's NMI-enable bit while vblank is already set).
    fn poll_nmi(&mut self) -> bool {
        self.ppu.take_nmi()
    }

    fn take_oam_dma(&mut self) -> Option<u8> {
        self.oam_dma_pending.take()
    }
}
