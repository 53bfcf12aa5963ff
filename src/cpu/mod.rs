//! 6502 CPU emulation for the NES (Ricoh 2A03).
//!
//! Implements the [CPU](https://www.nesdev.org/wiki/CPU) / [Instruction reference](https://www.nesdev.org/wiki/Instruction_reference):
//! the official 6502 opcode set. Unofficial/undocumented opcodes are not emulated; they execute as a
//! 2-cycle no-op. nestest-compatible trace output. Bus trait abstracts the
//! [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map). NMI from PPU vblank; reset vector from
//! $FFFC–$FFFD. OAM-DMA is serviced as a whole unit of work by `step()`, stalling the CPU for 513/514 cycles.

pub mod cpu;
pub mod flags;
