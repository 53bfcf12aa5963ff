//! An NES (Nintendo Entertainment System) emulator core written in Rust.
//!
//! ## Modules
//!
//! - **bus** – Memory map, PPU/controller/cartridge access
//! - **cartridge** – iNES loading, Mapper 0 (NROM)
//! - **controller** – NES controller shift-register protocol
//! - **cpu** – 6502 instruction set and execution
//! - **ppu** – Loopy-register background renderer, palettes, framebuffer

pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod ppu;