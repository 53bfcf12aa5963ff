//! NES emulator entry point.
//!
//! Loads a cartridge, runs the CPU/PPU pair to produce frames, and presents them in a window.
//! Usage: `elaris <path/to/game.nes>`

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use nesture::{
    bus::Bus,
    bus::NesBus,
    cartridge::cartridge::{Cartridge, RomError},
    cpu::cpu::CPU,
};
use minifb::{Key, Window, WindowOptions};

/// NES frame rate ~60.0988 Hz (NTSC). Target one frame per 16.67 ms for ~60 fps display.
const FRAME_DURATION: Duration = Duration::from_nanos(16_666_667);

#[derive(Parser)]
#[command(name = "nesture", about = "A NES emulator (CPU/PPU core, Mapper 0 only)")]
struct Args {
    /// Path to an iNES (.nes) ROM file.
    rom: String,

    /// Window scale factor.
    #[arg(long, default_value_t = 3)]
    scale: u32,

    /// Print a per-instruction trace line (nestest-log style) to stdout.
    #[arg(long)]
    trace: bool,

    /// Disable the host window's frame pacing; run as fast as possible.
    #[arg(long = "no-vsync")]
    no_vsync: bool,
}

/// NES controller 1 bits: 0=A, 1=B, 2=Select, 3=Start, 4=Up, 5=Down, 6=Left, 7=Right.
/// Default binding: S/A/RShift/Enter/arrows.
fn controller_state_from_keys(window: &Window) -> u8 {
    let mut state = 0u8;
    if window.is_key_down(Key::S) {
        state |= 1 << 0; // A
    }
    if window.is_key_down(Key::A) {
        state |= 1 << 1; // B
    }
    if window.is_key_down(Key::RightShift) {
        state |= 1 << 2; // Select
    }
    if window.is_key_down(Key::Enter) {
        state |= 1 << 3; // Start
    }
    if window.is_key_down(Key::Up) {
        state |= 1 << 4;
    }
    if window.is_key_down(Key::Down) {
        state |= 1 << 5;
    }
    if window.is_key_down(Key::Left) {
        state |= 1 << 6;
    }
    if window.is_key_down(Key::Right) {
        state |= 1 << 7;
    }
    state
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let cart = match Cartridge::load(&args.rom) {
        Ok(cart) => cart,
        Err(err) => {
            eprintln!("failed to load {}: {}", args.rom, err);
            return match err {
                RomError::UnsupportedMapper(_) => ExitCode::from(2),
                _ => ExitCode::from(1),
            };
        }
    };
    log::info!("loaded {}", args.rom);

    let bus = NesBus::new(cart);
    let mut cpu = CPU {
        a: 0,
        x: 0,
        y: 0,
        sp: 0xFD,
        pc: 0,
        status: 0x24,
        cycles: 0,
        bus,
        trace_enabled: args.trace,
    };
    cpu.reset();

    let scale = args.scale.max(1);

    let mut window = match Window::new(
        "Nesture",
        256 * scale as usize,
        240 * scale as usize,
        WindowOptions {
            borderless: false,
            resize: true,
            scale: minifb::Scale::X1,
            scale_mode: minifb::ScaleMode::AspectRatioStretch,
            topmost: false,
            title: true,
            transparency: false,
            none: false,
        },
    ) {
        Ok(w) => w,
        Err(err) => {
            eprintln!("failed to open a window: {}", err);
            return ExitCode::from(1);
        }
    };

    if !args.no_vsync {
        window.set_target_fps(60);
    }

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let frame_start = Instant::now();

        cpu.bus.controller.state = controller_state_from_keys(&window);

        while !cpu.bus.frame_ready() {
            cpu.step();
        }

        window
            .update_with_buffer(&cpu.bus.ppu.framebuffer, 256, 240)
            .expect("failed to update window");
        cpu.bus.clear_frame_ready();

        if !args.no_vsync {
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_DURATION {
                std::thread::sleep(FRAME_DURATION - elapsed);
            }
        }
    }

    ExitCode::SUCCESS
}
