//! Full-opcode CPU accuracy check against the canonical `nestest.nes` ROM.
//!
//! `nestest.nes` is not redistributable, so this test is skipped (with a log message) unless a
//! copy has been placed at `tests/fixtures/nestest.nes`.

use nesture::bus::NesBus;
use nesture::cartridge::cartridge::Cartridge;
use nesture::cpu::cpu::CPU;

const NESTEST_PATH: &str = "tests/fixtures/nestest.nes";
const NESTEST_INSTRUCTIONS: usize = 8991;

#[test]
fn nestest_runs_all_official_opcodes_cleanly() {
    if !std::path::Path::new(NESTEST_PATH).exists() {
        eprintln!("skipping: {NESTEST_PATH} not present");
        return;
    }

    let cart = Cartridge::load(NESTEST_PATH).expect("failed to load nestest.nes");
    let bus = NesBus::new(cart);
    let mut cpu = CPU {
        a: 0,
        x: 0,
        y: 0,
        sp: 0xFD,
        pc: 0xC000,
        status: 0x24,
        cycles: 0,
        bus,
        trace_enabled: false,
    };

    for _ in 0..NESTEST_INSTRUCTIONS {
        cpu.step();
    }

    let err_02 = cpu.bus.read(0x02);
    let err_03 = cpu.bus.read(0x03);
    assert_eq!(err_02, 0x00, "nestest error code in $02: {err_02:#04x}");
    assert_eq!(err_03, 0x00, "nestest error code in $03: {err_03:#04x}");
}
