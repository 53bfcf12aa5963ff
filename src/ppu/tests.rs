use crate::cartridge::cartridge::Cartridge;
use crate::ppu::ppu::{NES_PALETTE_RGB, PPU};

fn test_cart() -> Cartridge {
    // Minimal iNES header: 1 PRG bank, 1 CHR bank, mapper 0, horizontal mirroring.
    let mut data = vec![0u8; 16 + 16 * 1024 + 8 * 1024];
    data[0..4].copy_from_slice(b"NES\x1A");
    data[4] = 1; // 1x 16KiB PRG
    data[5] = 1; // 1x 8KiB CHR
    Cartridge::load_from_bytes(&data).expect("test cartridge should parse")
}

fn test_cart_chr_ram() -> Cartridge {
    // Zero CHR banks in the header means CHR-RAM, writable through $2007 like the games that rely on it.
    let mut data = vec![0u8; 16 + 16 * 1024];
    data[0..4].copy_from_slice(b"NES\x1A");
    data[4] = 1; // 1x 16KiB PRG
    data[5] = 0; // CHR-RAM
    Cartridge::load_from_bytes(&data).expect("test cartridge should parse")
}

#[test]
fn status_read_clears_vblank_and_write_toggle() {
    let mut ppu = PPU::new();
    ppu.force_vblank_for_test();
    ppu.write_addr(0x3F); // first $2006 write sets the toggle

    let status = ppu.read_status();
    assert!(status & 0x80 != 0);
    assert_eq!(ppu.read_status() & 0x80, 0);

    // Toggle was reset, so the next $2006 write is treated as the "first" write again.
    ppu.write_addr(0x00);
    ppu.write_addr(0x00);
    assert_eq!(ppu.peek_v_for_test(), 0x0000);
}

#[test]
fn addr_write_round_trip_sets_v() {
    let mut ppu = PPU::new();
    ppu.write_addr(0x21); // high byte (masked to 6 bits)
    ppu.write_addr(0x08); // low byte, latches v = t
    assert_eq!(ppu.peek_v_for_test(), 0x2108);
}

#[test]
fn oam_write_then_read_round_trips() {
    let mut ppu = PPU::new();
    ppu.write_oam_addr(0x10);
    ppu.write_oam_data(0xAB);
    ppu.write_oam_addr(0x10);
    assert_eq!(ppu.read_oam_data(), 0xAB);
}

#[test]
fn oam_data_write_auto_increments_address() {
    let mut ppu = PPU::new();
    ppu.write_oam_addr(0xFF);
    ppu.write_oam_data(0x01); // writes oam[0xFF], address wraps to 0x00
    ppu.write_oam_data(0x02); // writes oam[0x00]

    ppu.write_oam_addr(0xFF);
    assert_eq!(ppu.read_oam_data(), 0x01);
    ppu.write_oam_addr(0x00);
    assert_eq!(ppu.read_oam_data(), 0x02);
}

#[test]
fn palette_mirrors_backdrop_entries() {
    let mut ppu = PPU::new();
    let mut cart = test_cart();

    ppu.write_addr(0x3F);
    ppu.write_addr(0x10);
    ppu.write_data(&mut cart, 0x16);

    ppu.write_addr(0x3F);
    ppu.write_addr(0x00);
    assert_eq!(ppu.bus_read_for_test(&cart, 0x3F00), 0x16);
}

#[test]
fn ctrl_nmi_enable_rising_edge_during_vblank_latches_nmi() {
    let mut ppu = PPU::new();
    ppu.force_vblank_for_test();

    ppu.write_ctrl(0x00);
    assert!(!ppu.take_nmi());

    ppu.write_ctrl(0x80); // enable NMI while vblank is already set: rising edge fires immediately
    assert!(ppu.take_nmi());
}

#[test]
fn vram_addr_increments_by_32_in_vertical_mode() {
    let mut ppu = PPU::new();
    let mut cart = test_cart();

    ppu.write_ctrl(0x04); // VRAM increment = 32
    ppu.write_addr(0x20);
    ppu.write_addr(0x00);
    ppu.write_data(&mut cart, 0xAA);
    assert_eq!(ppu.peek_v_for_test(), 0x2020);
}

#[test]
fn full_frame_sets_frame_ready() {
    let mut ppu = PPU::new();
    let mut cart = test_cart();

    // 262 scanlines * 341 dots = one full frame.
    for _ in 0..(262 * 341) {
        ppu.step(&mut cart);
    }
    assert!(ppu.frame_ready);
}

#[test]
fn background_pipeline_renders_handcrafted_tile_then_backdrop() {
    let mut ppu = PPU::new();
    let mut cart = test_cart_chr_ram();

    ppu.write_mask(0x08); // show background
    ppu.write_ctrl(0x00); // bg pattern table 0, nametable (0,0), no NMI

    // Tile 0: low-plane fully set, high-plane clear, so every one of its pixels is palette index 1.
    ppu.write_addr(0x00);
    ppu.write_addr(0x00);
    for _ in 0..8 {
        ppu.write_data(&mut cart, 0xFF);
    }

    // Nametable column 1 names tile 1, whose CHR bytes are still zero (pixel index 0, the backdrop).
    ppu.write_addr(0x20);
    ppu.write_addr(0x01);
    ppu.write_data(&mut cart, 0x01);

    // Background palette 0, color 1.
    ppu.write_addr(0x3F);
    ppu.write_addr(0x01);
    ppu.write_data(&mut cart, 0x16);

    // Re-point v/t at the top-left of the nametable before the pre-render scanline primes the
    // shift registers for scanline 0.
    ppu.write_addr(0x00);
    ppu.write_addr(0x00);

    // One full pre-render scanline, then pixels 0-15 of scanline 0.
    for _ in 0..(341 + 16) {
        ppu.step(&mut cart);
    }

    let backdrop = NES_PALETTE_RGB[0];
    let tile_color = NES_PALETTE_RGB[0x16];
    for x in 0..8 {
        assert_eq!(ppu.framebuffer[x], tile_color, "pixel {x} should be tile color");
    }
    for x in 8..16 {
        assert_eq!(ppu.framebuffer[x], backdrop, "pixel {x} should be backdrop");
    }
}

#[test]
fn vblank_flag_and_nmi_latch_at_scanline_241_pixel_1() {
    let mut ppu = PPU::new();
    let mut cart = test_cart();
    ppu.write_ctrl(0x80); // enable NMI generation on vblank

    let mut ticks = 0usize;
    loop {
        ppu.step(&mut cart);
        ticks += 1;
        if ppu.status_for_test() & 0x80 != 0 {
            break;
        }
        assert!(ticks < 100_000, "vblank flag never latched");
    }

    assert_ne!(ppu.read_status() & 0x80, 0, "vblank flag should be set");
    assert!(ppu.take_nmi(), "NMI should have latched once");
    assert!(!ppu.take_nmi(), "NMI should not latch twice");
}
