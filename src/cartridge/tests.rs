use super::{Cartridge, RomError};

fn ines_header(prg_banks: u8, chr_banks: u8, mapper_id: u8, vertical: bool) -> Vec<u8> {
    let mut header = vec![0u8; 16];
    header[0..4].copy_from_slice(b"NES\x1A");
    header[4] = prg_banks;
    header[5] = chr_banks;
    header[6] = (mapper_id << 4) | if vertical { 0x01 } else { 0x00 };
    header[7] = mapper_id & 0xF0;
    header
}

#[test]
fn rejects_bad_magic() {
    let data = vec![0u8; 32];
    assert!(matches!(
        Cartridge::load_from_bytes(&data),
        Err(RomError::BadMagic)
    ));
}

#[test]
fn rejects_truncated_prg() {
    let mut data = ines_header(1, 1, 0, false);
    data.extend(vec![0u8; 100]); // far short of one 16KiB PRG bank
    assert!(matches!(
        Cartridge::load_from_bytes(&data),
        Err(RomError::Truncated { .. })
    ));
}

#[test]
fn rejects_unsupported_mapper() {
    let mut data = ines_header(1, 1, 4, false); // MMC3
    data.extend(vec![0u8; 16 * 1024 + 8 * 1024]);
    assert!(matches!(
        Cartridge::load_from_bytes(&data),
        Err(RomError::UnsupportedMapper(4))
    ));
}

#[test]
fn loads_nrom_with_mirroring_and_reads_prg() {
    let mut data = ines_header(1, 1, 0, true);
    let mut body = vec![0u8; 16 * 1024 + 8 * 1024];
    body[0] = 0xEA; // first PRG byte
    data.extend(body);

    let cart = Cartridge::load_from_bytes(&data).expect("should load");
    assert_eq!(cart.mirroring(), super::super::mapper::Mirroring::Vertical);
    assert_eq!(cart.cpu_read(0x8000), Some(0xEA));
    // 16KiB PRG is mirrored across $8000-$BFFF and $C000-$FFFF.
    assert_eq!(cart.cpu_read(0xC000), Some(0xEA));
}

#[test]
fn zero_chr_banks_allocates_chr_ram() {
    let mut data = ines_header(1, 0, 0, false);
    data.extend(vec![0u8; 16 * 1024]);

    let mut cart = Cartridge::load_from_bytes(&data).expect("should load");
    assert!(cart.ppu_write(0x0000, 0x42));
    assert_eq!(cart.ppu_read(0x0000), Some(0x42));
}

#[test]
fn mapper0_rejects_prg_writes() {
    let mut data = ines_header(1, 1, 0, false);
    data.extend(vec![0u8; 16 * 1024 + 8 * 1024]);

    let mut cart = Cartridge::load_from_bytes(&data).expect("should load");
    assert!(!cart.cpu_write(0x8000, 0xFF));
}
