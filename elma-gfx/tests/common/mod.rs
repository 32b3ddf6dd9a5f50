#![allow(dead_code)]

/// Width of the `char.spr` glyph shipped with the game's fonts.
pub const CHAR_WIDTH: u16 = 8;
pub const CHAR_HEIGHT: u16 = 9;

#[rustfmt::skip]
pub const CHAR_PIXELS: [u8; 72] = [
    0xFF, 0xFF, 0x19, 0xFF, 0x19, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0x19, 0xFF, 0x19, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0x19, 0xFF, 0x19, 0xFF, 0xFF,
    0xFF, 0x19, 0x19, 0x19, 0x19, 0x19, 0x19, 0xFF,
    0xFF, 0xFF, 0xFF, 0x19, 0xFF, 0x19, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0x19, 0xFF, 0x19, 0xFF, 0xFF,
    0xFF, 0xFF, 0x19, 0x19, 0x19, 0x19, 0x19, 0x19,
    0xFF, 0xFF, 0xFF, 0xFF, 0x19, 0xFF, 0x19, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0x19, 0xFF, 0x19, 0xFF,
];

/// Transparency runs of `char.spr`, one line per row.
#[rustfmt::skip]
pub const CHAR_RUNS: [u8; 80] = [
    b'N', 2, b'K', 1, b'N', 1, b'K', 1, b'N', 3,
    b'N', 2, b'K', 1, b'N', 1, b'K', 1, b'N', 3,
    b'N', 3, b'K', 1, b'N', 1, b'K', 1, b'N', 2,
    b'N', 1, b'K', 6, b'N', 1,
    b'N', 3, b'K', 1, b'N', 1, b'K', 1, b'N', 2,
    b'N', 3, b'K', 1, b'N', 1, b'K', 1, b'N', 2,
    b'N', 2, b'K', 6,
    b'N', 4, b'K', 1, b'N', 1, b'K', 1, b'N', 1,
    b'N', 4, b'K', 1, b'N', 1, b'K', 1, b'N', 1,
];

/// Only the 0x19 strokes of the glyph are visible.
pub fn char_transparency() -> Vec<bool> {
    CHAR_PIXELS.iter().map(|&p| p == 0x19).collect()
}

/// The complete `char.spr` file.
pub fn char_sprite_file() -> Vec<u8> {
    let mut data = vec![0x2D, 8, 0, 9, 0];
    data.extend_from_slice(&CHAR_PIXELS);
    data.extend_from_slice(b"SPRITE\0");
    data.extend_from_slice(&(CHAR_RUNS.len() as u16).to_le_bytes());
    data.extend_from_slice(&CHAR_RUNS);
    data
}

/// A deterministic picture with long runs, single high values and noise.
pub fn test_picture(width: usize, height: usize) -> Vec<u8> {
    let mut state = 0x2545_F491_u32;
    (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            match (x / 16 + y / 4) % 4 {
                0 => 0,
                1 => 0xC0 + (y % 64) as u8,
                2 => (x % 7) as u8,
                _ => {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    state as u8
                }
            }
        })
        .collect()
}
