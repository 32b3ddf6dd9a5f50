//! PCX scanline run-length coding.
//!
//! ```plain
//! .- literal ---------------.    .- run ---------------------------------------.
//! |  7  6  5  4  3  2  1  0 |    |  7  6  5  4  3  2  1  0 |       Byte[1]     |
//! |-------------------------|    |-------+-----------------+-------------------|
//! |  value (not 11xxxxxx)   |    |  1  1 |      count      |       value       |
//! `-------------------------`    `---------------------------------------------`
//! ```
//!
//! Every scanline is coded independently: a run never continues from one row into the next.

use crate::error::{Result, ScanlineOverrunSnafu, TruncatedSnafu};
use alloc::{vec, vec::Vec};
use itertools::Itertools;
use snafu::{ensure, OptionExt};

/// Tag bits of a run byte.
pub const RUN_TAG: u8 = 0b1100_0000;
/// Longest run a single run byte can describe.
pub const MAX_RUN: usize = 0b0011_1111;

/// Decodes `height` scanlines of `bytes_per_row` bytes each, keeping the first `width` bytes of
/// every row.
pub fn decode(data: &[u8], width: usize, height: usize, bytes_per_row: u16) -> Result<Vec<u8>> {
    let row_len = usize::from(bytes_per_row);
    // one byte covers at most MAX_RUN columns
    let min_len = height * ((row_len + MAX_RUN - 1) / MAX_RUN);
    ensure!(
        data.len() >= min_len,
        TruncatedSnafu {
            needed: min_len,
            available: data.len(),
        }
    );
    let mut pixels = vec![0; width * height];

    let mut offset = 0;
    let mut next = || {
        let byte: Result<u8> = data.get(offset).copied().context(TruncatedSnafu {
            needed: offset + 1,
            available: data.len(),
        });
        offset += 1;
        byte
    };

    for row in 0..height {
        let row_pixels = &mut pixels[row * width..(row + 1) * width];
        let mut column = 0;

        while column < row_len {
            let byte = next()?;
            let (count, value) = if byte & RUN_TAG == RUN_TAG {
                (usize::from(byte & !RUN_TAG), next()?)
            } else {
                (1, byte)
            };

            let end = column + count;
            // bytes past `width` are row padding
            if column < width {
                row_pixels[column..end.min(width)].fill(value);
            }
            column = end;
        }

        ensure!(
            column == row_len,
            ScanlineOverrunSnafu {
                row,
                decoded: column,
                bytes_per_row,
            }
        );
    }

    Ok(pixels)
}

/// Appends the run-length coded form of `pixels` to `out`, one scanline of `width` pixels at a
/// time.
pub fn encode(pixels: &[u8], width: usize, out: &mut Vec<u8>) {
    if width == 0 {
        return;
    }

    for row in pixels.chunks(width) {
        for (count, value) in row.iter().copied().dedup_with_count() {
            let mut remaining = count;
            while remaining > 0 {
                let run = remaining.min(MAX_RUN);
                remaining -= run;

                // a lone value that looks like a run byte still needs the two-byte form
                if run > 1 || value & RUN_TAG == RUN_TAG {
                    out.push(RUN_TAG | run as u8);
                }
                out.push(value);
            }
        }
    }
}
