//! Sprites: raw palette indices plus a run-length coded visibility mask.
//!
//! ```plain
//! offset       size     field
//! 0            1        0x2D
//! 1            2        width, i16le
//! 3            2        height, i16le
//! 5            w*h      palette indices, row-major
//! 5+w*h        7        "SPRITE\0"
//! 12+w*h       2        transparency section length in bytes, u16le, even
//! 14+w*h       len      (code, run length) pairs, code 'K' = visible, 'N' = transparent
//! ```

use crate::{
    colorize,
    cursor::{ByteView, ByteViewMut},
    error::{
        IncompleteTransparencySnafu, InvalidSpriteDimensionsSnafu, InvalidSpriteHeaderSnafu,
        InvalidTransparencyDataSnafu, InvalidTransparencyHeaderSnafu, OddTransparencyLengthSnafu,
        Result, SpriteDimensionMismatchSnafu, SpriteTooLargeSnafu, TransparencyTooLongSnafu,
    },
    palette::Palette,
};
use alloc::{vec, vec::Vec};
use itertools::Itertools;
use log::debug;
use snafu::ensure;

pub const SPRITE_MAGIC: u8 = 0x2D;
pub const TRANSPARENCY_HEADER: [u8; 7] = *b"SPRITE\0";
/// Run code for visible pixels.
pub const VISIBLE_RUN: u8 = b'K';
/// Run code for transparent pixels.
pub const TRANSPARENT_RUN: u8 = b'N';

const HEADER_LEN: usize = 5;
const MAX_TRANSPARENCY_RUN: usize = u8::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub width: u16,
    pub height: u16,
    /// Palette indices, `width * height` of them.
    pub pixels: Vec<u8>,
    /// `true` for visible pixels, `false` for transparent ones.
    pub transparency: Vec<bool>,
}

impl Sprite {
    /// Builds a sprite from raw arrays. Both arrays must hold exactly `width * height` entries.
    pub fn from_data(
        pixels: Vec<u8>,
        transparency: Vec<bool>,
        width: u16,
        height: u16,
    ) -> Result<Self> {
        let sprite = Self {
            width,
            height,
            pixels,
            transparency,
        };
        sprite.check_dimensions()?;
        Ok(sprite)
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    fn check_dimensions(&self) -> Result<()> {
        let count = self.pixel_count();
        ensure!(
            self.pixels.len() == count && self.transparency.len() == count,
            SpriteDimensionMismatchSnafu {
                width: self.width,
                height: self.height,
                pixel_count: self.pixels.len(),
                transparency_count: self.transparency.len(),
            }
        );
        Ok(())
    }

    /// Decodes a sprite from the start of `data`. Trailing bytes are ignored.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_with_len(data).map(|(sprite, _)| sprite)
    }

    /// Decodes a sprite from the start of `data` and returns it together with the number of bytes
    /// it occupies.
    pub fn decode_with_len(data: &[u8]) -> Result<(Self, usize)> {
        let view = ByteView::new(data);

        view.require(1)?;
        let magic = view.u8(0);
        ensure!(
            magic == SPRITE_MAGIC,
            InvalidSpriteHeaderSnafu { found: magic }
        );

        view.require(HEADER_LEN)?;
        let (width, height) = (view.i16(1), view.i16(3));
        ensure!(
            width >= 0 && height >= 0,
            InvalidSpriteDimensionsSnafu { width, height }
        );
        let (width, height) = (width as u16, height as u16);
        let count = usize::from(width) * usize::from(height);

        let mut offset = HEADER_LEN;
        view.require(offset + count + TRANSPARENCY_HEADER.len() + 2)?;
        let pixels = view.slice(offset, count).to_vec();
        offset += count;

        ensure!(
            view.slice(offset, TRANSPARENCY_HEADER.len()) == TRANSPARENCY_HEADER,
            InvalidTransparencyHeaderSnafu
        );
        offset += TRANSPARENCY_HEADER.len();

        let length = view.u16(offset);
        offset += 2;
        ensure!(length % 2 == 0, OddTransparencyLengthSnafu { length });

        let end = offset + usize::from(length);
        view.require(end)?;

        let mut transparency = vec![false; count];
        let mut covered = 0;
        for run_offset in (offset..end).step_by(2) {
            let code = view.u8(run_offset);
            let run = usize::from(view.u8(run_offset + 1));
            let visible = match code {
                VISIBLE_RUN => true,
                TRANSPARENT_RUN => false,
                _ => {
                    return InvalidTransparencyDataSnafu {
                        code,
                        offset: run_offset,
                    }
                    .fail()
                }
            };

            if covered < count {
                transparency[covered..(covered + run).min(count)].fill(visible);
            }
            covered += run;
        }
        ensure!(
            covered == count,
            IncompleteTransparencySnafu {
                expected: count,
                decoded: covered,
            }
        );

        debug!("decoded {width}x{height} sprite ({end} bytes)");

        Ok((
            Self {
                width,
                height,
                pixels,
                transparency,
            },
            end,
        ))
    }

    /// Encodes the sprite. Transparency runs are broken at the end of every row and at 255 pixels.
    pub fn encode(&self) -> Result<Vec<u8>> {
        self.check_dimensions()?;

        let limit = i16::MAX as u16;
        ensure!(
            self.width <= limit && self.height <= limit,
            SpriteTooLargeSnafu {
                width: self.width,
                height: self.height,
            }
        );

        let count = self.pixel_count();
        let mut out = Vec::with_capacity(HEADER_LEN + TRANSPARENCY_HEADER.len() + 2 + 3 * count);
        out.resize(HEADER_LEN, 0);
        out.extend_from_slice(&self.pixels);
        out.extend_from_slice(&TRANSPARENCY_HEADER);

        let length_offset = out.len();
        out.extend_from_slice(&[0, 0]);

        if count > 0 {
            for row in self.transparency.chunks(usize::from(self.width)) {
                for (len, visible) in row.iter().copied().dedup_with_count() {
                    let code = if visible { VISIBLE_RUN } else { TRANSPARENT_RUN };
                    let mut remaining = len;
                    while remaining > 0 {
                        let run = remaining.min(MAX_TRANSPARENCY_RUN);
                        remaining -= run;
                        out.extend_from_slice(&[code, run as u8]);
                    }
                }
            }
        }

        let length = out.len() - length_offset - 2;
        ensure!(
            length <= usize::from(u16::MAX),
            TransparencyTooLongSnafu { length }
        );

        let mut view = ByteViewMut::new(&mut out);
        view.set_u8(0, SPRITE_MAGIC);
        view.set_i16(1, self.width as i16);
        view.set_i16(3, self.height as i16);
        view.set_u16(length_offset, length as u16);

        Ok(out)
    }

    /// RGBA rendering of the sprite, `4 * width * height` bytes. Without a palette the indices
    /// are used as grey values.
    pub fn image(&self, palette: Option<&Palette>) -> Result<Vec<u8>> {
        self.check_dimensions()?;
        Ok(colorize::visibility_mask(
            &self.pixels,
            &self.transparency,
            palette,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ErrorKind};

    /// 2x2 sprite, indices 1..=4, only the diagonal visible.
    const SMALL: [u8; 24] = [
        0x2D, 0x02, 0x00, 0x02, 0x00, //
        0x01, 0x02, 0x03, 0x04, //
        b'S', b'P', b'R', b'I', b'T', b'E', 0x00, //
        0x06, 0x00, //
        b'K', 0x01, b'N', 0x02, b'K', 0x01,
    ];

    #[test]
    fn decodes_small_sprite() {
        let (sprite, len) = Sprite::decode_with_len(&SMALL).unwrap();
        assert_eq!(len, SMALL.len());
        assert_eq!((sprite.width, sprite.height), (2, 2));
        assert_eq!(sprite.pixels, [1, 2, 3, 4]);
        assert_eq!(sprite.transparency, [true, false, false, true]);
    }

    #[test]
    fn runs_are_split_per_row_when_encoding() {
        // the decoder accepts the cross-row 'N' run, the encoder emits one run per row
        let sprite = Sprite::decode(&SMALL).unwrap();
        let encoded = sprite.encode().unwrap();
        assert_eq!(&encoded[..16], &SMALL[..16]);
        assert_eq!(
            &encoded[16..],
            &[0x08, 0x00, b'K', 0x01, b'N', 0x01, b'N', 0x01, b'K', 0x01][..]
        );
        assert_eq!(Sprite::decode(&encoded).unwrap(), sprite);
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut data = SMALL.to_vec();
        data.extend_from_slice(&[0xAA, 0xBB]);
        let (_, len) = Sprite::decode_with_len(&data).unwrap();
        assert_eq!(len, SMALL.len());
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = SMALL;
        data[0] = 0x2C;
        let err = Sprite::decode(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHeader);
        assert!(err.to_string().starts_with("Invalid Sprite file header"));
    }

    #[test]
    fn rejects_bad_transparency_header() {
        let mut data = SMALL;
        data[9] = b's';
        let err = Sprite::decode(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidTransparencyHeader));
        assert_eq!(err.to_string(), "Invalid Sprite transparency header");
    }

    #[test]
    fn rejects_odd_transparency_length() {
        let mut data = SMALL.to_vec();
        data[16] = 79;
        data.resize(18 + 79, b'K');
        let err = Sprite::decode(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
        assert_eq!(
            err.to_string(),
            "Invalid Sprite transparency length 79 - must be an even number"
        );
    }

    #[test]
    fn rejects_unknown_run_code() {
        let mut data = SMALL;
        data[20] = b'X';
        let err = Sprite::decode(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransparencyData {
                code: b'X',
                offset: 20
            }
        ));
        assert!(err.to_string().starts_with("Invalid Sprite transparency data"));
    }

    #[test]
    fn rejects_short_and_long_masks() {
        let mut data = SMALL;
        data[21] = 0x00;
        let err = Sprite::decode(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::IncompleteTransparency {
                expected: 4,
                decoded: 2
            }
        ));
        assert!(err
            .to_string()
            .starts_with("Sprite transparency data incomplete!"));

        let mut data = SMALL;
        data[21] = 0x05;
        let err = Sprite::decode(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::IncompleteTransparency {
                expected: 4,
                decoded: 7
            }
        ));
    }

    /// 2x2 sprite whose mask is complete after `K 4` and ends with a zero-length `N` run.
    const ZERO_TAIL: [u8; 22] = [
        0x2D, 0x02, 0x00, 0x02, 0x00, //
        0x01, 0x02, 0x03, 0x04, //
        b'S', b'P', b'R', b'I', b'T', b'E', 0x00, //
        0x04, 0x00, //
        b'K', 0x04, b'N', 0x00,
    ];

    #[test]
    fn zero_length_runs_after_full_mask_are_accepted() {
        let (sprite, len) = Sprite::decode_with_len(&ZERO_TAIL).unwrap();
        assert_eq!(len, ZERO_TAIL.len());
        assert_eq!(sprite.transparency, [true; 4]);

        // runs past the declared section length are not part of the sprite
        let mut data = ZERO_TAIL.to_vec();
        data.extend_from_slice(&[b'N', 0x01]);
        let (decoded, len) = Sprite::decode_with_len(&data).unwrap();
        assert_eq!(len, ZERO_TAIL.len());
        assert_eq!(decoded, sprite);
    }

    #[test]
    fn rejects_truncated_data() {
        let err = Sprite::decode(&SMALL[..12]).unwrap_err();
        assert!(matches!(err, Error::Truncated { .. }));

        let err = Sprite::decode(&SMALL[..20]).unwrap_err();
        assert!(matches!(
            err,
            Error::Truncated {
                needed: 24,
                available: 20
            }
        ));
    }

    #[test]
    fn rejects_negative_dimensions() {
        let mut data = SMALL;
        data[2] = 0xFF;
        let err = Sprite::decode(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidSpriteDimensions { .. }));
    }

    #[test]
    fn dimension_mismatch() {
        let err = Sprite::from_data(vec![0xFF, 0xFF], vec![false], 1, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        assert!(err
            .to_string()
            .starts_with("Array dimensions do not correspond with width and height!"));

        let err = Sprite::from_data(vec![0xFF], vec![false, true], 1, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);

        let mut sprite = Sprite::from_data(vec![0xFF], vec![false], 1, 1).unwrap();
        sprite.pixels = vec![0, 1];
        assert_eq!(
            sprite.encode().unwrap_err().kind(),
            ErrorKind::DimensionMismatch
        );
        assert_eq!(
            sprite.image(None).unwrap_err().kind(),
            ErrorKind::DimensionMismatch
        );
    }

    #[test]
    fn long_rows_split_at_255() {
        let sprite = Sprite::from_data(vec![0; 300], vec![true; 300], 300, 1).unwrap();
        let encoded = sprite.encode().unwrap();
        assert_eq!(
            &encoded[312..],
            &[0x04, 0x00, b'K', 0xFF, b'K', 45][..]
        );
        assert_eq!(Sprite::decode(&encoded).unwrap(), sprite);
    }

    #[test]
    fn empty_sprite_round_trips() {
        let sprite = Sprite::from_data(vec![], vec![], 0, 5).unwrap();
        let encoded = sprite.encode().unwrap();
        assert_eq!(encoded.len(), 14);
        assert_eq!(Sprite::decode(&encoded).unwrap(), sprite);
    }

    #[test]
    fn oversized_sprite_is_rejected() {
        let sprite = Sprite::from_data(vec![], vec![], 0x8000, 0).unwrap();
        assert_eq!(sprite.encode().unwrap_err().kind(), ErrorKind::LimitExceeded);
    }

    #[test]
    fn image_polarity() {
        let sprite = Sprite::decode(&SMALL).unwrap();
        let rgba = sprite.image(None).unwrap();
        assert_eq!(
            rgba,
            [1, 1, 1, 255, 2, 2, 2, 0, 3, 3, 3, 0, 4, 4, 4, 255]
        );
    }
}
