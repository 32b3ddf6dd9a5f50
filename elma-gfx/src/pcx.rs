//! The PCX subset used by LGR pictures: version 5 (PC Paintbrush 3.0), RLE encoded, 8 bits per
//! pixel in a single bitplane, optionally followed by a 256-color palette.
//!
//! ```plain
//! offset   size   field
//! 0        1      0x0A
//! 1        1      version (5)
//! 2        1      encoding (1 = RLE)
//! 3        1      bits per pixel (8)
//! 4        8      xmin, ymin, xmax, ymax, i16le
//! 12       4      horizontal/vertical resolution
//! 65       1      bitplanes (1)
//! 66       2      bytes per row, u16le
//! 68       2      palette type
//! 128      ..     RLE scanlines
//! len-769  1      0x0C palette marker
//! len-768  768    palette
//! ```

use crate::{
    colorize::{self, Transparency},
    cursor::{ByteView, ByteViewMut},
    error::{
        InvalidPcxBoundsSnafu, InvalidPcxHeaderSnafu, MissingPaletteSnafu, PcxDimensionMismatchSnafu,
        PcxSizeOutOfRangeSnafu, Result, UnsupportedPcxBitDepthSnafu,
        UnsupportedPcxBitplanesSnafu, UnsupportedPcxEncodingSnafu, UnsupportedPcxVersionSnafu,
    },
    palette::{Palette, PALETTE_LEN},
    rle,
};
use alloc::vec::Vec;
use core::cell::OnceCell;
use log::debug;
use snafu::ensure;

pub const PCX_MAGIC: u8 = 0x0A;
pub const PALETTE_MARKER: u8 = 0x0C;
pub const HEADER_LEN: usize = 128;

const VERSION: u8 = 5;
const ENCODING_RLE: u8 = 1;
const BITS_PER_PIXEL: u8 = 8;
const BITPLANES: u8 = 1;
// values elma.exe writes
const RESOLUTION: u16 = 10;
const PALETTE_TYPE: u16 = 1;

const MAX_DIMENSION: u16 = 0x8000;

/// Header fields the game actually looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcxHeader {
    pub version: u8,
    pub encoding: u8,
    pub bits_per_pixel: u8,
    pub xmin: i16,
    pub ymin: i16,
    pub xmax: i16,
    pub ymax: i16,
    pub bitplanes: u8,
    pub bytes_per_row: u16,
}

impl PcxHeader {
    /// Parses and validates the 128-byte header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let view = ByteView::new(data);

        view.require(1)?;
        let magic = view.u8(0);
        ensure!(magic == PCX_MAGIC, InvalidPcxHeaderSnafu { found: magic });

        view.require(HEADER_LEN)?;
        let header = Self {
            version: view.u8(1),
            encoding: view.u8(2),
            bits_per_pixel: view.u8(3),
            xmin: view.i16(4),
            ymin: view.i16(6),
            xmax: view.i16(8),
            ymax: view.i16(10),
            bitplanes: view.u8(65),
            bytes_per_row: view.u16(66),
        };

        let Self {
            version,
            encoding,
            bits_per_pixel,
            bitplanes,
            ..
        } = header;
        ensure!(version == VERSION, UnsupportedPcxVersionSnafu { version });
        ensure!(
            encoding == ENCODING_RLE,
            UnsupportedPcxEncodingSnafu { encoding }
        );
        ensure!(
            bits_per_pixel == BITS_PER_PIXEL,
            UnsupportedPcxBitDepthSnafu {
                bpp: bits_per_pixel
            }
        );
        ensure!(
            bitplanes == BITPLANES,
            UnsupportedPcxBitplanesSnafu { bitplanes }
        );

        Ok(header)
    }

    /// `xmax - xmin + 1`, may be non-positive for broken files.
    pub fn width(&self) -> i32 {
        i32::from(self.xmax) - i32::from(self.xmin) + 1
    }

    /// `ymax - ymin + 1`, may be non-positive for broken files.
    pub fn height(&self) -> i32 {
        i32::from(self.ymax) - i32::from(self.ymin) + 1
    }
}

/// A parsed PCX file. Pixels are decompressed on first access and kept.
#[derive(Debug)]
pub struct Pcx {
    data: Vec<u8>,
    header: PcxHeader,
    width: usize,
    height: usize,
    pixels: OnceCell<Vec<u8>>,
}

impl Pcx {
    pub fn new(data: Vec<u8>) -> Result<Self> {
        let header = PcxHeader::parse(&data)?;

        let (width, height) = (header.width(), header.height());
        ensure!(
            width > 0 && height > 0,
            InvalidPcxBoundsSnafu {
                xmin: header.xmin,
                ymin: header.ymin,
                xmax: header.xmax,
                ymax: header.ymax,
            }
        );
        let (width, height) = (width as usize, height as usize);

        debug!(
            "PCX {width}x{height}, {} bytes per row, {} bytes",
            header.bytes_per_row,
            data.len()
        );

        Ok(Self {
            data,
            header,
            width,
            height,
            pixels: OnceCell::new(),
        })
    }

    #[inline]
    pub fn header(&self) -> &PcxHeader {
        &self.header
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw file contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The palette stored in the last 768 bytes of the file.
    pub fn palette(&self) -> Result<Palette> {
        let len = self.data.len();
        ensure!(
            len > PALETTE_LEN && self.data[len - PALETTE_LEN - 1] == PALETTE_MARKER,
            MissingPaletteSnafu
        );
        Palette::from_slice(&self.data[len - PALETTE_LEN..])
    }

    /// Palette indices, `width * height` of them, row-major.
    pub fn pixels(&self) -> Result<&[u8]> {
        if let Some(pixels) = self.pixels.get() {
            return Ok(pixels);
        }

        let decoded = rle::decode(
            &self.data[HEADER_LEN..],
            self.width,
            self.height,
            self.header.bytes_per_row,
        )?;
        debug!("decompressed {} PCX pixels", decoded.len());

        Ok(self.pixels.get_or_init(|| decoded))
    }

    /// The palette index `transparency` makes transparent, if any.
    pub fn transparent_index(&self, transparency: Transparency) -> Result<Option<u8>> {
        let (width, height) = (self.width, self.height);
        let corner = match transparency {
            Transparency::Solid => return Ok(None),
            Transparency::Palette => return Ok(Some(0)),
            Transparency::TopLeft => 0,
            Transparency::TopRight => width - 1,
            Transparency::BottomLeft => (height - 1) * width,
            Transparency::BottomRight => height * width - 1,
        };
        Ok(Some(self.pixels()?[corner]))
    }

    /// RGBA rendering, `4 * width * height` bytes. Pixels with the transparent index get alpha 0,
    /// all others alpha 255.
    pub fn image(&self, palette: &Palette, transparency: Transparency) -> Result<Vec<u8>> {
        let transparent = self.transparent_index(transparency)?;
        Ok(colorize::color_key(self.pixels()?, palette, transparent))
    }
}

/// Writes `pixels` as a PCX file the way the game does, optionally followed by `palette`.
///
/// Rows are not padded to an even length.
pub fn write_pcx(
    pixels: &[u8],
    width: u16,
    height: u16,
    palette: Option<&[u8]>,
) -> Result<Vec<u8>> {
    ensure!(
        usize::from(width) * usize::from(height) == pixels.len(),
        PcxDimensionMismatchSnafu {
            width,
            height,
            pixel_count: pixels.len(),
        }
    );
    ensure!(
        (1..=MAX_DIMENSION).contains(&width) && (1..=MAX_DIMENSION).contains(&height),
        PcxSizeOutOfRangeSnafu { width, height }
    );
    let palette = palette.map(Palette::from_slice).transpose()?;

    let mut header = [0; HEADER_LEN];
    let mut view = ByteViewMut::new(&mut header);
    view.set_u8(0, PCX_MAGIC);
    view.set_u8(1, VERSION);
    view.set_u8(2, ENCODING_RLE);
    view.set_u8(3, BITS_PER_PIXEL);
    view.set_u16(8, width - 1);
    view.set_u16(10, height - 1);
    view.set_u16(12, RESOLUTION);
    view.set_u16(14, RESOLUTION);
    view.set_u8(65, BITPLANES);
    view.set_u16(66, width);
    view.set_u16(68, PALETTE_TYPE);

    let mut out = Vec::with_capacity(HEADER_LEN + 2 * pixels.len() + 1 + PALETTE_LEN);
    out.extend_from_slice(&header);
    rle::encode(pixels, usize::from(width), &mut out);

    if let Some(palette) = palette {
        out.push(PALETTE_MARKER);
        out.extend_from_slice(palette.as_bytes());
    }

    debug!("wrote {width}x{height} PCX ({} bytes)", out.len());

    Ok(out)
}
