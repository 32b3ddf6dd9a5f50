use snafu::Snafu;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A marker byte or magic sequence did not match.
    InvalidHeader,
    /// The file uses a PCX feature outside the supported subset.
    UnsupportedFormat,
    /// The compressed body or transparency stream is inconsistent.
    MalformedData,
    /// Array lengths disagree with `width * height`.
    DimensionMismatch,
    /// The trailing PCX palette block is absent.
    MissingPalette,
    /// A palette of the wrong length was supplied.
    InvalidPalette,
    /// A value does not fit into the fixed-width field the format stores it in.
    LimitExceeded,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Unexpected end of data: {needed} bytes needed, but only {available} available"))]
    Truncated { needed: usize, available: usize },

    #[snafu(display("Invalid Sprite file header (found {found:#04x})"))]
    InvalidSpriteHeader { found: u8 },

    #[snafu(display("Invalid Sprite dimensions {width}x{height}"))]
    InvalidSpriteDimensions { width: i16, height: i16 },

    #[snafu(display("Invalid Sprite transparency header"))]
    InvalidTransparencyHeader,

    #[snafu(display("Invalid Sprite transparency length {length} - must be an even number"))]
    OddTransparencyLength { length: u16 },

    #[snafu(display("Invalid Sprite transparency data (run code {code:#04x} at offset {offset})"))]
    InvalidTransparencyData { code: u8, offset: usize },

    #[snafu(display("Sprite transparency data incomplete! ({decoded} of {expected} pixels covered)"))]
    IncompleteTransparency { expected: usize, decoded: usize },

    #[snafu(display(
        "Array dimensions do not correspond with width and height! {width} * {height} == {} pixels, but {pixel_count} pixels and {transparency_count} transparency flags were given",
        usize::from(*width) * usize::from(*height)
    ))]
    SpriteDimensionMismatch {
        width: u16,
        height: u16,
        pixel_count: usize,
        transparency_count: usize,
    },

    #[snafu(display("Sprite dimensions {width}x{height} do not fit into the format's 16-bit signed fields"))]
    SpriteTooLarge { width: u16, height: u16 },

    #[snafu(display("Sprite transparency section of {length} bytes does not fit into 16 bits"))]
    TransparencyTooLong { length: usize },

    #[snafu(display("Invalid ABC8 file header"))]
    InvalidLetterCollectionHeader,

    #[snafu(display("Invalid ABC8 letter count {count}"))]
    NegativeLetterCount { count: i16 },

    #[snafu(display("Invalid ABC8 Letter header (letter #{index})"))]
    InvalidLetterHeader { index: usize },

    #[snafu(display("{count} letters do not fit into an ABC8 file"))]
    TooManyLetters { count: usize },

    #[snafu(display("Invalid PCX file (found {found:#04x})"))]
    InvalidPcxHeader { found: u8 },

    #[snafu(display("Only Version 3.0 PCX files are supported (version byte {version})"))]
    UnsupportedPcxVersion { version: u8 },

    #[snafu(display("Invalid PCX encoding {encoding}"))]
    UnsupportedPcxEncoding { encoding: u8 },

    #[snafu(display("Only 8bpp PCX files are supported (found {bpp}bpp)"))]
    UnsupportedPcxBitDepth { bpp: u8 },

    #[snafu(display("Only single bitplane PCX files are supported (Extended VGA), found {bitplanes}"))]
    UnsupportedPcxBitplanes { bitplanes: u8 },

    #[snafu(display("Invalid PCX image bounds ({xmin}, {ymin})..=({xmax}, {ymax})"))]
    InvalidPcxBounds {
        xmin: i16,
        ymin: i16,
        xmax: i16,
        ymax: i16,
    },

    #[snafu(display(
        "PCX images must have a decoding break at the end of each scanline (row {row} decoded {decoded} of {bytes_per_row} bytes)"
    ))]
    ScanlineOverrun {
        row: usize,
        decoded: usize,
        bytes_per_row: u16,
    },

    #[snafu(display(
        "pixels.length does not match width*height! {width} * {height} == {} pixels, but {pixel_count} pixels were given",
        usize::from(*width) * usize::from(*height)
    ))]
    PcxDimensionMismatch {
        width: u16,
        height: u16,
        pixel_count: usize,
    },

    #[snafu(display("PCX images must be between 1x1 and 32768x32768 pixels, got {width}x{height}"))]
    PcxSizeOutOfRange { width: u16, height: u16 },

    #[snafu(display("Palette not found!"))]
    MissingPalette,

    #[snafu(display("Invalid palette! Expected 768 bytes, got {length}"))]
    InvalidPalette { length: usize },

    #[snafu(display("Unknown transparency code {code}"))]
    InvalidTransparencyRule { code: u8 },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidSpriteHeader { .. }
            | Error::InvalidSpriteDimensions { .. }
            | Error::InvalidTransparencyHeader
            | Error::InvalidLetterCollectionHeader
            | Error::NegativeLetterCount { .. }
            | Error::InvalidLetterHeader { .. }
            | Error::InvalidPcxHeader { .. }
            | Error::InvalidPcxBounds { .. } => ErrorKind::InvalidHeader,

            Error::UnsupportedPcxVersion { .. }
            | Error::UnsupportedPcxEncoding { .. }
            | Error::UnsupportedPcxBitDepth { .. }
            | Error::UnsupportedPcxBitplanes { .. } => ErrorKind::UnsupportedFormat,

            Error::Truncated { .. }
            | Error::OddTransparencyLength { .. }
            | Error::InvalidTransparencyData { .. }
            | Error::IncompleteTransparency { .. }
            | Error::ScanlineOverrun { .. }
            | Error::InvalidTransparencyRule { .. } => ErrorKind::MalformedData,

            Error::SpriteDimensionMismatch { .. } | Error::PcxDimensionMismatch { .. } => {
                ErrorKind::DimensionMismatch
            }

            Error::MissingPalette => ErrorKind::MissingPalette,
            Error::InvalidPalette { .. } => ErrorKind::InvalidPalette,

            Error::SpriteTooLarge { .. }
            | Error::TransparencyTooLong { .. }
            | Error::TooManyLetters { .. }
            | Error::PcxSizeOutOfRange { .. } => ErrorKind::LimitExceeded,
        }
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
