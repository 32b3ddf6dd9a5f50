//! Codecs for the indexed-color image formats of Elasto Mania resource files.
//!
//! # Formats
//!
//! ## Sprite (`.spr`)
//!
//! Uncompressed palette indices followed by a visibility mask stored as `(code, length)` runs.
//! See [`sprite`] for the byte layout. Decoding accepts runs that span rows; encoding breaks runs
//! at every row end and at 255 pixels, which reproduces the files shipped with the game byte for
//! byte.
//!
//! ## Letter collection (`.abc`)
//!
//! A font: a list of sprites, each tagged with a character code and a baseline offset. See
//! [`letters`].
//!
//! ## PCX
//!
//! Only what LGR pictures use: version 5, RLE, 8 bits per pixel, one bitplane, and an optional
//! trailing 256-color palette. See [`pcx`] and [`rle`].
//!
//! # Colors
//!
//! All formats store palette indices. [`Sprite::image`] and [`Pcx::image`] turn them into RGBA,
//! `4 * width * height` bytes, row-major. The two formats use opposite conventions for
//! transparency:
//!
//! - a sprite's flag is `true` for *visible* pixels,
//! - a PCX picture is made transparent by a [`Transparency`] rule that picks one palette index.
//!
//! [`DEFAULT_PALETTE`] can be used when no palette is at hand.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod colorize;
pub mod cursor;
pub mod error;
pub mod letters;
pub mod palette;
pub mod pcx;
pub mod rle;
pub mod sprite;

pub use colorize::Transparency;
pub use error::{Error, ErrorKind, Result};
pub use letters::{Letter, LetterCollection};
pub use palette::{Palette, DEFAULT_PALETTE, PALETTE_LEN};
pub use pcx::{write_pcx, Pcx, PcxHeader};
pub use sprite::Sprite;
