//! Indexed pixels to RGBA.
//!
//! Sprites and PCX pictures disagree on what a transparency flag means, so each gets its own
//! function: [`visibility_mask`] for sprites (flag set = opaque) and [`color_key`] for PCX pictures
//! (matching index = transparent).

use crate::{
    error::{Error, InvalidTransparencyRuleSnafu},
    palette::Palette,
};
use alloc::vec::Vec;

/// Which palette index of a PCX picture is rendered transparent.
///
/// The discriminants are the values LGR picture lists store for each rule.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transparency {
    /// Nothing is transparent.
    Solid = 10,
    /// Palette index 0 is transparent.
    Palette = 11,
    /// The index found at the top-left pixel is transparent.
    TopLeft = 12,
    TopRight = 13,
    BottomLeft = 14,
    BottomRight = 15,
}

impl TryFrom<u8> for Transparency {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            10 => Transparency::Solid,
            11 => Transparency::Palette,
            12 => Transparency::TopLeft,
            13 => Transparency::TopRight,
            14 => Transparency::BottomLeft,
            15 => Transparency::BottomRight,
            _ => return InvalidTransparencyRuleSnafu { code }.fail(),
        })
    }
}

impl From<Transparency> for u8 {
    fn from(transparency: Transparency) -> Self {
        transparency as u8
    }
}

#[inline]
fn rgb(index: u8, palette: Option<&Palette>) -> [u8; 3] {
    match palette {
        Some(palette) => palette.rgb(index),
        None => [index; 3],
    }
}

/// Colorizes sprite pixels. A `true` flag in `visible` produces alpha 255, `false` produces 0.
///
/// Without a palette the index is replicated into a grey value.
pub fn visibility_mask(pixels: &[u8], visible: &[bool], palette: Option<&Palette>) -> Vec<u8> {
    debug_assert_eq!(pixels.len(), visible.len());

    let mut rgba = Vec::with_capacity(4 * pixels.len());
    for (&index, &visible) in pixels.iter().zip(visible) {
        let [r, g, b] = rgb(index, palette);
        let alpha = if visible { 255 } else { 0 };
        rgba.extend_from_slice(&[r, g, b, alpha]);
    }
    rgba
}

/// Colorizes PCX pixels. Every pixel whose index equals `transparent` gets alpha 0, every other
/// pixel alpha 255.
pub fn color_key(pixels: &[u8], palette: &Palette, transparent: Option<u8>) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(4 * pixels.len());
    for &index in pixels {
        let [r, g, b] = palette.rgb(index);
        let alpha = if Some(index) == transparent { 0 } else { 255 };
        rgba.extend_from_slice(&[r, g, b, alpha]);
    }
    rgba
}
