//! Letter collections (ABC8 font files): a list of glyph sprites keyed by character code.
//!
//! ```plain
//! "RA1\0", count: i16le,
//! count * { "EGYMIX\0", code: u8, y: i16le, sprite }
//! ```
//!
//! Sprites carry no end marker; each one is decoded from the remaining bytes and its own length
//! tells where the next record starts.

use crate::{
    cursor::{ByteView, ByteViewMut},
    error::{
        InvalidLetterCollectionHeaderSnafu, InvalidLetterHeaderSnafu, NegativeLetterCountSnafu,
        Result, TooManyLettersSnafu,
    },
    sprite::Sprite,
};
use alloc::vec::Vec;
use log::{debug, trace};
use snafu::ensure;

pub const LETTER_COLLECTION_MAGIC: [u8; 4] = *b"RA1\0";
pub const LETTER_HEADER: [u8; 7] = *b"EGYMIX\0";

const FILE_HEADER_LEN: usize = LETTER_COLLECTION_MAGIC.len() + 2;
const RECORD_HEADER_LEN: usize = LETTER_HEADER.len() + 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    /// Character code the glyph is drawn for.
    pub code: u8,
    /// Vertical offset of the glyph relative to the text baseline.
    pub y: i16,
    pub sprite: Sprite,
}

/// An ordered list of glyphs. Codes are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterCollection {
    pub letters: Vec<Letter>,
}

impl LetterCollection {
    pub fn new(letters: Vec<Letter>) -> Self {
        Self { letters }
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let view = ByteView::new(data);

        view.require(LETTER_COLLECTION_MAGIC.len())?;
        ensure!(
            view.slice(0, LETTER_COLLECTION_MAGIC.len()) == LETTER_COLLECTION_MAGIC,
            InvalidLetterCollectionHeaderSnafu
        );

        view.require(FILE_HEADER_LEN)?;
        let count = view.i16(4);
        ensure!(count >= 0, NegativeLetterCountSnafu { count });

        let mut letters = Vec::with_capacity(count as usize);
        let mut offset = FILE_HEADER_LEN;
        for index in 0..count as usize {
            view.require(offset + LETTER_HEADER.len())?;
            ensure!(
                view.slice(offset, LETTER_HEADER.len()) == LETTER_HEADER,
                InvalidLetterHeaderSnafu { index }
            );
            offset += LETTER_HEADER.len();

            view.require(offset + 3)?;
            let code = view.u8(offset);
            let y = view.i16(offset + 1);
            offset += 3;

            let (sprite, len) = Sprite::decode_with_len(view.tail(offset))?;
            offset += len;

            trace!("letter #{index}: code {code}, y {y}, {len} byte sprite");
            letters.push(Letter { code, y, sprite });
        }

        debug!("decoded letter collection with {count} letters");

        Ok(Self { letters })
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let count = self.letters.len();
        ensure!(
            count <= i16::MAX as usize,
            TooManyLettersSnafu { count }
        );

        let sprites = self
            .letters
            .iter()
            .map(|letter| letter.sprite.encode())
            .collect::<Result<Vec<_>>>()?;

        let size = FILE_HEADER_LEN
            + RECORD_HEADER_LEN * count
            + sprites.iter().map(Vec::len).sum::<usize>();
        let mut out = alloc::vec![0; size];
        let mut view = ByteViewMut::new(&mut out);

        view.set_slice(0, &LETTER_COLLECTION_MAGIC);
        view.set_i16(4, count as i16);

        let mut offset = FILE_HEADER_LEN;
        for (letter, sprite) in self.letters.iter().zip(&sprites) {
            view.set_slice(offset, &LETTER_HEADER);
            offset += LETTER_HEADER.len();
            view.set_u8(offset, letter.code);
            view.set_i16(offset + 1, letter.y);
            offset += 3;
            view.set_slice(offset, sprite);
            offset += sprite.len();
        }

        Ok(out)
    }

    /// All letters drawn for `code`, in file order.
    pub fn find(&self, code: u8) -> impl Iterator<Item = &Letter> + '_ {
        self.letters.iter().filter(move |letter| letter.code == code)
    }
}
