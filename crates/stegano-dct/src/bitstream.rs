//! Length prefixed bit sequence of a text message.
//!
//! Layout: a 32 bit big endian header holding the number of characters,
//! followed by 8 bits per character, most significant bit first.
//! Total length is therefore `32 + 8 * n` bits.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::{Result, SteganoError};

/// Header size in bits.
pub const HEADER_BITS: usize = 32;

/// Sanity ceiling on the declared message length, in characters.
///
/// Used by [`decode`], by the early stop of extraction and by embedding,
/// `32 + 8 * MAX_MESSAGE_LEN` stays below the extraction hard cap.
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Number of bits needed to carry a message of `len` characters.
#[inline]
pub fn required_bits(len: usize) -> usize {
    HEADER_BITS + len * 8
}

/// Convert a text message into its bit sequence.
///
/// Every character has to be representable as a single byte (U+0000 to U+00FF).
pub fn encode(text: &str) -> Result<Vec<bool>> {
    if text.is_empty() {
        return Err(SteganoError::EmptyPayload);
    }

    let bytes = text
        .chars()
        .enumerate()
        .map(|(position, character)| {
            u8::try_from(u32::from(character))
                .map_err(|_| SteganoError::UnsupportedCharacter {
                    character,
                    position,
                })
        })
        .collect::<Result<Vec<u8>>>()?;

    let len = u32::try_from(bytes.len())
        .map_err(|_| SteganoError::invalid_input("message length exceeds 32 bits"))?;

    let mut writer = BitWriter::endian(Vec::with_capacity(bytes.len() + 4), BigEndian);
    writer.write(32, len)?;
    writer.write_bytes(&bytes)?;
    let packed = writer.into_writer();

    let mut reader = BitReader::endian(Cursor::new(&packed), BigEndian);
    let mut bits = Vec::with_capacity(required_bits(bytes.len()));
    for _ in 0..required_bits(bytes.len()) {
        bits.push(reader.read_bit()?);
    }

    Ok(bits)
}

/// Read the declared message length from the header, if enough bits are present.
pub fn declared_len(bits: &[bool]) -> Option<usize> {
    let header = bits.get(..HEADER_BITS)?;
    let packed = pack(header).ok()?;
    let mut reader = BitReader::endian(Cursor::new(&packed), BigEndian);
    let len: u32 = reader.read(32).ok()?;

    usize::try_from(len).ok()
}

/// Convert a bit sequence back into text.
///
/// Never fails: a short header, a declared length of zero or above
/// [`MAX_MESSAGE_LEN`], or a truncated body all decode to an empty string.
/// Bits beyond the declared length are ignored.
pub fn decode(bits: &[bool]) -> String {
    read_message(bits).unwrap_or_default()
}

fn read_message(bits: &[bool]) -> Option<String> {
    let len = declared_len(bits)?;
    if len == 0 || len > MAX_MESSAGE_LEN {
        return None;
    }

    let body = bits.get(HEADER_BITS..required_bits(len))?;
    let bytes = pack(body).ok()?;

    Some(bytes.into_iter().map(char::from).collect())
}

fn pack(bits: &[bool]) -> std::io::Result<Vec<u8>> {
    let mut writer = BitWriter::endian(Vec::with_capacity(bits.len().div_ceil(8)), BigEndian);
    for &bit in bits {
        writer.write_bit(bit)?;
    }
    writer.byte_align()?;

    Ok(writer.into_writer())
}
