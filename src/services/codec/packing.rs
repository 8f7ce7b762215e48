//! Fixed bit packing of dictionary codes.
//!
//! Layout: one version byte, then the codes as an MSB-first bit stream. The
//! k-th code (0-based) takes `max(8, bit_length(255 + k))` bits, which is
//! exactly what the largest code legal at that position needs. The last byte
//! is zero padded.

use super::DecodeError;

/// Version byte written in front of every packed stream.
pub(super) const FORMAT_VERSION: u8 = 1;

const MAX_CODE_WIDTH: u32 = 32;

/// Bits used for the code at `index`.
pub(super) fn code_width(index: usize) -> u32 {
    let largest = 255u64 + index as u64;
    (u64::BITS - largest.leading_zeros()).max(8)
}

pub(super) fn pack(codes: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + codes.len() * 2);
    out.push(FORMAT_VERSION);

    let mut acc: u64 = 0;
    let mut pending: u32 = 0;

    for (index, &code) in codes.iter().enumerate() {
        let width = code_width(index);
        debug_assert!(u64::from(code) < (1u64 << width), "code wider than its slot");

        acc = (acc << width) | u64::from(code);
        pending += width;
        while pending >= 8 {
            pending -= 8;
            out.push((acc >> pending) as u8);
        }
        acc &= (1u64 << pending) - 1;
    }

    if pending > 0 {
        out.push((acc << (8 - pending)) as u8);
    }

    out
}

pub(super) fn unpack(bytes: &[u8]) -> Result<Vec<u32>, DecodeError> {
    let (&version, payload) = bytes
        .split_first()
        .ok_or_else(|| DecodeError::CorruptStream("token carries no data".to_string()))?;
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let mut codes = Vec::with_capacity(payload.len());
    let mut acc: u64 = 0;
    let mut available: u32 = 0;
    let mut input = payload.iter();

    loop {
        let width = code_width(codes.len());
        if width > MAX_CODE_WIDTH {
            return Err(DecodeError::CorruptStream(
                "code stream exceeds the maximum dictionary size".to_string(),
            ));
        }

        while available < width {
            match input.next() {
                Some(&byte) => {
                    acc = (acc << 8) | u64::from(byte);
                    available += 8;
                }
                None => break,
            }
        }
        if available < width {
            break;
        }

        available -= width;
        codes.push((acc >> available) as u32);
        acc &= (1u64 << available) - 1;
    }

    if available >= 8 || acc != 0 {
        return Err(DecodeError::CorruptStream(
            "trailing bits after the last code".to_string(),
        ));
    }

    Ok(codes)
}
