//! Adaptive dictionary substitution (LZW) over bytes.
//!
//! Codes 0–255 stand for single bytes; every unseen `prefix + byte`
//! extension gets the next code starting at 256. Encoder and decoder grow
//! the dictionary in lockstep, so it is never transmitted.

use std::collections::HashMap;

use super::DecodeError;

/// First code assigned to a multi-byte dictionary entry.
pub(super) const FIRST_DYNAMIC_CODE: u32 = 256;

/// Greedy longest-match compression of `input` into dictionary codes.
pub(super) fn compress(input: &[u8]) -> Vec<u32> {
    let mut dictionary: HashMap<(u32, u8), u32> = HashMap::new();
    let mut next_code = FIRST_DYNAMIC_CODE;
    let mut codes = Vec::new();

    let mut bytes = input.iter();
    let Some(&first) = bytes.next() else {
        return codes;
    };
    let mut current = u32::from(first);

    for &byte in bytes {
        match dictionary.get(&(current, byte)) {
            Some(&code) => current = code,
            None => {
                codes.push(current);
                dictionary.insert((current, byte), next_code);
                next_code += 1;
                current = u32::from(byte);
            }
        }
    }
    codes.push(current);

    codes
}

/// Inverse of [`compress`].
///
/// A code is valid when it is already in the dictionary, or when it is the
/// entry about to be assigned (the `w + w[0]` case). Anything else is fatal.
pub(super) fn expand(codes: &[u32]) -> Result<Vec<u8>, DecodeError> {
    // entries[i] describes code 256 + i as (prefix code, last byte)
    let mut entries: Vec<(u32, u8)> = Vec::new();
    let mut output = Vec::new();
    let mut scratch = Vec::new();

    let mut iter = codes.iter().copied().enumerate();
    let Some((_, first)) = iter.next() else {
        return Ok(output);
    };
    if first >= FIRST_DYNAMIC_CODE {
        return Err(DecodeError::CorruptStream(format!(
            "first code {} is not a literal byte",
            first
        )));
    }
    output.push(first as u8);
    let mut previous = first;

    for (position, code) in iter {
        let next_code = FIRST_DYNAMIC_CODE + entries.len() as u32;

        let first_byte = if code < next_code {
            spell(code, &entries, &mut scratch);
            output.extend_from_slice(&scratch);
            scratch[0]
        } else if code == next_code {
            spell(previous, &entries, &mut scratch);
            let head = scratch[0];
            output.extend_from_slice(&scratch);
            output.push(head);
            head
        } else {
            return Err(DecodeError::CorruptStream(format!(
                "code {} at position {} is past the dictionary (next entry {})",
                code, position, next_code
            )));
        };

        entries.push((previous, first_byte));
        previous = code;
    }

    Ok(output)
}

/// Writes the bytes of `code` into `out`, replacing its contents.
fn spell(code: u32, entries: &[(u32, u8)], out: &mut Vec<u8>) {
    out.clear();
    let mut current = code;
    while current >= FIRST_DYNAMIC_CODE {
        let (prefix, byte) = entries[(current - FIRST_DYNAMIC_CODE) as usize];
        out.push(byte);
        current = prefix;
    }
    out.push(current as u8);
    out.reverse();
}
