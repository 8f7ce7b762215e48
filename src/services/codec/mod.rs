//! Share token codec.
//!
//! Turns any serde-serializable value into a short URL-safe string and back:
//! JSON text, LZW dictionary codes, fixed bit packing, then base64 with `-`
//! and `_` in place of `+` and `/` and no `=` padding. Every call builds and
//! discards its own dictionary, so the codec is safe to use from any thread.

mod dictionary;
mod packing;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Why a token could not be turned back into a value.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("share token is not valid base64: {0}")]
    BadEncoding(#[from] base64::DecodeError),
    #[error("share token is corrupt: {0}")]
    CorruptStream(String),
    #[error("share token format version {0} is not supported")]
    UnsupportedVersion(u8),
    #[error("share token does not contain a valid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Encode `value` as a URL-safe token.
///
/// # Examples
/// ```
/// use timetable_weaver::services::codec;
///
/// let token = codec::encode(&vec!["Mon", "Tue"]).unwrap();
/// let back: Vec<String> = codec::decode(&token).unwrap();
/// assert_eq!(back, vec!["Mon", "Tue"]);
/// ```
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(value)?;
    let codes = dictionary::compress(&json);
    let packed = packing::pack(&codes);
    let token = URL_SAFE_NO_PAD.encode(&packed);

    log::debug!(
        "Encoded {} bytes of JSON into {} codes, token length {}",
        json.len(),
        codes.len(),
        token.len()
    );

    Ok(token)
}

/// Decode a token produced by [`encode`]. Surrounding whitespace and
/// trailing `=` padding are ignored.
pub fn decode<T: DeserializeOwned>(token: &str) -> Result<T, DecodeError> {
    let packed = URL_SAFE_NO_PAD.decode(token.trim().trim_end_matches('='))?;
    let codes = packing::unpack(&packed)?;
    let json = dictionary::expand(&codes)?;
    let value = serde_json::from_slice(&json)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::{ScheduleData, ScheduleState};
    use base64::engine::general_purpose::STANDARD;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn scenario_state() -> ScheduleState {
        ScheduleState {
            schedule: ScheduleData::new(),
            days: vec!["Mon".to_string()],
            time_slots: vec!["9am".to_string()],
            heading_text: "X".to_string(),
        }
    }

    #[test]
    fn test_state_roundtrip() {
        let state = scenario_state();
        let token = encode(&state).unwrap();
        let decoded: ScheduleState = decode(&token).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_token_is_url_safe() {
        let value = json!({ "text": "???>>>~~~ ÿÿÿ ".repeat(20) });
        let token = encode(&value).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        let back: serde_json::Value = decode(&token).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_invalid_characters_are_bad_encoding() {
        let result = decode::<ScheduleState>("abc$def!");
        assert!(matches!(result, Err(DecodeError::BadEncoding(_))));
    }

    #[test]
    fn test_impossible_length_is_bad_encoding() {
        let result = decode::<ScheduleState>("abcde");
        assert!(matches!(result, Err(DecodeError::BadEncoding(_))));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let token = encode(&json!([1, 2, 3])).unwrap();
        let back: Vec<u32> = decode(&format!("  {}\n", token)).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn test_padded_token_is_accepted() {
        let token = encode(&json!(["Mon", "Tue"])).unwrap();
        let padded = format!("{}{}", token, "=".repeat((4 - token.len() % 4) % 4));
        let back: Vec<String> = decode(&padded).unwrap();
        assert_eq!(back, vec!["Mon", "Tue"]);
    }

    #[test]
    fn test_standard_alphabet_is_rejected() {
        let token = format!("{}+/", encode(&json!([1])).unwrap());
        let result = decode::<Vec<u32>>(&token);
        assert!(matches!(result, Err(DecodeError::BadEncoding(_))));
    }

    #[test]
    fn test_empty_token_is_corrupt() {
        let result = decode::<ScheduleState>("");
        assert!(matches!(result, Err(DecodeError::CorruptStream(_))));
    }

    #[test]
    fn test_foreign_base64_is_rejected() {
        // Plain base64 of JSON, as older share links carried
        let legacy = STANDARD.encode(br#"{"days":["Mon"]}"#);
        let result = decode::<serde_json::Value>(&legacy);
        assert!(matches!(result, Err(DecodeError::UnsupportedVersion(_))));
    }

    #[test]
    fn test_valid_stream_with_wrong_shape_is_invalid_payload() {
        let token = encode(&json!({ "days": 5 })).unwrap();
        let result = decode::<ScheduleState>(&token);
        assert!(matches!(result, Err(DecodeError::InvalidPayload(_))));
    }

    #[test]
    fn test_repetitive_input_beats_plain_base64() {
        let value = json!({
            "rows": vec![json!({ "title": "Quantum Physics", "subtitle": "Room 101" }); 40]
        });
        let plain = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&value).unwrap());
        let token = encode(&value).unwrap();
        assert!(token.len() * 3 < plain.len());
    }
}
