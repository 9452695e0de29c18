use encoding::all::ISO_8859_1;
use encoding::{DecoderTrap, EncoderTrap, Encoding};

use crate::Error;

/// Payload bytes for `text`, one byte per character.
///
/// Frames keep whatever encoding byte they already carry, so text that has
/// no latin-1 form is refused rather than written as something else.
pub fn encode_iso_8859_1(text: &str) -> Result<Vec<u8>, Error> {
    ISO_8859_1
        .encode(text, EncoderTrap::Strict)
        .map_err(|reason| Error::UnencodableText {
            text: text.to_string(),
            reason: reason.into_owned(),
        })
}

// stray nulls at the end are terminators, not text
pub fn decode_iso_8859_1(input: &[u8]) -> String {
    let text = match ISO_8859_1.decode(input, DecoderTrap::Replace) {
        Ok(text) => text,
        Err(_) => String::from_utf8_lossy(input).into_owned(),
    };
    text.trim_end_matches('\0').to_string()
}
