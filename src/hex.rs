use crate::{Error, Result};

/// Decodes a bus payload written as hex digits, such as `"9f 00 1a"` or `"0x9f001a"`.
///
/// Whitespace between bytes is ignored. Every byte must be written as two digits.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    let text = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
    let digits: Vec<u8> = text.bytes().filter(|byte| !byte.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(Error::InvalidInput(format!("odd number of hex digits in {:?}", text)))
    }
    digits.chunks_exact(2)
        .map(|pair| {
            let high = (pair[0] as char).to_digit(16);
            let low = (pair[1] as char).to_digit(16);
            match (high, low) {
                (Some(high), Some(low)) => Ok((high << 4 | low) as u8),
                _ => Err(Error::InvalidInput(
                    format!("invalid hex byte {:?}", String::from_utf8_lossy(pair)))),
            }
        })
        .collect()
}
