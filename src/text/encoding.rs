//! WinAnsi (Windows-1252) encoding for the standard PDF fonts
//!
//! Helvetica is referenced without embedding, so every string drawn on a page
//! must be expressed as single-byte WinAnsi codes. RTF `\'hh` escapes use the
//! same code page, so the decoder lives here too.

/// Windows-1252 code points 0x80..=0x9F. `None` marks the five unassigned slots.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// Byte drawn in place of characters the font cannot show
pub const REPLACEMENT: u8 = b'?';

/// Map a character to its WinAnsi code, if it has one
pub fn to_win_ansi(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => CP1252_HIGH
            .iter()
            .position(|slot| *slot == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

/// Encode a line of text for a WinAnsi font.
///
/// Tabs and other control characters become spaces; characters outside the
/// code page become [`REPLACEMENT`].
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            if c.is_control() {
                b' '
            } else {
                to_win_ansi(c).unwrap_or(REPLACEMENT)
            }
        })
        .collect()
}

/// Decode one Windows-1252 byte
pub fn decode_cp1252(byte: u8) -> char {
    match byte {
        0x80..=0x9F => CP1252_HIGH[(byte - 0x80) as usize].unwrap_or('\u{FFFD}'),
        _ => byte as char,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(encode_win_ansi("Hello, World!"), b"Hello, World!".to_vec());
    }

    #[test]
    fn test_latin1_and_cp1252_specials() {
        assert_eq!(to_win_ansi('é'), Some(0xE9));
        assert_eq!(to_win_ansi('€'), Some(0x80));
        assert_eq!(to_win_ansi('\u{201C}'), Some(0x93));
        assert_eq!(to_win_ansi('—'), Some(0x97));
    }

    #[test]
    fn test_unmappable_and_control_chars() {
        assert_eq!(encode_win_ansi("a\tb"), b"a b".to_vec());
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_decode_roundtrips_defined_codes() {
        for byte in 0x20u8..=0xFF {
            let c = decode_cp1252(byte);
            if c == '\u{FFFD}' || c.is_control() {
                continue;
            }
            assert_eq!(to_win_ansi(c), Some(byte), "byte {:#x}", byte);
        }
        assert_eq!(decode_cp1252(0x81), '\u{FFFD}');
    }
}
