//! Backslash-escape decoding for string literals lifted out of raw text.
//!
//! Regex extraction hands us the literal body of a JSON-ish string, escapes
//! and all. [`unescape`] decodes it and never fails: a malformed or unknown
//! escape sequence is copied through unchanged.
//!
//! | Escape | Result |
//! |--------|--------|
//! | `\n` `\t` `\r` `\b` `\f` | control characters |
//! | `\\` `\"` `\'` `\/` | the escaped character |
//! | `\uXXXX` | BMP code point, surrogate pairs combined |
//! | `\xHH` | code point U+0000..U+00FF |
//! | `\UXXXXXXXX` | any code point |

/// Decodes backslash escapes in `input`.
///
/// # Example
///
/// ```
/// use chatsift::parsing::unescape;
///
/// assert_eq!(unescape(r#"Say \"hi\"\nthen \u00e9"#), "Say \"hi\"\nthen é");
/// assert_eq!(unescape(r"\ud83d\ude00"), "😀");
/// // malformed sequences pass through
/// assert_eq!(unescape(r"\u12G4 and \q"), r"\u12G4 and \q");
/// ```
pub fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if let Some((ch, consumed)) = decode_escape(rest) {
            out.push(ch);
            rest = &rest[consumed..];
        } else {
            out.push('\\');
            rest = &rest[1..];
        }
    }

    out.push_str(rest);
    out
}

/// Decodes the escape at the start of `s`, which begins with a backslash.
/// Returns the decoded character and the number of bytes consumed.
fn decode_escape(s: &str) -> Option<(char, usize)> {
    let ch = match *s.as_bytes().get(1)? {
        b'n' => '\n',
        b't' => '\t',
        b'r' => '\r',
        b'b' => '\u{0008}',
        b'f' => '\u{000C}',
        b'\\' => '\\',
        b'"' => '"',
        b'\'' => '\'',
        b'/' => '/',
        b'u' => return decode_utf16_escape(s),
        b'x' => return hex_char(s.get(2..4)?).map(|c| (c, 4)),
        b'U' => return hex_char(s.get(2..10)?).map(|c| (c, 10)),
        _ => return None,
    };
    Some((ch, 2))
}

/// `\uXXXX`, combining a high surrogate with a following `\uXXXX` low one.
fn decode_utf16_escape(s: &str) -> Option<(char, usize)> {
    let high = hex_u32(s.get(2..6)?)?;

    if (0xD800..0xDC00).contains(&high) {
        if s.get(6..8)? != "\\u" {
            return None;
        }
        let low = hex_u32(s.get(8..12)?)?;
        if !(0xDC00..0xE000).contains(&low) {
            return None;
        }
        let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(combined).map(|c| (c, 12));
    }

    char::from_u32(high).map(|c| (c, 6))
}

fn hex_char(hex: &str) -> Option<char> {
    hex_u32(hex).and_then(char::from_u32)
}

fn hex_u32(hex: &str) -> Option<u32> {
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}
