//! Decodes a raw STRING token lexeme (quotes, prefix and all) into the
//! `Str`/`Bytes` literal it denotes. Split out of `parser.rs` since the
//! escape table here is a different kind of detail than grammar recursion.

use crate::ast::Literal;
use crate::error::ParseErrorKind;

pub fn decode_string_token(lexeme: &str) -> Result<Literal, ParseErrorKind> {
    let (is_bytes, rest) = match lexeme.strip_prefix('b').or_else(|| lexeme.strip_prefix('B')) {
        Some(rest) => (true, rest),
        None => (false, lexeme),
    };

    let inner = strip_quotes(rest)?;

    if is_bytes {
        Ok(Literal::Bytes(decode_escapes_bytes(inner)?))
    } else {
        Ok(Literal::Str(decode_escapes_str(inner)?))
    }
}

fn strip_quotes(text: &str) -> Result<&str, ParseErrorKind> {
    for quote in ["\"\"\"", "'''"] {
        if text.len() >= 6 && text.starts_with(quote) && text.ends_with(quote) {
            return Ok(&text[3..text.len() - 3]);
        }
    }
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return Ok(&text[1..text.len() - 1]);
        }
    }
    Err(ParseErrorKind::Expected("a quoted string literal".to_owned()))
}

fn hex_digits(chars: &mut std::str::Chars<'_>, count: usize) -> Result<u32, ParseErrorKind> {
    let mut value: u32 = 0;
    for _ in 0..count {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| ParseErrorKind::Expected(format!("{count} hex digits in escape sequence")))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

fn decode_escapes_str(inner: &str) -> Result<String, ParseErrorKind> {
    let mut out = String::new();
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('f') => out.push('\u{c}'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('x') => {
                let value = hex_digits(&mut chars, 2)?;
                out.push(value as u8 as char);
            }
            Some('u') => {
                let value = hex_digits(&mut chars, 4)?;
                out.push(char::from_u32(value).ok_or_else(|| {
                    ParseErrorKind::Expected("a valid unicode code point in \\u escape".to_owned())
                })?);
            }
            Some('U') => {
                let value = hex_digits(&mut chars, 8)?;
                out.push(char::from_u32(value).ok_or_else(|| {
                    ParseErrorKind::Expected("a valid unicode code point in \\U escape".to_owned())
                })?);
            }
            Some(other) => out.push(other),
            None => break,
        }
    }
    Ok(out)
}

fn decode_escapes_bytes(inner: &str) -> Result<Vec<u8>, ParseErrorKind> {
    let mut out = Vec::new();
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            let mut buf = [0u8; 4];
            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match chars.next() {
            Some('n') => out.push(b'\n'),
            Some('r') => out.push(b'\r'),
            Some('t') => out.push(b'\t'),
            Some('f') => out.push(0x0c),
            Some('\'') => out.push(b'\''),
            Some('"') => out.push(b'"'),
            Some('\\') => out.push(b'\\'),
            Some('x') => out.push(hex_digits(&mut chars, 2)? as u8),
            Some(other) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
            None => break,
        }
    }
    Ok(out)
}
