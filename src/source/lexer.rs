// src/source/lexer.rs

//! Minimal C lexing for array literals of integers.
//!
//! Only what a generated font-bank file needs: comments are blanked out,
//! a named array's brace-enclosed body is located, and its comma-separated
//! integer literals are decoded.

/// Replaces `/* ... */` and `// ...` comments with spaces, keeping byte offsets stable.
pub(super) fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'/', Some(b'*')) => {
                let end = text[i + 2..]
                    .find("*/")
                    .map(|p| i + 2 + p + 2)
                    .unwrap_or(bytes.len());
                out.extend(bytes[i..end].iter().map(|&b| if b == b'\n' { b'\n' } else { b' ' }));
                i = end;
            }
            (b'/', Some(b'/')) => {
                let end = text[i..].find('\n').map(|p| i + p).unwrap_or(bytes.len());
                out.extend(std::iter::repeat(b' ').take(end - i));
                i = end;
            }
            (b, _) => {
                out.push(b);
                i += 1;
            }
        }
    }
    // Only ASCII bytes were replaced, and only with ASCII, so this stays valid UTF-8.
    String::from_utf8(out).unwrap_or_default()
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Body of the first array declaration named `name`, i.e. the text between
/// `name[...] = {` and the closing `}`.
pub(super) fn array_body<'a>(text: &'a str, name: &str) -> Result<&'a str, String> {
    let bytes = text.as_bytes();
    let mut search_from = 0;
    while let Some(pos) = text[search_from..].find(name) {
        let start = search_from + pos;
        let end = start + name.len();
        search_from = end;

        let bounded_left = start == 0 || !is_ident_byte(bytes[start - 1]);
        let bounded_right = end == bytes.len() || !is_ident_byte(bytes[end]);
        if !bounded_left || !bounded_right {
            continue;
        }
        if !text[end..].trim_start().starts_with('[') {
            continue;
        }

        let open = text[end..]
            .find('{')
            .map(|p| end + p)
            .ok_or_else(|| format!("array '{}' has no initializer", name))?;
        // `extern u32 name[];` declares without defining; keep looking.
        if text[end..open].contains(';') {
            continue;
        }
        let body_start = open + 1;
        let close = text[body_start..]
            .find(['{', '}'])
            .map(|p| body_start + p)
            .ok_or_else(|| format!("array '{}' is missing its closing brace", name))?;
        if bytes[close] == b'{' {
            return Err(format!("array '{}' has a nested initializer", name));
        }
        return Ok(&text[body_start..close]);
    }
    Err(format!("array '{}' not found", name))
}

/// Decodes one C integer literal: `0x` hex or decimal, with optional `u`/`l` suffixes.
pub(super) fn parse_u32_literal(token: &str) -> Result<u32, String> {
    let digits = token.trim_end_matches(['u', 'U', 'l', 'L']);
    let parsed = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16)
    } else {
        digits.parse::<u32>()
    };
    parsed.map_err(|_| format!("invalid integer literal '{}'", token))
}

/// All integer literals of an array body, in order. A trailing comma is allowed.
pub(super) fn parse_u32_list(body: &str) -> Result<Vec<u32>, String> {
    let mut values = Vec::new();
    let mut tokens = body.split(',').map(str::trim).peekable();
    while let Some(token) = tokens.next() {
        if token.is_empty() {
            if tokens.peek().is_none() {
                break;
            }
            return Err("empty element in array initializer".to_string());
        }
        values.push(parse_u32_literal(token)?);
    }
    Ok(values)
}
