//! Query-string scanning and form decoding.
//!
//! Not a general URL library: it only pulls the values of one key out of a
//! raw `a=1&b=2` string and decodes them.

/// Extracts every value for `key` from a raw query string.
///
/// The query string is split on `&` and empty segments are skipped. A segment
/// equal to `key` yields an empty value; a segment starting with `key=` yields
/// the remainder, decoded with [`url_decode`]. Keys are compared on the raw,
/// undecoded text. Values come back in the order they appear.
///
/// # Examples
///
/// ```
/// use query_token_gate::parse_query;
///
/// assert_eq!(parse_query("a=1&b=2&b=3", "b"), vec!["2", "3"]);
/// assert_eq!(parse_query("a=1&b", "b"), vec![""]);
/// assert!(parse_query("", "b").is_empty());
/// ```
pub fn parse_query(query: &str, key: &str) -> Vec<String> {
    raw_values(query, key).map(url_decode).collect()
}

/// Like [`parse_query`], but keeps each decoded value as raw bytes.
///
/// Nothing is lost when a decoded value is not valid UTF-8, so distinct
/// escapes such as `%FF` and `%FE` stay distinct.
///
/// # Examples
///
/// ```
/// use query_token_gate::parse_query_bytes;
///
/// assert_eq!(parse_query_bytes("t=%FF&t=a+b", "t"), vec![vec![0xFF], b"a b".to_vec()]);
/// ```
pub fn parse_query_bytes(query: &str, key: &str) -> Vec<Vec<u8>> {
    raw_values(query, key).map(url_decode_bytes).collect()
}

fn raw_values<'a>(query: &'a str, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .filter_map(move |segment| {
            if segment == key {
                return Some("");
            }
            segment
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix('='))
        })
}

/// Decodes `application/x-www-form-urlencoded` text into a `String`.
///
/// Same decoding as [`url_decode_bytes`]. A byte sequence that is not valid
/// UTF-8 after decoding is replaced with U+FFFD; matching never uses this
/// lossy form.
///
/// # Examples
///
/// ```
/// use query_token_gate::url_decode;
///
/// assert_eq!(url_decode("mixed+%20%21"), "mixed  !");
/// assert_eq!(url_decode("100%"), "100%");
/// assert_eq!(url_decode("%zz"), "%zz");
/// ```
pub fn url_decode(input: &str) -> String {
    match String::from_utf8(url_decode_bytes(input)) {
        Ok(decoded) => decoded,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Decodes `application/x-www-form-urlencoded` text into raw bytes.
///
/// `+` becomes a space and `%XY` with two hex digits becomes the byte `0xXY`.
/// A `%` that is not followed by two hex digits is copied through unchanged
/// along with whatever follows it.
///
/// # Examples
///
/// ```
/// use query_token_gate::url_decode_bytes;
///
/// assert_eq!(url_decode_bytes("a%FFb"), b"a\xFFb");
/// assert_eq!(url_decode_bytes("%2"), b"%2");
/// ```
pub fn url_decode_bytes(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    if !bytes.iter().any(|&b| b == b'%' || b == b'+') {
        return bytes.to_vec();
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => match (hex_value(bytes.get(i + 1)), hex_value(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 2;
                }
                _ => out.push(b'%'),
            },
            other => out.push(other),
        }
        i += 1;
    }
    out
}

fn hex_value(byte: Option<&u8>) -> Option<u8> {
    match *byte? {
        c @ b'0'..=b'9' => Some(c - b'0'),
        c @ b'a'..=b'f' => Some(c - b'a' + 10),
        c @ b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
