use std::collections::HashMap;

use crate::http::parser::ParseError;

const CRLF: &[u8] = b"\r\n";

/// Case-insensitive header store.
///
/// Names are lower-cased before they are stored, so `Host`, `host` and
/// `HOST` all address the same entry. Repeated names are merged into a
/// single comma-separated value in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTable {
    entries: HashMap<String, String>,
}

impl HeaderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `name`, or an empty string when absent.
    pub fn get(&self, name: &str) -> &str {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    /// Adds a header, merging with any existing value as `previous, new`.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        self.entries
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    /// Adds a header, overwriting any existing value.
    pub fn replace(&mut self, name: &str, value: impl Into<String>) {
        self.entries.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses at most one header line from the front of `data`.
    ///
    /// Returns the number of bytes consumed and whether the blank line that
    /// ends the header section was reached. `(0, false)` means no complete
    /// line is buffered yet. A rejected line leaves the table untouched.
    pub fn parse_one(&mut self, data: &[u8]) -> Result<(usize, bool), ParseError> {
        let Some(idx) = find_crlf(data) else {
            return Ok((0, false));
        };

        if idx == 0 {
            return Ok((CRLF.len(), true));
        }

        let line = &data[..idx];
        let invalid = || ParseError::InvalidHeaderLine(String::from_utf8_lossy(line).into_owned());

        let colon = line.iter().position(|&b| b == b':').ok_or_else(invalid)?;
        let (raw_name, raw_value) = (&line[..colon], &line[colon + 1..]);
        if raw_name.is_empty() || raw_value.is_empty() {
            return Err(invalid());
        }

        // Leading spaces are tolerated before the name, trailing ones are not.
        let name = trim_leading_spaces(raw_name);
        if !is_valid_name(name) {
            return Err(invalid());
        }

        // Names are ASCII by now.
        let name = std::str::from_utf8(name).map_err(|_| invalid())?;
        let value = String::from_utf8_lossy(raw_value);

        self.set(name, value.trim());

        Ok((idx + CRLF.len(), false))
    }
}

pub(crate) fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(CRLF.len()).position(|w| w == CRLF)
}

fn trim_leading_spaces(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != b' ').unwrap_or(bytes.len());
    &bytes[start..]
}

fn is_valid_name(name: &[u8]) -> bool {
    !name.is_empty() && name.iter().all(|&b| is_name_byte(b))
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'@' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'~'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_grammar() {
        assert!(is_valid_name(b"X-Request-Id"));
        assert!(is_valid_name(b"weird!@#$%&'*+-~"));
        assert!(!is_valid_name(b""));
        assert!(!is_valid_name(b"Host "));
        assert!(!is_valid_name(b"Content_Type"));
        assert!(!is_valid_name("H\u{00a9}st".as_bytes()));
    }

    #[test]
    fn find_crlf_positions() {
        assert_eq!(find_crlf(b"\r\n"), Some(0));
        assert_eq!(find_crlf(b"abc\r\ndef"), Some(3));
        assert_eq!(find_crlf(b"abc\r"), None);
        assert_eq!(find_crlf(b""), None);
    }
}
