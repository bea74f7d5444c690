//! URL query parameters with merge-preserving writes
//!
//! Pairs are kept as the raw text they arrived in. Only the pair being
//! written is re-encoded, so every other parameter serializes back exactly
//! as it was read.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RawPair {
    /// Segment text between `&` separators, untouched
    raw: String,
    /// Decoded key, used for lookups
    key: String,
}

impl RawPair {
    fn parse(raw: &str) -> Self {
        let key_part = raw.split_once('=').map_or(raw, |(key, _)| key);
        Self {
            raw: raw.to_string(),
            key: decode_component(key_part),
        }
    }

    fn encoded(key: &str, value: &str) -> Self {
        Self {
            raw: format!("{}={}", encode_component(key), encode_component(value)),
            key: key.to_string(),
        }
    }

    fn value(&self) -> String {
        self.raw
            .split_once('=')
            .map(|(_, value)| decode_component(value))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<RawPair>,
}

impl QueryParams {
    /// Parse a query string, with or without the leading `?`
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        if query.is_empty() {
            return Self::default();
        }
        Self {
            pairs: query.split('&').map(RawPair::parse).collect(),
        }
    }

    /// Decoded value of the first `name` parameter
    pub fn get(&self, name: &str) -> Option<String> {
        self.pairs.iter().find(|p| p.key == name).map(RawPair::value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|p| p.key == name)
    }

    /// Copy of this query with `name` set to `value`.
    ///
    /// The first `name` pair is replaced in place (or a pair appended), later
    /// duplicates of `name` are dropped, all other pairs are kept verbatim.
    #[must_use]
    pub fn with(&self, name: &str, value: &str) -> Self {
        let mut pairs = Vec::with_capacity(self.pairs.len() + 1);
        let mut written = false;
        for pair in &self.pairs {
            if pair.key == name {
                if !written {
                    pairs.push(RawPair::encoded(name, value));
                    written = true;
                }
            } else {
                pairs.push(pair.clone());
            }
        }
        if !written {
            pairs.push(RawPair::encoded(name, value));
        }
        Self { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Decoded `(key, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.pairs.iter().map(|p| (p.key.clone(), p.value()))
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            f.write_str(&pair.raw)?;
        }
        Ok(())
    }
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// `application/x-www-form-urlencoded` decoding; malformed escapes pass through
fn decode_component(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(high), Some(low)) => {
                        out.push(high << 4 | low);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'*' => {
                out.push(byte as char);
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
