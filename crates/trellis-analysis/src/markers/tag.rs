//! Struct-tag lookup.
//!
//! A struct tag is a space-separated list of `key:"value"` pairs with
//! double-quoted, backslash-escaped values. Malformed input stops the scan,
//! and everything before the malformed pair is still searchable.

/// Look up `key` in a raw struct tag.
pub fn lookup<'t>(tag: &'t str, key: &str) -> Option<String> {
    let mut rest: &'t str = tag;
    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return None;
        }

        let bytes = rest.as_bytes();
        let mut i = 0;
        while i < bytes.len()
            && bytes[i] > b' '
            && bytes[i] != b':'
            && bytes[i] != b'"'
            && bytes[i] != 0x7f
        {
            i += 1;
        }
        if i == 0 || i + 1 >= bytes.len() || bytes[i] != b':' || bytes[i + 1] != b'"' {
            return None;
        }
        let name = &rest[..i];
        rest = &rest[i + 1..];

        let bytes = rest.as_bytes();
        let mut j = 1;
        while j < bytes.len() && bytes[j] != b'"' {
            if bytes[j] == b'\\' {
                j += 1;
            }
            j += 1;
        }
        if j >= bytes.len() {
            return None;
        }
        let quoted = &rest[1..j];
        rest = &rest[j + 1..];

        if name == key {
            return Some(unescape(quoted));
        }
    }
}

/// Whether `raw` uses struct-tag syntax at all.
pub fn is_struct_tag(raw: &str) -> bool {
    raw.contains(":\"")
}

/// The directive list for `key` carried by a marker field tag.
///
/// A tag in struct-tag form yields the value under `key` (empty when the key
/// is absent). Any other non-empty tag is taken as the directive list itself.
pub fn directives(raw: &str, key: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if is_struct_tag(raw) {
        lookup(raw, key).unwrap_or_default()
    } else {
        raw.to_string()
    }
}

fn unescape(quoted: &str) -> String {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
