// src/catalog/key.rs  —  Derive stable keys from source-locale text
use crate::catalog::Catalog;
use crate::config::KeyStyle;

/// Key used when the source text contains no ASCII alphanumerics at all
/// (symbol-only strings like "∞" still need a non-empty key).
pub const FALLBACK_KEY: &str = "unnamed";

impl KeyStyle {
    fn ceiling(self) -> usize {
        match self {
            KeyStyle::Compact  => 50,
            KeyStyle::Extended => 80,
        }
    }
    fn max_words(self) -> usize {
        match self {
            KeyStyle::Compact  => 5,
            KeyStyle::Extended => 3,
        }
    }
}

/// Derive an identifier-safe key from free text.  Pure: same input, same key.
///
/// Characters outside `[A-Za-z0-9 ]` are stripped, the rest lowercased, and
/// whitespace runs collapse into single underscores.  Over-long results are
/// rebuilt from the leading words rather than cut mid-word.  Output always
/// matches `^[a-z0-9_]+$`.
pub fn generate_key(text: &str, style: KeyStyle) -> String {
    let mut key = sanitize(text);
    if key.len() > style.ceiling() {
        let words: Vec<&str> = key.split('_').collect();
        let n = style.max_words().min(words.len());
        key = words[..n].join("_");
    }
    if key.is_empty() {
        FALLBACK_KEY.to_string()
    } else {
        key
    }
}

/// Strip to lowercase ASCII alphanumerics with `_` between former words.
fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut gap = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() {
            gap = true;
        }
        // punctuation and non-ASCII: dropped, no word break
    }
    out
}

/// Resolve a collision against the catalog by appending `_1`, `_2`, … until
/// the key is free.  Returns `base` unchanged when it is already unused.
pub fn unique_key(catalog: &Catalog, base: &str) -> String {
    if !catalog.strings.contains_key(base) {
        return base.to_string();
    }
    let mut n = 1usize;
    loop {
        let candidate = format!("{base}_{n}");
        if !catalog.strings.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
