use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier attached to layers and overlays
///
/// Ids are either text or numbers and compare loosely: `1` and `"1"` name the same
/// layer. Ids are not required to be unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayerKey {
    Number(f64),
    Text(String),
}

impl LayerKey {
    /// Loose equality between ids of possibly different kinds
    pub fn loosely_equals(&self, other: &LayerKey) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(text), Self::Number(n)) | (Self::Number(n), Self::Text(text)) => {
                text_as_number(text) == Some(*n)
            }
        }
    }
}

// Text to number the way a loosely typed `==` coerces it: empty text is zero,
// `0x`/`0o`/`0b` prefixes select a radix and `Infinity` is the only spelled-out
// number. Anything else must be a plain decimal literal.
fn text_as_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return radix_digits_as_number(&trimmed[2..], radix);
    }

    // Rust's float parser also takes "inf" and "nan"; only exponents are letters here
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn radix_digits_as_number(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

impl PartialEq for LayerKey {
    fn eq(&self, other: &Self) -> bool {
        self.loosely_equals(other)
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<&str> for LayerKey {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for LayerKey {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for LayerKey {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<f64> for LayerKey {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for LayerKey {
    fn from(n: i32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for LayerKey {
    fn from(n: u32) -> Self {
        Self::Number(n as f64)
    }
}

/// Items that carry an optional [`LayerKey`]
pub trait Identified {
    fn id(&self) -> Option<&LayerKey>;
}

/// Compare a stored id with a query; a missing id only matches a missing id
pub fn ids_match(stored: Option<&LayerKey>, query: Option<&LayerKey>) -> bool {
    match (stored, query) {
        (None, None) => true,
        (Some(a), Some(b)) => a.loosely_equals(b),
        _ => false,
    }
}

/// Index of the first item whose id matches, without any fallback
pub fn find_index<T: Identified>(items: &[T], query: Option<&LayerKey>) -> Option<usize> {
    items.iter().position(|item| ids_match(item.id(), query))
}

/// Index of the first matching item, or 0 when nothing matches
///
/// Only an empty list yields `None`. Callers always get some item back, even an
/// unrelated one, when the id is unknown.
pub fn resolve_index<T: Identified>(items: &[T], query: Option<&LayerKey>) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    match find_index(items, query) {
        Some(index) => Some(index),
        None => {
            tracing::debug!(
                "No item with id {}; falling back to the first of {}",
                query.map_or_else(|| "<none>".to_string(), |k| k.to_string()),
                items.len()
            );
            Some(0)
        }
    }
}

/// First matching item, or the first item when nothing matches
pub fn resolve_by_id<'a, T: Identified>(items: &'a [T], query: Option<&LayerKey>) -> Option<&'a T> {
    resolve_index(items, query).map(|index| &items[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(Option<LayerKey>, &'static str);

    impl Identified for Item {
        fn id(&self) -> Option<&LayerKey> {
            self.0.as_ref()
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item(None, "base"),
            Item(Some("roads".into()), "roads"),
            Item(Some(1.into()), "one"),
            Item(Some("roads".into()), "roads-again"),
        ]
    }

    #[test]
    fn test_loose_equality() {
        assert!(LayerKey::from(1).loosely_equals(&LayerKey::from("1")));
        assert!(LayerKey::from(" 1 ").loosely_equals(&LayerKey::from(1.0)));
        assert!(LayerKey::from("").loosely_equals(&LayerKey::from(0)));
        assert!(LayerKey::from("a") == LayerKey::from("a"));
        assert!(!LayerKey::from("a").loosely_equals(&LayerKey::from(0)));
        assert!(!LayerKey::from(f64::NAN).loosely_equals(&LayerKey::from(f64::NAN)));
        assert!(!LayerKey::from("01").loosely_equals(&LayerKey::from("1")));
        assert!(LayerKey::from("01").loosely_equals(&LayerKey::from(1)));
        assert!(LayerKey::from("1e3").loosely_equals(&LayerKey::from(1000)));
        assert!(LayerKey::from(".5").loosely_equals(&LayerKey::from(0.5)));
    }

    #[test]
    fn test_loose_equality_infinity_spelling() {
        let inf = LayerKey::from(f64::INFINITY);
        assert!(LayerKey::from("Infinity").loosely_equals(&inf));
        assert!(LayerKey::from("+Infinity").loosely_equals(&inf));
        assert!(LayerKey::from("-Infinity").loosely_equals(&LayerKey::from(f64::NEG_INFINITY)));
        assert!(!LayerKey::from("inf").loosely_equals(&inf));
        assert!(!LayerKey::from("infinity").loosely_equals(&inf));
        assert!(!LayerKey::from("INF").loosely_equals(&inf));
        assert!(!LayerKey::from("NaN").loosely_equals(&LayerKey::from(f64::NAN)));
    }

    #[test]
    fn test_loose_equality_radix_prefixes() {
        assert!(LayerKey::from("0x10").loosely_equals(&LayerKey::from(16)));
        assert!(LayerKey::from("0XfF").loosely_equals(&LayerKey::from(255)));
        assert!(LayerKey::from("0o7").loosely_equals(&LayerKey::from(7)));
        assert!(LayerKey::from("0b1").loosely_equals(&LayerKey::from(1)));
        assert!(!LayerKey::from("0x").loosely_equals(&LayerKey::from(0)));
        assert!(!LayerKey::from("0b2").loosely_equals(&LayerKey::from(2)));
        assert!(!LayerKey::from("-0x10").loosely_equals(&LayerKey::from(-16)));
    }

    #[test]
    fn test_hex_text_finds_numeric_layer() {
        let items = vec![Item(Some("base".into()), "base"), Item(Some(16.into()), "sixteen")];
        let found = resolve_by_id(&items, Some(&"0x10".into())).unwrap();
        assert_eq!(found.1, "sixteen");
    }

    #[test]
    fn test_first_match_wins() {
        let items = items();
        let found = resolve_by_id(&items, Some(&"roads".into())).unwrap();
        assert_eq!(found.1, "roads");
    }

    #[test]
    fn test_number_matches_text_query() {
        let items = items();
        let found = resolve_by_id(&items, Some(&"1".into())).unwrap();
        assert_eq!(found.1, "one");
    }

    #[test]
    fn test_unknown_id_falls_back_to_first() {
        let items = items();
        let found = resolve_by_id(&items, Some(&"missing".into())).unwrap();
        assert_eq!(found.1, "base");
        assert_eq!(find_index(&items, Some(&"missing".into())), None);
    }

    #[test]
    fn test_missing_id_matches_unnamed_item() {
        let items = vec![Item(Some("a".into()), "a"), Item(None, "unnamed")];
        let found = resolve_by_id(&items, None).unwrap();
        assert_eq!(found.1, "unnamed");
    }

    #[test]
    fn test_empty_list() {
        let items: Vec<Item> = Vec::new();
        assert!(resolve_by_id(&items, Some(&"a".into())).is_none());
    }

    #[test]
    fn test_deserialize_untagged() {
        let keys: Vec<LayerKey> = serde_json::from_str(r#"[1, "pts"]"#).unwrap();
        assert!(matches!(keys[0], LayerKey::Number(n) if n == 1.0));
        assert!(matches!(&keys[1], LayerKey::Text(s) if s == "pts"));
    }
}
