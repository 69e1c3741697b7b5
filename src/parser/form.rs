//! Form URL-decoding shared by query strings and form-encoded bodies.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered mapping from parameter name to every value seen for it.
///
/// Keys keep the order in which they were first encountered and repeated keys
/// accumulate their values in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Vec<String>)>,
    // Position of each key in `entries`.
    index: HashMap<String, usize>,
}

impl Params {
    /// Create an empty parameter mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `key`, creating the key if it is new.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1.push(value),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![value]));
            }
        }
    }

    /// All values for `name`, in encounter order. Empty when the key is absent.
    pub fn get(&self, name: &str) -> &[String] {
        self.index
            .get(name)
            .map(|&position| self.entries[position].1.as_slice())
            .unwrap_or_default()
    }

    /// The first value for `name`, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).first().map(String::as_str)
    }

    /// Check if `name` appeared at least once.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no parameter was decoded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, values)` in key encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

/// Decode an `application/x-www-form-urlencoded` string.
///
/// Pairs are separated by `&`; empty pairs are skipped and a pair without `=`
/// gets an empty value. `+` decodes to a space and `%XX` to the matching byte.
///
/// # Examples
///
/// ```
/// use rawhttp::decode_form_encoded;
///
/// let params = decode_form_encoded("key1=value1&key1=value2&name=J%C3%BCrgen+M");
/// assert_eq!(params.get("key1"), ["value1", "value2"]);
/// assert_eq!(params.first("name"), Some("Jürgen M"));
/// assert!(params.get("missing").is_empty());
/// ```
pub fn decode_form_encoded(input: &str) -> Params {
    let mut params = Params::new();
    for pair in input.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.append(decode_component(key), decode_component(value));
    }
    params
}

// `+` must become a space before percent-decoding so that `%2B` survives as `+`.
fn decode_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}
