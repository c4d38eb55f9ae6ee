//! Query string model.
//!
//! DESIGN
//! ======
//! `QueryParams` mirrors the subset of `URLSearchParams` the binding needs:
//! ordered pairs, form-urlencoded on the way in and out. Keeping it as plain
//! Rust data lets the synchronizer run identically in the browser and in tests.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::fmt;

/// Ordered list of decoded `key=value` pairs from a URL search string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a search string. A single leading `?` is ignored.
    #[must_use]
    pub fn parse(search: &str) -> Self {
        let raw = search.strip_prefix('?').unwrap_or(search);
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set `name` to `value`.
    ///
    /// The first existing pair keeps its position and any later duplicates are
    /// dropped. Appends when the name is not present.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let Some(first) = self.pairs.iter().position(|(k, _)| k == name) else {
            self.pairs.push((name.to_owned(), value));
            return;
        };
        self.pairs[first].1 = value;
        let mut index = 0;
        self.pairs.retain(|(k, _)| {
            let keep = index <= first || k != name;
            index += 1;
            keep
        });
    }

    /// Remove every pair named `name`.
    pub fn delete(&mut self, name: &str) {
        self.pairs.retain(|(k, _)| k != name);
    }

    /// Whether any pair is named `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == name)
    }

    /// No pairs at all; serializes to an empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Decoded pairs in URL order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for QueryParams {
    /// Form-urlencoded serialization without a leading `?`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        f.write_str(&encoded)
    }
}

/// Join a path and a serialized query, leaving out `?` when the query is empty.
#[must_use]
pub fn build_url(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?{query}")
    }
}
