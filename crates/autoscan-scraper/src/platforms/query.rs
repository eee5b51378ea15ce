use autoscan_core::Locator;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Accumulates `key=value` pairs onto a base URL that may already carry a
/// query string.
pub(crate) struct QueryBuilder {
    base: String,
    pairs: Vec<String>,
}

impl QueryBuilder {
    pub(crate) fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            pairs: Vec::new(),
        }
    }

    /// Appends `key=value` with `value` percent-encoded.
    pub(crate) fn param(mut self, key: &str, value: &str) -> Self {
        self.pairs.push(format!("{key}={}", encode(value)));
        self
    }

    /// Appends `key=value` only when `value` is present.
    pub(crate) fn opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Appends `key=value` verbatim. `value` must already be encoded.
    pub(crate) fn raw(mut self, key: &str, value: &str) -> Self {
        self.pairs.push(format!("{key}={value}"));
        self
    }

    pub(crate) fn flag(self, enabled: bool, key: &str, value: &str) -> Self {
        if enabled {
            self.raw(key, value)
        } else {
            self
        }
    }

    pub(crate) fn build(self) -> Locator {
        if self.pairs.is_empty() {
            return Locator::new(self.base);
        }
        let sep = if self.base.contains('?') { '&' } else { '?' };
        Locator::new(format!("{}{sep}{}", self.base, self.pairs.join("&")))
    }
}
