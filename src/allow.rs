use std::collections::HashSet;
use std::fmt;

/// The set of token values that let a request through.
///
/// Allowed tokens are credentials, so formatted output never shows them.
/// `Debug` reports only how many values the set holds.
///
/// # Examples
///
/// ```
/// use query_token_gate::AllowSet;
///
/// let set: AllowSet = ["good", "another", "good"].into_iter().collect();
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("good"));
/// assert!(!set.contains("Good"));
/// assert_eq!(format!("{:?}", set), "AllowSet { len: 2 }");
/// ```
// Do NOT derive Debug or implement Display over the values; tokens would end
// up in logs via `GateConfig`'s Debug output (CWE-532).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AllowSet {
    values: HashSet<String>,
}

impl AllowSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value. Returns `false` if it was already present.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        self.values.insert(value.into())
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    /// Exact membership test on raw decoded bytes.
    ///
    /// Bytes that are not valid UTF-8 never match, since every allowed
    /// value is a `String`.
    pub fn contains_bytes(&self, value: &[u8]) -> bool {
        std::str::from_utf8(value).map_or(false, |s| self.values.contains(s))
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AllowSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Debug for AllowSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllowSet")
            .field("len", &self.values.len())
            .finish()
    }
}
