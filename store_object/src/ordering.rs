//! Sort orders
//!
//! A [`Sort`] is an ordered list of (key, direction) pairs. The key type is chosen by the
//! DAO; this crate only carries the sort through to it.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    /// Apply this direction to an ascending comparison result
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// One (key, direction) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField<K> {
    pub key: K,
    pub order: SortOrder,
}

/// Ordered list of sort fields, most significant first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort<K> {
    fields: Vec<SortField<K>>,
}

impl<K> Sort<K> {
    /// No ordering requested; the backend's natural order applies
    pub fn unsorted() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn by(key: K, order: SortOrder) -> Self {
        Self::unsorted().then(key, order)
    }

    pub fn asc(key: K) -> Self {
        Self::by(key, SortOrder::Asc)
    }

    pub fn desc(key: K) -> Self {
        Self::by(key, SortOrder::Desc)
    }

    /// Append a less significant field
    pub fn then(mut self, key: K, order: SortOrder) -> Self {
        self.fields.push(SortField { key, order });
        self
    }

    pub fn fields(&self) -> &[SortField<K>] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SortField<K>> {
        self.fields.iter()
    }
}

impl<K> Default for Sort<K> {
    fn default() -> Self {
        Self::unsorted()
    }
}

impl<K> From<Vec<(K, SortOrder)>> for Sort<K> {
    fn from(pairs: Vec<(K, SortOrder)>) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(key, order)| SortField { key, order })
                .collect(),
        }
    }
}

impl<'a, K> IntoIterator for &'a Sort<K> {
    type Item = &'a SortField<K>;
    type IntoIter = std::slice::Iter<'a, SortField<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
