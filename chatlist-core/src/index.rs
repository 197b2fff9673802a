use indexmap::IndexMap;

use crate::diff::Snapshot;
use crate::enriched::EnrichedMessage;
use crate::id::RowKey;

/// The enriched rows of one update, in list order.
///
/// Keys are unique. A key that appeared more than once in the input sits at
/// the position of its first occurrence and holds the record built from its
/// last one.
#[derive(Debug, Clone)]
pub struct EnrichedIndex<M> {
    rows: IndexMap<RowKey, EnrichedMessage<M>>,
}

impl<M> EnrichedIndex<M> {
    pub(crate) fn from_rows(rows: IndexMap<RowKey, EnrichedMessage<M>>) -> Self {
        EnrichedIndex { rows }
    }

    /// Row keys in list order.
    pub fn keys(&self) -> impl Iterator<Item = &RowKey> {
        self.rows.keys()
    }

    pub fn get(&self, key: &RowKey) -> Option<&EnrichedMessage<M>> {
        self.rows.get(key)
    }

    /// Rows in list order.
    pub fn iter(&self) -> impl Iterator<Item = (&RowKey, &EnrichedMessage<M>)> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, key: &RowKey) -> bool {
        self.rows.contains_key(key)
    }

    /// The fingerprints of every row, as a renderer would keep them for the
    /// next reconciliation.
    pub fn fingerprints(&self) -> Snapshot {
        Snapshot::from_rows(
            self.rows
                .iter()
                .map(|(key, row)| (key.clone(), row.fingerprint())),
        )
    }

    /// Splits into the ordered keys and the key to record map.
    pub fn into_parts(self) -> (Vec<RowKey>, IndexMap<RowKey, EnrichedMessage<M>>) {
        let keys = self.rows.keys().cloned().collect();
        (keys, self.rows)
    }
}

impl<M> Default for EnrichedIndex<M> {
    fn default() -> Self {
        EnrichedIndex {
            rows: IndexMap::new(),
        }
    }
}
