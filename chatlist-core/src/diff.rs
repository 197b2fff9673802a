//! Row-level change detection.
//!
//! The fingerprint is the only equality signal. Records are never compared
//! field by field, and fingerprints are only compared between the old and
//! new record of the same row key.

use indexmap::IndexMap;

use crate::enriched::EnrichedMessage;
use crate::fingerprint::Fingerprint;
use crate::id::RowKey;
use crate::index::EnrichedIndex;

/// Returns true if a row must be drawn again.
///
/// `old` and `new` must be the records of the same row in two consecutive
/// builds.
pub fn changed<M>(old: &EnrichedMessage<M>, new: &EnrichedMessage<M>) -> bool {
    old.fingerprint() != new.fingerprint()
}

/// Fingerprints of the rows a renderer last drew, keyed by row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    rows: IndexMap<RowKey, Fingerprint>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_rows(rows: impl IntoIterator<Item = (RowKey, Fingerprint)>) -> Self {
        Snapshot {
            rows: rows.into_iter().collect(),
        }
    }

    pub fn get(&self, key: &RowKey) -> Option<Fingerprint> {
        self.rows.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a row with the given fingerprint differs from what was drawn.
    ///
    /// A row that was never drawn counts as changed.
    pub fn row_changed(&self, key: &RowKey, fingerprint: Fingerprint) -> bool {
        self.get(key) != Some(fingerprint)
    }
}

/// How a row relates to the previous render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    /// The key was not in the previous render.
    Inserted,
    /// The key was rendered before with a different fingerprint.
    Updated,
    /// Same fingerprint as last time; the row can be reused.
    Unchanged,
}

impl RowChange {
    pub fn needs_render(self) -> bool {
        !matches!(self, RowChange::Unchanged)
    }
}

/// The outcome of comparing a new index against a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    rows: IndexMap<RowKey, RowChange>,
    removed: Vec<RowKey>,
}

impl Reconciliation {
    /// Every row of the new index, in list order.
    pub fn rows(&self) -> impl Iterator<Item = (&RowKey, RowChange)> {
        self.rows.iter().map(|(key, change)| (key, *change))
    }

    /// Keys that were rendered before but are gone now.
    pub fn removed(&self) -> &[RowKey] {
        &self.removed
    }

    pub fn change(&self, key: &RowKey) -> Option<RowChange> {
        self.rows.get(key).copied()
    }

    /// Keys that must be drawn (inserted or updated), in list order.
    pub fn dirty(&self) -> impl Iterator<Item = &RowKey> {
        self.rows
            .iter()
            .filter(|(_, change)| change.needs_render())
            .map(|(key, _)| key)
    }

    /// True if nothing needs to be drawn or removed.
    pub fn is_clean(&self) -> bool {
        self.removed.is_empty() && self.rows.values().all(|c| !c.needs_render())
    }
}

/// Compares a freshly built index with the fingerprints of the last render.
pub fn reconcile<M>(previous: &Snapshot, next: &EnrichedIndex<M>) -> Reconciliation {
    let rows = next
        .iter()
        .map(|(key, row)| {
            let change = match previous.get(key) {
                None => RowChange::Inserted,
                Some(fp) if fp != row.fingerprint() => RowChange::Updated,
                Some(_) => RowChange::Unchanged,
            };
            (key.clone(), change)
        })
        .collect();

    let removed = previous
        .rows
        .keys()
        .filter(|key| !next.contains(key))
        .cloned()
        .collect();

    Reconciliation { rows, removed }
}
