use crate::id::{MessageId, RowKey};

/// Malformed input noticed while building an index.
///
/// None of these stop the build: the message is still enriched and rendered,
/// possibly degraded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
    #[error("message at position {position} has no `_id`")]
    MissingId { position: usize },
    #[error("message at position {position} has no `user`{}", fmt_id(.id))]
    MissingAuthor {
        position: usize,
        id: Option<MessageId>,
    },
    #[error("duplicate row key {} at position {duplicate} replaces position {first}", fmt_key(.id))]
    DuplicateId {
        id: RowKey,
        first: usize,
        duplicate: usize,
    },
}

fn fmt_id(id: &Option<MessageId>) -> String {
    id.as_ref().map(|id| format!(" (id {})", id)).unwrap_or_default()
}

fn fmt_key(key: &RowKey) -> String {
    key.as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "<missing>".to_string())
}

/// Receives warnings about malformed input.
///
/// Injected into the enricher instead of writing to a global stream.
pub trait Diagnostics {
    fn warn(&mut self, warning: Warning);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&mut self, warning: Warning) {
        log::warn!("chatlist: {warning}");
    }
}

/// Drops all warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreDiagnostics;

impl Diagnostics for IgnoreDiagnostics {
    fn warn(&mut self, _warning: Warning) {}
}

/// Collects warnings in order.
impl Diagnostics for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn warn(&mut self, warning: Warning) {
        (**self).warn(warning);
    }
}
