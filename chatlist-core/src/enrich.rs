use indexmap::IndexMap;

use crate::diagnostics::{Diagnostics, Warning};
use crate::enriched::EnrichedMessage;
use crate::fingerprint::Fingerprint;
use crate::id::{MessageId, RowKey};
use crate::index::EnrichedIndex;
use crate::message::ChatMessage;

/// Error type for building an index.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("cannot fingerprint message at position {position}: {reason}")]
    Encode { position: usize, reason: String },
}

/// Builds the enriched index for a newest-first list of messages.
///
/// For the message at `i`, the previous message is `messages[i + 1]` and the
/// next message is `messages[i - 1]`; both ends get the placeholder. Each
/// row's fingerprint covers its own encoded content and the identities of
/// those two neighbors, so a row is invalidated when its content changes or
/// when a different message moves next to it.
///
/// Missing ids and authors are reported to `diagnostics` and do not stop the
/// build. A message that cannot be encoded fails the whole build.
pub fn enrich<M: ChatMessage>(
    messages: &[M],
    diagnostics: &mut impl Diagnostics,
) -> Result<EnrichedIndex<M>, EnrichError> {
    let mut rows: IndexMap<RowKey, EnrichedMessage<M>> = IndexMap::with_capacity(messages.len());
    // Input position of the first occurrence of each row, by row index.
    let mut origins: Vec<usize> = Vec::with_capacity(messages.len());

    for (position, message) in messages.iter().enumerate() {
        let id = message.id();
        if id.is_none_or(MessageId::is_blank) {
            diagnostics.warn(Warning::MissingId { position });
        }
        if message.author().is_none() {
            diagnostics.warn(Warning::MissingAuthor {
                position,
                id: id.cloned(),
            });
        }

        let previous = messages.get(position + 1);
        let next = position.checked_sub(1).and_then(|i| messages.get(i));

        let fingerprint =
            Fingerprint::of(message, neighbor_id(previous), neighbor_id(next)).map_err(|e| {
                EnrichError::Encode {
                    position,
                    reason: e.to_string(),
                }
            })?;

        let key = id.cloned();
        let record = EnrichedMessage::new(message.clone(), previous.cloned(), next.cloned(), fingerprint);

        match rows.get_index_of(&key) {
            Some(row) => {
                diagnostics.warn(Warning::DuplicateId {
                    id: key.clone(),
                    first: origins[row],
                    duplicate: position,
                });
            }
            None => origins.push(position),
        }
        rows.insert(key, record);
    }

    log::debug!("enriched {} messages into {} rows", messages.len(), rows.len());
    Ok(EnrichedIndex::from_rows(rows))
}

fn neighbor_id<M: ChatMessage>(neighbor: Option<&M>) -> Option<&MessageId> {
    neighbor.and_then(ChatMessage::id)
}
