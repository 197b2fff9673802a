use crate::fingerprint::Fingerprint;
use crate::id::{MessageId, RowKey};
use crate::message::{ChatMessage, User};
use crate::render::Position;

/// A message together with the context its row is drawn with.
///
/// Everything is owned: the source message and both neighbors are cloned at
/// build time, so the record never observes later changes to the input.
///
/// The neighbor naming follows the list's newest-first order: the previous
/// message is the one *after* this one in the input, the next message the
/// one *before* it. `None` is the placeholder at either end of the list.
#[derive(Debug, Clone)]
pub struct EnrichedMessage<M> {
    message: M,
    previous: Option<M>,
    next: Option<M>,
    author: User,
    fingerprint: Fingerprint,
}

impl<M: ChatMessage> EnrichedMessage<M> {
    pub(crate) fn new(
        message: M,
        previous: Option<M>,
        next: Option<M>,
        fingerprint: Fingerprint,
    ) -> Self {
        let author = message.author().cloned().unwrap_or_default();
        EnrichedMessage {
            message,
            previous,
            next,
            author,
            fingerprint,
        }
    }

    pub fn id(&self) -> Option<&MessageId> {
        self.message.id()
    }

    /// The key this record is stored under in an index.
    pub fn key(&self) -> RowKey {
        self.message.id().cloned()
    }

    /// The author, or the empty placeholder if the message had none.
    pub fn author(&self) -> &User {
        &self.author
    }

    /// Which side of the list this row is drawn on for the given viewer.
    pub fn position(&self, viewer: &User) -> Position {
        Position::of(&self.author, viewer)
    }
}

impl<M> EnrichedMessage<M> {
    pub fn message(&self) -> &M {
        &self.message
    }

    pub fn previous_message(&self) -> Option<&M> {
        self.previous.as_ref()
    }

    pub fn next_message(&self) -> Option<&M> {
        self.next.as_ref()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    pub fn into_message(self) -> M {
        self.message
    }
}
