use serde::Serialize;
use std::fmt;

use crate::id::MessageId;

/// Error raised when a message cannot be encoded for fingerprinting.
pub type EncodeError = ciborium::ser::Error<std::io::Error>;

/// A 32-byte Blake3 digest summarizing what a row displays.
///
/// Covers the message's own serialized content plus the identities of its
/// two neighbors. Equal fingerprints for the same row key mean the row does
/// not need to be drawn again. Fingerprints of different keys are never
/// compared.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprints a message placed between two neighbors.
    ///
    /// The message is encoded as CBOR; only the identities of the neighbors
    /// are mixed in, not their content. `None` stands for the placeholder
    /// neighbor at either end of the list (or a neighbor without identity).
    pub fn of<M: Serialize + ?Sized>(
        message: &M,
        previous: Option<&MessageId>,
        next: Option<&MessageId>,
    ) -> Result<Self, EncodeError> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(message, &mut bytes)?;

        let mut hasher = blake3::Hasher::new();
        hasher.update(&(bytes.len() as u64).to_le_bytes());
        hasher.update(&bytes);
        MessageId::hash_into(previous, &mut hasher);
        MessageId::hash_into(next, &mut hasher);
        Ok(Fingerprint(*hasher.finalize().as_bytes()))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
