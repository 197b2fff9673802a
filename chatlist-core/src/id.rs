use serde::{Deserialize, Serialize};
use std::fmt;

/// The stable identity of a chat message.
///
/// Providers hand out either string or integer ids; both serialize as the bare
/// value (no enum tag), so a message keeps the same canonical bytes whichever
/// variant is used to construct it in Rust.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    Int(i64),
    Str(String),
}

/// Key of a row in the rendered list.
///
/// Messages without an identity are still rendered; they all share the `None`
/// key, so later ones overwrite earlier ones.
pub type RowKey = Option<MessageId>;

impl MessageId {
    const TAG_NONE: u8 = 0;
    const TAG_INT: u8 = 1;
    const TAG_STR: u8 = 2;

    /// Whether this is the empty string id, which counts as missing for
    /// diagnostics. The integer `0` is a real id.
    pub fn is_blank(&self) -> bool {
        matches!(self, MessageId::Str(s) if s.is_empty())
    }

    /// Feeds an unambiguous encoding of an optional identity into a hasher.
    ///
    /// Each identity is framed with a type tag and a length prefix, so
    /// adjacent identities can never run together.
    pub(crate) fn hash_into(id: Option<&MessageId>, hasher: &mut blake3::Hasher) {
        match id {
            None => {
                hasher.update(&[Self::TAG_NONE]);
                hasher.update(&0u64.to_le_bytes());
            }
            Some(MessageId::Int(n)) => {
                let bytes = n.to_le_bytes();
                hasher.update(&[Self::TAG_INT]);
                hasher.update(&(bytes.len() as u64).to_le_bytes());
                hasher.update(&bytes);
            }
            Some(MessageId::Str(s)) => {
                hasher.update(&[Self::TAG_STR]);
                hasher.update(&(s.len() as u64).to_le_bytes());
                hasher.update(s.as_bytes());
            }
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Int(n) => write!(f, "{}", n),
            MessageId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MessageId {
    fn from(n: i64) -> Self {
        MessageId::Int(n)
    }
}

impl From<i32> for MessageId {
    fn from(n: i32) -> Self {
        MessageId::Int(i64::from(n))
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        MessageId::Str(s.to_string())
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        MessageId::Str(s)
    }
}
