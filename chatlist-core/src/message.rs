use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::id::MessageId;

/// The author of a message, or the viewer of the list.
///
/// `User::default()` is the empty placeholder substituted for messages that
/// arrive without an author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MessageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    pub fn new(id: impl Into<MessageId>) -> Self {
        User {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// A message that can be placed in the list.
///
/// Apart from identity and author, the message is opaque: its whole serialized
/// form feeds the row fingerprint, so every serialized field counts as
/// visible content.
pub trait ChatMessage: Serialize + Clone {
    /// The stable identity, or `None` if the provider left it out.
    fn id(&self) -> Option<&MessageId>;

    /// The author, or `None` if the provider left it out.
    fn author(&self) -> Option<&User>;
}

/// A schemaless chat message.
///
/// Known fields are typed; anything else lands in `extra`. Extra fields are
/// serialized in insertion order, so two messages that only differ in the
/// order their extra fields were added produce different fingerprints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MessageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(flatten)]
    pub extra: IndexMap<String, ciborium::Value>,
}

impl RawMessage {
    pub fn new(id: impl Into<MessageId>) -> Self {
        RawMessage {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// A message with no identity at all.
    pub fn anonymous() -> Self {
        RawMessage::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn created_at(mut self, millis: i64) -> Self {
        self.created_at = Some(millis);
        self
    }

    pub fn user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Sets an arbitrary extra field, replacing any previous value in place.
    ///
    /// The names of the typed fields (`_id`, `text`, `createdAt`, `user`)
    /// set those fields instead, so a name never appears twice in the encoded
    /// message. A value of the wrong type for a typed field is logged and
    /// ignored.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<ciborium::Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match name.as_str() {
            "_id" => assign(&name, &value, &mut self.id),
            "text" => assign(&name, &value, &mut self.text),
            "createdAt" => assign(&name, &value, &mut self.created_at),
            "user" => assign(&name, &value, &mut self.user),
            _ => {
                self.extra.insert(name, value);
            }
        }
        self
    }
}

fn assign<T: DeserializeOwned>(name: &str, value: &ciborium::Value, slot: &mut T) {
    match value.deserialized() {
        Ok(parsed) => *slot = parsed,
        Err(e) => log::warn!("chatlist: ignoring field `{name}`: {e}"),
    }
}

impl ChatMessage for RawMessage {
    fn id(&self) -> Option<&MessageId> {
        self.id.as_ref()
    }

    fn author(&self) -> Option<&User> {
        self.user.as_ref()
    }
}
