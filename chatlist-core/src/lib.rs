//! Change detection for inverted, virtualized chat message lists.
//!
//! Core concepts:
//! - **ChatMessage**: a message exposing its identity and author; otherwise opaque
//! - **Fingerprint**: a Blake3 digest of a message's content and its neighbors' ids
//! - **EnrichedMessage**: a message with owned copies of its neighbors and its fingerprint
//! - **EnrichedIndex**: all enriched rows of one update, keyed by identity, in list order
//! - **MessageContainer**: runs update cycles and hands complete indexes to a renderer
//!
//! A renderer redraws a row only when its fingerprint differs from the one
//! it drew last time for the same key.
//!
//! # Example
//!
//! ```
//! use chatlist_core::{changed, enrich, IgnoreDiagnostics, MessageId, RawMessage, User};
//!
//! let me = User::new("me");
//! let before = vec![
//!     RawMessage::new(2).text("yo").user(me.clone()),
//!     RawMessage::new(1).text("hi").user(me.clone()),
//! ];
//! let after = vec![
//!     RawMessage::new(2).text("yo!").user(me.clone()),
//!     RawMessage::new(1).text("hi").user(me),
//! ];
//!
//! let old = enrich(&before, &mut IgnoreDiagnostics).unwrap();
//! let new = enrich(&after, &mut IgnoreDiagnostics).unwrap();
//!
//! let two = Some(MessageId::Int(2));
//! let one = Some(MessageId::Int(1));
//! assert!(changed(old.get(&two).unwrap(), new.get(&two).unwrap()));
//! assert!(!changed(old.get(&one).unwrap(), new.get(&one).unwrap()));
//! ```
//!
//! # Canonicalization Note
//!
//! Messages are fingerprinted from their CBOR encoding, which follows field
//! declaration order and, for maps, iteration order. Use ordered maps
//! (e.g. IndexMap) built in a consistent order, or sort keys, for content
//! that must fingerprint identically across updates.

mod config;
mod controller;
pub mod diff;
mod diagnostics;
mod enrich;
mod enriched;
mod fingerprint;
mod id;
mod index;
mod message;
mod render;

pub use config::{ConfigError, ListConfig};
pub use controller::MessageContainer;
pub use diagnostics::{Diagnostics, IgnoreDiagnostics, LogDiagnostics, Warning};
pub use diff::{changed, reconcile, Reconciliation, RowChange, Snapshot};
pub use enrich::{enrich, EnrichError};
pub use enriched::EnrichedMessage;
pub use fingerprint::{EncodeError, Fingerprint};
pub use id::{MessageId, RowKey};
pub use index::EnrichedIndex;
pub use message::{ChatMessage, RawMessage, User};
pub use render::{ListRenderer, Position, RowProps, ScrollTarget, VirtualList};

#[cfg(feature = "derive")]
pub use chatlist_derive::{chat_message, ChatMessage};
