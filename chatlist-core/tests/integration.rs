//! Integration tests: full update cycles, fingerprint properties and the derive macros.

use chatlist_core::{
    changed, chat_message, enrich, ChatMessage, EnrichError, EnrichedIndex, IgnoreDiagnostics,
    ListConfig, ListRenderer, MessageContainer, MessageId, Position, RawMessage, RowChange,
    RowKey, RowProps, User, VirtualList, Warning,
};
use serde::{Serialize, Serializer};

fn msg(id: i64, text: &str) -> RawMessage {
    RawMessage::new(id).text(text).user(User::new("bob"))
}

fn key(id: i64) -> RowKey {
    Some(MessageId::Int(id))
}

fn build(messages: &[RawMessage]) -> EnrichedIndex<RawMessage> {
    enrich(messages, &mut IgnoreDiagnostics).unwrap()
}

fn fingerprints(index: &EnrichedIndex<RawMessage>) -> Vec<(RowKey, String)> {
    index
        .iter()
        .map(|(k, row)| (k.clone(), row.fingerprint().to_string()))
        .collect()
}

#[test]
fn same_input_same_fingerprints() {
    let messages = vec![msg(3, "c"), msg(2, "b"), msg(1, "a")];
    assert_eq!(fingerprints(&build(&messages)), fingerprints(&build(&messages)));
}

#[test]
fn two_message_scenario() {
    let before = vec![msg(1, "hi"), msg(2, "yo")];
    let old = build(&before);

    let keys: Vec<_> = old.keys().cloned().collect();
    assert_eq!(keys, vec![key(1), key(2)]);

    let one = old.get(&key(1)).unwrap();
    assert_eq!(one.previous_message(), Some(&before[1]));
    assert!(one.next_message().is_none());

    let two = old.get(&key(2)).unwrap();
    assert!(two.previous_message().is_none());
    assert_eq!(two.next_message(), Some(&before[0]));

    // Only the edited message's fingerprint moves: 1 hashes 2's identity,
    // not its content.
    let new = build(&[msg(1, "hi"), msg(2, "yo!")]);
    assert!(changed(two, new.get(&key(2)).unwrap()));
    assert!(!changed(one, new.get(&key(1)).unwrap()));
}

#[test]
fn edits_reach_only_adjacent_ids() {
    // [a, b, c, d]: editing d's content changes only d.
    let base = vec![msg(1, "a"), msg(2, "b"), msg(3, "c"), msg(4, "d")];
    let mut edited = base.clone();
    edited[3] = msg(4, "d, edited");

    let old = build(&base);
    let new = build(&edited);
    for id in 1..=3 {
        assert!(!changed(old.get(&key(id)).unwrap(), new.get(&key(id)).unwrap()), "row {id}");
    }
    assert!(changed(old.get(&key(4)).unwrap(), new.get(&key(4)).unwrap()));
}

#[test]
fn replacing_a_neighbor_invalidates_adjacent_rows() {
    // Swapping which message sits at index 3 changes c's previous neighbor.
    let old = build(&[msg(1, "a"), msg(2, "b"), msg(3, "c"), msg(4, "d")]);
    let new = build(&[msg(1, "a"), msg(2, "b"), msg(3, "c"), msg(5, "e")]);

    assert!(!changed(old.get(&key(1)).unwrap(), new.get(&key(1)).unwrap()));
    assert!(!changed(old.get(&key(2)).unwrap(), new.get(&key(2)).unwrap()));
    assert!(changed(old.get(&key(3)).unwrap(), new.get(&key(3)).unwrap()));
}

#[test]
fn any_field_change_is_detected() {
    let base = msg(1, "a");
    let variants = vec![
        base.clone().text("b"),
        base.clone().created_at(1),
        base.clone().user(User::new("alice")),
        base.clone().user(User::new("bob").with_avatar("bob.png")),
        base.clone().field("image", "cat.png"),
        base.clone().field("system", true),
    ];

    let original = build(std::slice::from_ref(&base));
    for variant in variants {
        let new = build(std::slice::from_ref(&variant));
        assert!(
            changed(original.get(&key(1)).unwrap(), new.get(&key(1)).unwrap()),
            "{variant:?}"
        );
    }
}

#[test]
fn malformed_messages_still_render() {
    let messages = vec![
        RawMessage::anonymous().text("no id").user(User::new("bob")),
        RawMessage::new(2).text("no user"),
    ];
    let mut warnings: Vec<Warning> = Vec::new();
    let index = enrich(&messages, &mut warnings).unwrap();

    assert_eq!(
        warnings,
        vec![
            Warning::MissingId { position: 0 },
            Warning::MissingAuthor {
                position: 1,
                id: key(2)
            },
        ]
    );

    let viewer = User::new("me");
    let no_user = index.get(&key(2)).unwrap();
    assert_eq!(no_user.position(&viewer), Position::Left);
    assert_eq!(index.get(&None).unwrap().position(&viewer), Position::Left);
}

// --- Update cycles ---

#[derive(Clone)]
struct Attachment {
    id: MessageId,
    user: User,
}

impl Serialize for Attachment {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("file handle cannot be encoded"))
    }
}

impl ChatMessage for Attachment {
    fn id(&self) -> Option<&MessageId> {
        Some(&self.id)
    }

    fn author(&self) -> Option<&User> {
        Some(&self.user)
    }
}

#[derive(Default)]
struct CountingRenderer {
    publishes: usize,
}

impl<M> ListRenderer<M> for CountingRenderer {
    fn publish(&mut self, _index: EnrichedIndex<M>) {
        self.publishes += 1;
    }
}

#[test]
fn failed_cycle_leaves_renderer_untouched() {
    let mut container: MessageContainer<Attachment, Vec<Warning>> =
        MessageContainer::with_diagnostics(ListConfig::default(), Vec::new());
    let mut renderer = CountingRenderer::default();

    let err = container
        .update(
            vec![Attachment {
                id: MessageId::Int(1),
                user: User::new("bob"),
            }],
            &mut renderer,
        )
        .unwrap_err();

    assert!(matches!(err, EnrichError::Encode { position: 0, .. }));
    assert_eq!(renderer.publishes, 0);
    assert_eq!(container.published(), 0);
    assert!(!container.has_pending());
}

#[test]
fn container_drives_virtual_list() {
    let config = ListConfig::default();
    let mut container = MessageContainer::with_diagnostics(config.clone(), IgnoreDiagnostics);
    let mut drawn: Vec<RowKey> = Vec::new();
    let mut list = VirtualList::from_config(User::new("me"), &config, |props: RowProps<'_, RawMessage>| {
        drawn.push(props.key.clone());
        props.position
    });

    let history = vec![
        RawMessage::new(3).text("see you").user(User::new("me")),
        msg(2, "bye"),
        msg(1, "hello"),
    ];
    container.update(history.clone(), &mut list).unwrap();
    assert_eq!(list.row(&key(3)), Some(&Position::Right));
    assert_eq!(list.row(&key(1)), Some(&Position::Left));

    // A new message arrives at the top: it and its neighbor are drawn.
    let mut newer = vec![msg(4, "wait")];
    newer.extend(history);
    container.update(newer, &mut list).unwrap();

    let reconciliation = list.last_reconciliation();
    assert_eq!(reconciliation.change(&key(4)), Some(RowChange::Inserted));
    assert_eq!(reconciliation.change(&key(3)), Some(RowChange::Updated));
    assert_eq!(reconciliation.change(&key(2)), Some(RowChange::Unchanged));
    assert_eq!(reconciliation.change(&key(1)), Some(RowChange::Unchanged));
    assert_eq!(list.render_count(), 5);

    drop(list);
    assert_eq!(drawn, vec![key(3), key(2), key(1), key(4), key(3)]);
}

// --- Derive macro feature tests ---

/// Test the #[chat_message] attribute macro with explicit field roles
#[chat_message]
#[derive(PartialEq)]
struct Bubble {
    #[chat(id)]
    key: MessageId,
    #[chat(author)]
    sender: Option<User>,
    body: String,
}

/// Test the derive with conventional field names
#[derive(Clone, Serialize, chatlist_core::ChatMessage)]
struct Note {
    id: Option<MessageId>,
    user: User,
    pinned: bool,
}

#[test]
fn attribute_macro_roles() {
    let bubble = Bubble {
        key: MessageId::from("b-1"),
        sender: None,
        body: "hey".to_string(),
    };
    assert_eq!(bubble.id(), Some(&MessageId::from("b-1")));
    assert!(bubble.author().is_none());
    assert_eq!(bubble.clone(), bubble);
}

#[test]
fn derive_by_field_name() {
    let note = Note {
        id: None,
        user: User::new(7),
        pinned: true,
    };
    assert!(note.id().is_none());
    assert_eq!(note.author(), Some(&User::new(7)));
}

#[test]
fn derived_types_enrich() {
    let bubbles = vec![
        Bubble {
            key: MessageId::from("b"),
            sender: Some(User::new("me")),
            body: "second".to_string(),
        },
        Bubble {
            key: MessageId::from("a"),
            sender: None,
            body: "first".to_string(),
        },
    ];
    let mut warnings: Vec<Warning> = Vec::new();
    let index = enrich(&bubbles, &mut warnings).unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(
        warnings,
        vec![Warning::MissingAuthor {
            position: 1,
            id: Some(MessageId::from("a"))
        }]
    );
    let newest = index.get(&Some(MessageId::from("b"))).unwrap();
    assert_eq!(newest.previous_message().map(|b| b.body.as_str()), Some("first"));
    assert_eq!(newest.position(&User::new("me")), Position::Right);
}
