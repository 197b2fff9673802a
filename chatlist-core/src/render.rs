use indexmap::IndexMap;

use crate::config::ListConfig;
use crate::diff::{reconcile, Reconciliation, Snapshot};
use crate::enriched::EnrichedMessage;
use crate::fingerprint::Fingerprint;
use crate::id::RowKey;
use crate::index::EnrichedIndex;
use crate::message::{ChatMessage, User};

/// Which side of the list a row is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Left,
    Right,
}

impl Position {
    /// Rows written by the viewer go on the right.
    ///
    /// Ids are compared as-is, so an author and a viewer that both lack an
    /// id count as the same person.
    pub fn of(author: &User, viewer: &User) -> Self {
        if author.id == viewer.id {
            Position::Right
        } else {
            Position::Left
        }
    }
}

/// Where to scroll the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollTarget {
    /// An absolute offset from the newest message.
    Offset { y: f32, animated: bool },
    /// The oldest loaded message.
    End { animated: bool },
}

/// Everything a row callback gets to draw one message.
#[derive(Debug)]
pub struct RowProps<'a, M> {
    pub key: &'a RowKey,
    pub current: &'a EnrichedMessage<M>,
    pub position: Position,
}

impl<'a, M: ChatMessage> RowProps<'a, M> {
    pub fn new(key: &'a RowKey, current: &'a EnrichedMessage<M>, viewer: &User) -> Self {
        RowProps {
            key,
            current,
            position: current.position(viewer),
        }
    }

    pub fn message(&self) -> &'a M {
        self.current.message()
    }

    pub fn previous_message(&self) -> Option<&'a M> {
        self.current.previous_message()
    }

    pub fn next_message(&self) -> Option<&'a M> {
        self.current.next_message()
    }
}

/// The virtualized list that draws enriched rows.
///
/// Receives each complete index exactly once. Any per-row reuse must be
/// decided from fingerprints alone (see [`crate::diff`]).
pub trait ListRenderer<M> {
    fn publish(&mut self, index: EnrichedIndex<M>);

    /// Scrolls the list, if the renderer supports it.
    fn scroll_to(&mut self, target: ScrollTarget) {
        log::debug!("renderer ignores scroll request {target:?}");
    }
}

/// An in-memory virtualized list.
///
/// Draws rows through a callback, only within its window, and only when a
/// row is new to the window or its fingerprint differs from the one it was
/// last drawn with. Useful for testing and as a reference implementation of
/// the reconciliation contract.
pub struct VirtualList<M, R, F> {
    viewer: User,
    render_row: F,
    window: usize,
    page_size: usize,
    index: EnrichedIndex<M>,
    snapshot: Snapshot,
    drawn: IndexMap<RowKey, (Fingerprint, R)>,
    last: Reconciliation,
    scroll: Option<ScrollTarget>,
    renders: usize,
}

impl<M, R, F> VirtualList<M, R, F>
where
    M: ChatMessage,
    F: FnMut(RowProps<'_, M>) -> R,
{
    /// Creates a list showing `initial_size` rows that grows by `page_size`.
    pub fn new(viewer: User, initial_size: usize, page_size: usize, render_row: F) -> Self {
        VirtualList {
            viewer,
            render_row,
            window: initial_size,
            page_size,
            index: EnrichedIndex::default(),
            snapshot: Snapshot::new(),
            drawn: IndexMap::new(),
            last: Reconciliation::default(),
            scroll: None,
            renders: 0,
        }
    }

    /// Creates a list sized by `config.initial_list_size` and `config.page_size`.
    pub fn from_config(viewer: User, config: &ListConfig, render_row: F) -> Self {
        Self::new(viewer, config.initial_list_size, config.page_size, render_row)
    }

    /// Grows the window by one page, drawing the rows that come into view.
    pub fn show_more(&mut self) {
        self.window = self.window.saturating_add(self.page_size);
        self.draw();
    }

    /// Drawn rows in list order.
    pub fn rows(&self) -> impl Iterator<Item = (&RowKey, &R)> {
        self.drawn.iter().map(|(key, (_, rendered))| (key, rendered))
    }

    pub fn row(&self, key: &RowKey) -> Option<&R> {
        self.drawn.get(key).map(|(_, rendered)| rendered)
    }

    /// The index most recently published.
    pub fn index(&self) -> &EnrichedIndex<M> {
        &self.index
    }

    /// The outcome of the most recent publish.
    pub fn last_reconciliation(&self) -> &Reconciliation {
        &self.last
    }

    pub fn last_scroll(&self) -> Option<ScrollTarget> {
        self.scroll
    }

    /// Total number of row callbacks so far.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    fn draw(&mut self) {
        let mut previous = std::mem::take(&mut self.drawn);
        let mut drawn = IndexMap::with_capacity(self.window.min(self.index.len()));

        for (key, row) in self.index.iter().take(self.window) {
            let fingerprint = row.fingerprint();
            let rendered = match previous.swap_remove(key) {
                Some((drawn_with, rendered)) if drawn_with == fingerprint => rendered,
                _ => {
                    self.renders += 1;
                    (self.render_row)(RowProps::new(key, row, &self.viewer))
                }
            };
            drawn.insert(key.clone(), (fingerprint, rendered));
        }

        self.drawn = drawn;
    }
}

impl<M, R, F> ListRenderer<M> for VirtualList<M, R, F>
where
    M: ChatMessage,
    F: FnMut(RowProps<'_, M>) -> R,
{
    fn publish(&mut self, index: EnrichedIndex<M>) {
        self.last = reconcile(&self.snapshot, &index);
        self.snapshot = index.fingerprints();
        self.index = index;
        self.draw();
    }

    fn scroll_to(&mut self, target: ScrollTarget) {
        self.scroll = Some(target);
    }
}
