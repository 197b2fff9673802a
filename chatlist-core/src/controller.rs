use crate::config::ListConfig;
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::enrich::{enrich, EnrichError};
use crate::message::ChatMessage;
use crate::render::{ListRenderer, ScrollTarget};

/// Drives update cycles: raw messages in, a complete index out to the renderer.
///
/// The container holds no renderer; every operation that touches one takes
/// it as an argument. Because the renderer is borrowed mutably for the whole
/// cycle, two cycles can never interleave against the same renderer.
pub struct MessageContainer<M, D = LogDiagnostics> {
    config: ListConfig,
    diagnostics: D,
    pending: Option<Vec<M>>,
    published: u64,
}

impl<M: ChatMessage> MessageContainer<M, LogDiagnostics> {
    pub fn new(config: ListConfig) -> Self {
        Self::with_diagnostics(config, LogDiagnostics)
    }
}

impl<M: ChatMessage, D: Diagnostics> MessageContainer<M, D> {
    pub fn with_diagnostics(config: ListConfig, diagnostics: D) -> Self {
        MessageContainer {
            config,
            diagnostics,
            pending: None,
            published: 0,
        }
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut D {
        &mut self.diagnostics
    }

    /// Number of indexes handed to a renderer so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Queues a new message list, replacing one that was not flushed yet.
    pub fn receive(&mut self, messages: Vec<M>) {
        if let Some(stale) = self.pending.replace(messages) {
            log::debug!("replacing {} unflushed messages with a newer update", stale.len());
        }
    }

    /// Builds an index from the pending list and publishes it.
    ///
    /// Returns `Ok(false)` if nothing was pending. If the build fails the
    /// pending list is dropped and the renderer keeps what it had.
    pub fn flush<R: ListRenderer<M>>(&mut self, renderer: &mut R) -> Result<bool, EnrichError> {
        let Some(messages) = self.pending.take() else {
            return Ok(false);
        };

        let index = match enrich(&messages, &mut self.diagnostics) {
            Ok(index) => index,
            Err(err) => {
                log::error!("dropping update of {} messages: {err}", messages.len());
                return Err(err);
            }
        };

        log::debug!("publishing {} rows", index.len());
        renderer.publish(index);
        self.published += 1;

        if self.config.auto_scroll_to_bottom {
            renderer.scroll_to(ScrollTarget::End { animated: true });
        }
        Ok(true)
    }

    /// Runs one full update cycle.
    pub fn update<R: ListRenderer<M>>(
        &mut self,
        messages: Vec<M>,
        renderer: &mut R,
    ) -> Result<(), EnrichError> {
        self.receive(messages);
        self.flush(renderer).map(|_| ())
    }

    pub fn scroll_to<R: ListRenderer<M>>(&self, renderer: &mut R, target: ScrollTarget) {
        renderer.scroll_to(target);
    }
}
