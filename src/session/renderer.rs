use crate::error::NbResult;
use crate::stimulus::{GridCell, Letter, Stimulus};
use std::time::Duration;
use tracing::warn;

/// Presentation side effects for one timestep. Both calls are fire-and-forget
/// from the session's point of view.
pub trait StimulusRenderer: Send {
    /// Lights `cell` for `duration`.
    fn flash(&mut self, cell: GridCell, duration: Duration) -> NbResult<()>;

    fn play_letter(&mut self, letter: Letter) -> NbResult<()>;
}

impl<R: StimulusRenderer + ?Sized> StimulusRenderer for Box<R> {
    fn flash(&mut self, cell: GridCell, duration: Duration) -> NbResult<()> {
        (**self).flash(cell, duration)
    }

    fn play_letter(&mut self, letter: Letter) -> NbResult<()> {
        (**self).play_letter(letter)
    }
}

/// Renders nothing. Used by headless runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentRenderer;

impl StimulusRenderer for SilentRenderer {
    fn flash(&mut self, _cell: GridCell, _duration: Duration) -> NbResult<()> {
        Ok(())
    }

    fn play_letter(&mut self, _letter: Letter) -> NbResult<()> {
        Ok(())
    }
}

/// Switches the wrapped renderer off after its first failure so the session
/// keeps running without presentation.
pub(crate) struct GuardedRenderer<'a, R: ?Sized> {
    inner: &'a mut R,
    available: bool,
}

impl<'a, R: StimulusRenderer + ?Sized> GuardedRenderer<'a, R> {
    pub(crate) fn new(inner: &'a mut R) -> Self {
        Self {
            inner,
            available: true,
        }
    }

    pub(crate) fn present(&mut self, stimulus: &Stimulus, flash: Duration) {
        if !self.available {
            return;
        }
        let outcome = self
            .inner
            .flash(stimulus.visual_position, flash)
            .and_then(|_| self.inner.play_letter(stimulus.auditory_letter));
        if let Err(e) = outcome {
            warn!(
                "Renderer failed at timestep {}, continuing without presentation: {}",
                stimulus.tick_index, e
            );
            self.available = false;
        }
    }
}
