//! Audio cue collaborator.
//!
//! Three named cues backed by `HtmlAudioElement`, each loaded once and
//! replayable. Playback is fire-and-forget: a rejected play promise (for
//! example an autoplay policy block) never aborts a phase transition.

use web_sys::HtmlAudioElement;

use crate::config::{
    CUE_VOLUME, PRIME_VOLUME, SOUND_ENGAGE_START, SOUND_PHASE_STOP, SOUND_SEQUENCE_COMPLETE,
};

/// The three audible moments of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    EngageStart,
    PhaseStop,
    SequenceComplete,
}

#[derive(Clone)]
pub struct AudioCues {
    engage_start: HtmlAudioElement,
    phase_stop: HtmlAudioElement,
    sequence_complete: HtmlAudioElement,
}

impl AudioCues {
    /// Load the cue elements. `None` outside a document context.
    pub fn new() -> Option<Self> {
        Some(Self {
            engage_start: HtmlAudioElement::new_with_src(SOUND_ENGAGE_START).ok()?,
            phase_stop: HtmlAudioElement::new_with_src(SOUND_PHASE_STOP).ok()?,
            sequence_complete: HtmlAudioElement::new_with_src(SOUND_SEQUENCE_COMPLETE).ok()?,
        })
    }

    fn element(&self, cue: Cue) -> &HtmlAudioElement {
        match cue {
            Cue::EngageStart => &self.engage_start,
            Cue::PhaseStop => &self.phase_stop,
            Cue::SequenceComplete => &self.sequence_complete,
        }
    }

    /// Play every cue once at near-zero volume. Browsers only unlock audio
    /// inside a user gesture, so this runs from the start click; it is a
    /// warm-up, not a musical cue.
    pub fn prime(&self) {
        for cue in [Cue::EngageStart, Cue::PhaseStop, Cue::SequenceComplete] {
            let element = self.element(cue);
            element.set_volume(PRIME_VOLUME);
            let _ = element.play();
        }
    }

    /// Play a cue at full volume, ignoring playback rejection.
    pub fn play(&self, cue: Cue) {
        let element = self.element(cue);
        element.set_volume(CUE_VOLUME);
        if element.play().is_err() {
            log::debug!("cue {cue:?} playback rejected");
        }
    }
}
