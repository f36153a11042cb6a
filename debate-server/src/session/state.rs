//! Debate session state: floor arbitration and the current topic.
//!
//! The floor is a cooperative lock over a shared microphone:
//!
//! ```text
//! Idle ──ClaimMic(s)──▶ Held(s) ──ReleaseMic(s)──▶ Idle
//!                         │  ▲
//!                         └──┘ ClaimMic(s) re-claim by holder
//! ```
//!
//! Conflicting requests (claiming a held floor, releasing someone
//! else's floor) are silently ignored. There is no queueing and no
//! authorization; any client may claim an idle floor.

/// Outcome of a floor request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorOutcome {
    /// The request took effect; broadcast the new floor state.
    Granted,
    /// The request conflicted with the current holder; no state change,
    /// no broadcast.
    Ignored,
}

impl FloorOutcome {
    pub fn is_granted(self) -> bool {
        matches!(self, FloorOutcome::Granted)
    }
}

/// Mutable state for the single debate session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Speaker currently holding the microphone, if any.
    pub current_speaker: Option<String>,
    /// Debate topic; empty until a moderator sets one.
    pub current_topic: String,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the microphone for `speaker`.
    ///
    /// Granted when the floor is idle or already held by `speaker`; a
    /// re-claim by the holder is granted again so clients can refresh
    /// their state. Requests against another speaker's floor are
    /// ignored.
    pub fn claim_floor(&mut self, speaker: &str) -> FloorOutcome {
        match self.current_speaker.as_deref() {
            None => {
                self.current_speaker = Some(speaker.to_string());
                FloorOutcome::Granted
            }
            Some(holder) if holder == speaker => FloorOutcome::Granted,
            Some(_) => FloorOutcome::Ignored,
        }
    }

    /// Release the microphone. Only the current holder may release;
    /// anyone else's release is ignored, as is releasing an idle floor.
    pub fn release_floor(&mut self, speaker: &str) -> FloorOutcome {
        match self.current_speaker.as_deref() {
            Some(holder) if holder == speaker => {
                self.current_speaker = None;
                FloorOutcome::Granted
            }
            _ => FloorOutcome::Ignored,
        }
    }

    /// Replace the debate topic. Always accepted, including re-setting
    /// the same value.
    pub fn set_topic(&mut self, topic: &str) {
        self.current_topic = topic.to_string();
    }

    /// Whether a topic has been set.
    pub fn has_topic(&self) -> bool {
        !self.current_topic.is_empty()
    }
}
