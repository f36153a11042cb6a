//! Session coordinator: the single entry point for inbound client events.
//!
//! Owns the floor/topic state and the rate limiter, runs transcript
//! submissions through the analysis pipeline, and publishes every
//! resulting broadcast. State mutations happen under short async
//! mutexes that are never held across the pipeline's network calls, so
//! one connection's in-flight analysis never blocks another
//! connection's events.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::claims::{AnalysisPipeline, ClaimVerdict};
use crate::events::{now_ms, ClientEvent, ConnectionId, ServerEvent, SharedEventBus};

use super::rate_limit::RateLimiter;
use super::state::SessionState;

/// Shared reference to SessionCoordinator
pub type SharedSessionCoordinator = Arc<SessionCoordinator>;

pub struct SessionCoordinator {
    state: Mutex<SessionState>,
    limiter: Mutex<RateLimiter>,
    pipeline: AnalysisPipeline,
    bus: SharedEventBus,
}

impl SessionCoordinator {
    pub fn new(pipeline: AnalysisPipeline, bus: SharedEventBus) -> Self {
        Self {
            state: Mutex::new(SessionState::new()),
            limiter: Mutex::new(RateLimiter::default()),
            pipeline,
            bus,
        }
    }

    /// Wrap in Arc for sharing across connection tasks.
    pub fn shared(self) -> SharedSessionCoordinator {
        Arc::new(self)
    }

    // =========================================================================
    // Event dispatch
    // =========================================================================

    /// Handle one inbound event from `connection_id`.
    ///
    /// Floor, topic, and rate-limit effects are applied before this
    /// returns. A transcript submission additionally awaits the
    /// pipeline's two model calls; each connection runs its events on
    /// its own task, so that wait stalls nobody else.
    pub async fn handle_event(&self, connection_id: &ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::ClaimMic { speaker_id } => self.claim_mic(&speaker_id).await,
            ClientEvent::ReleaseMic { speaker_id } => self.release_mic(&speaker_id).await,
            ClientEvent::SetTopic { topic } => self.set_topic(&topic).await,
            ClientEvent::TranscriptFinal { speaker_id, text } => {
                self.submit_transcript(connection_id, &speaker_id, &text).await
            }
        }
    }

    async fn claim_mic(&self, speaker_id: &str) {
        let mut state = self.state.lock().await;
        if !state.claim_floor(speaker_id).is_granted() {
            debug!(speaker_id, "Mic claim ignored (floor held by another speaker)");
            return;
        }
        let update = ServerEvent::SpeakerUpdate {
            current_speaker: state.current_speaker.clone(),
        };
        drop(state);

        info!(speaker_id, "Mic claimed");
        self.bus.publish(update);
    }

    async fn release_mic(&self, speaker_id: &str) {
        let mut state = self.state.lock().await;
        if !state.release_floor(speaker_id).is_granted() {
            debug!(speaker_id, "Mic release ignored (not the holder)");
            return;
        }
        drop(state);

        info!(speaker_id, "Mic released");
        self.bus.publish(ServerEvent::SpeakerUpdate {
            current_speaker: None,
        });
    }

    async fn set_topic(&self, topic: &str) {
        self.state.lock().await.set_topic(topic);

        info!(topic, "Topic set");
        self.bus.publish(ServerEvent::topic_update(topic));
    }

    // =========================================================================
    // Transcript submissions
    // =========================================================================

    async fn submit_transcript(&self, connection_id: &ConnectionId, speaker_id: &str, text: &str) {
        let allowed = self.limiter.lock().await.allow(connection_id, now_ms());
        if !allowed {
            warn!(connection_id = %connection_id, speaker_id, "Submission rate-limited");
            self.bus
                .publish(ServerEvent::fact_result(speaker_id, ClaimVerdict::rate_limited(text)));
            return;
        }

        let topic = self.state.lock().await.current_topic.clone();

        debug!(speaker_id, transcript_chars = text.len(), "Fact-checking transcript");
        match self.pipeline.run(text, &topic).await {
            Ok(verdicts) => {
                if verdicts.is_empty() {
                    debug!(speaker_id, "No checkable claims in transcript");
                    return;
                }
                info!(speaker_id, verdicts = verdicts.len(), "Fact check complete");
                for verdict in verdicts {
                    self.bus.publish(ServerEvent::fact_result(speaker_id, verdict));
                }
            }
            Err(e) => {
                error!(speaker_id, error = %e, "Fact check failed");
                self.bus
                    .publish(ServerEvent::fact_result(speaker_id, ClaimVerdict::service_error(text)));
            }
        }
    }

    // =========================================================================
    // Connection lifecycle
    // =========================================================================

    /// Events a newly accepted connection receives before any broadcast:
    /// the current floor state, plus the topic once one has been set.
    pub async fn join_snapshot(&self) -> Vec<ServerEvent> {
        let state = self.state.lock().await;
        let mut events = vec![ServerEvent::SpeakerUpdate {
            current_speaker: state.current_speaker.clone(),
        }];
        if state.has_topic() {
            events.push(ServerEvent::topic_update(&state.current_topic));
        }
        events
    }

    /// Drop per-connection bookkeeping after a disconnect.
    pub async fn connection_closed(&self, connection_id: &ConnectionId) {
        self.limiter.lock().await.forget(connection_id);
        debug!(connection_id = %connection_id, "Connection bookkeeping dropped");
    }
}
