//! Wire-level event contracts.
//!
//! Every frame exchanged with a client is a tagged JSON object. Tags
//! are SCREAMING_CASE, payload fields are camelCase, and timestamps are
//! epoch milliseconds, matching what the browser clients parse.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::claims::ClaimVerdict;

/// Server-assigned identifier for one WebSocket connection. Rate limit
/// records are keyed by this, not by speaker id.
pub type ConnectionId = String;

/// Mint a connection identifier.
pub fn new_connection_id() -> ConnectionId {
    uuid::Uuid::new_v4().to_string()
}

/// Current time as epoch milliseconds, the timestamp unit on the wire.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Events sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// A speaker requests the shared microphone.
    #[serde(rename = "CLAIM_MIC", rename_all = "camelCase")]
    ClaimMic { speaker_id: String },

    /// The holder gives the microphone back.
    #[serde(rename = "RELEASE_MIC", rename_all = "camelCase")]
    ReleaseMic { speaker_id: String },

    /// The moderator changes the debate topic.
    #[serde(rename = "SET_TOPIC")]
    SetTopic { topic: String },

    /// A finalized speech-to-text chunk, ready for fact-checking.
    #[serde(rename = "TRANSCRIPT_FINAL", rename_all = "camelCase")]
    TranscriptFinal { speaker_id: String, text: String },
}

impl ClientEvent {
    /// Wire tag, for logging.
    pub fn event_type(&self) -> &'static str {
        match self {
            ClientEvent::ClaimMic { .. } => "CLAIM_MIC",
            ClientEvent::ReleaseMic { .. } => "RELEASE_MIC",
            ClientEvent::SetTopic { .. } => "SET_TOPIC",
            ClientEvent::TranscriptFinal { .. } => "TRANSCRIPT_FINAL",
        }
    }
}

/// Events broadcast by the server to every connected client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// The microphone changed hands or was released.
    #[serde(rename = "SPEAKER_UPDATE", rename_all = "camelCase")]
    SpeakerUpdate { current_speaker: Option<String> },

    /// The debate topic changed.
    #[serde(rename = "TOPIC_UPDATE")]
    TopicUpdate { topic: String, timestamp: i64 },

    /// One verdict for one checked claim.
    #[serde(rename = "FACT_RESULT", rename_all = "camelCase")]
    FactResult {
        speaker_id: String,
        #[serde(flatten)]
        verdict: ClaimVerdict,
        timestamp: i64,
    },
}

impl ServerEvent {
    /// Wire tag, for logging.
    pub fn event_type(&self) -> &'static str {
        match self {
            ServerEvent::SpeakerUpdate { .. } => "SPEAKER_UPDATE",
            ServerEvent::TopicUpdate { .. } => "TOPIC_UPDATE",
            ServerEvent::FactResult { .. } => "FACT_RESULT",
        }
    }

    /// Topic update stamped with the current time.
    pub fn topic_update(topic: &str) -> Self {
        ServerEvent::TopicUpdate {
            topic: topic.to_string(),
            timestamp: now_ms(),
        }
    }

    /// Fact result stamped with the current time.
    pub fn fact_result(speaker_id: &str, verdict: ClaimVerdict) -> Self {
        ServerEvent::FactResult {
            speaker_id: speaker_id.to_string(),
            verdict,
            timestamp: now_ms(),
        }
    }
}
