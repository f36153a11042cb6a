//! Real-time fact-checking server for live two-speaker debates.
//!
//! Clients connect over WebSocket, arbitrate a shared microphone, set
//! the debate topic, and submit finalized transcript chunks. Each
//! submission runs through a two-stage Gemini pipeline (claim
//! extraction, then verdict analysis) and every resulting verdict is
//! broadcast to all connected clients.
//!
//! # Layers
//!
//! ```text
//! server    WebSocket transport, one task pair per connection
//! session   floor arbitration, cooldown gate, event coordination
//! claims    extraction → analysis pipeline, defensive normalization
//! events    wire contracts and the broadcast hub
//! llm       Gemini client behind the TextGenerator seam
//! ```

pub mod claims;
pub mod config;
pub mod events;
pub mod llm;
pub mod server;
pub mod session;

// Re-export key claim types
pub use claims::{AnalysisPipeline, ClaimCandidate, ClaimVerdict, Verdict};

// Re-export key event types
pub use events::{ClientEvent, EventBus, ServerEvent, SharedEventBus};

// Re-export key session types
pub use session::{SessionCoordinator, SessionState, SharedSessionCoordinator};

pub use config::ServerConfig;
pub use llm::{GeminiClient, LlmError, TextGenerator};
