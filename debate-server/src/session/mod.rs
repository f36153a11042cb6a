//! Session layer: floor arbitration, submission gating, and event
//! coordination for the single live debate.
//!
//! ```text
//! ClientEvent ──▶ SessionCoordinator ──┬─▶ SessionState (floor, topic)
//!                                      ├─▶ RateLimiter  (cooldown gate)
//!                                      ├─▶ AnalysisPipeline
//!                                      └─▶ EventBus broadcasts
//! ```

pub mod coordinator;
pub mod rate_limit;
pub mod state;

// Re-export core types
pub use coordinator::{SessionCoordinator, SharedSessionCoordinator};
pub use rate_limit::{RateLimiter, COOLDOWN_MS};
pub use state::{FloorOutcome, SessionState};
