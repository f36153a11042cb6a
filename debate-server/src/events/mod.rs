//! Event plumbing: wire contracts and the broadcast hub.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Coordinator  │────▶│  Event Bus   │────▶│ Every socket │
//! │  (publish)   │     │ (broadcast)  │     │    (recv)    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```

pub mod bus;
pub mod types;

// Re-export core types
pub use bus::{EventBus, SharedEventBus};
pub use types::{new_connection_id, now_ms, ClientEvent, ConnectionId, ServerEvent};
