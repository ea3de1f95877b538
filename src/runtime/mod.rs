//! Async runtime
//!
//! tokio tasks driving the cursor and section state machines. Each service
//! owns one task with an explicit lifecycle:
//!
//! | Call | Effect |
//! |------|--------|
//! | `new()` | State created, nothing scheduled |
//! | `start()` | Task spawned (tracker evaluates once first) |
//! | `stop()` | Shutdown signalled, task awaited, timers gone |
//!
//! Hosts feed events through mpsc senders and read render state from
//! `watch` receivers.

mod clock;
mod error;
mod follower;
mod tracker;

pub use clock::Clock;
pub use error::{Result, RuntimeError};
pub use follower::{PointerEvent, PointerFollowerService};
pub use tracker::{SectionTrackerService, SharedLayout};
