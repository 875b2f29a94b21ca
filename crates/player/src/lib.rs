//! Player session state and the bridge that drives audio playback
//!
//! Three pieces live here:
//! - [`PlayerSession`]: the shared store holding the episode queue and
//!   playback flags, mutated only through its operations and observed
//!   through explicit subscriptions.
//! - [`AudioPrimitive`]: the seam to whatever actually produces sound.
//! - [`PlayerBridge`]: the single authoritative bridge between one
//!   primitive and the session; owns all transient progress tracking.

mod bridge;
mod primitive;
mod session;

pub use bridge::{PlayerBridge, PlayerPhase};
pub use primitive::{AudioPrimitive, PrimitiveEvent};
pub use session::{PlayerSession, SessionChange};
