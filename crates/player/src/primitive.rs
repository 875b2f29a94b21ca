//! The audio primitive seam
//!
//! The primitive is whatever the environment provides for actually making
//! sound: it accepts control calls and reports what really happened through
//! events. The bridge treats those events as the source of truth for
//! playback state, so an external pause (OS media keys, device unplugged)
//! flows back into the session like any other.

use castwave_core::Duration;

/// Events reported by an audio primitive
///
/// Every event carries the generation of the `load` call that produced it,
/// so a consumer can discard reports from a superseded episode. For one
/// load, `MetadataLoaded` always precedes any `TimeUpdate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveEvent {
    /// Media is ready; total duration is known
    MetadataLoaded { generation: u64, duration: Duration },
    /// Periodic playback position report, whole seconds
    TimeUpdate { generation: u64, position: Duration },
    /// Playback actually started
    Played { generation: u64 },
    /// Playback actually paused
    Paused { generation: u64 },
    /// Natural end of media; never emitted while looping is set
    Ended { generation: u64 },
    /// Media failed to load or decode
    Error { generation: u64, message: String },
}

impl PrimitiveEvent {
    /// The load generation this event belongs to
    pub fn generation(&self) -> u64 {
        match self {
            Self::MetadataLoaded { generation, .. }
            | Self::TimeUpdate { generation, .. }
            | Self::Played { generation }
            | Self::Paused { generation }
            | Self::Ended { generation }
            | Self::Error { generation, .. } => *generation,
        }
    }
}

/// Control surface of an audio playback primitive
///
/// Control calls are fire-and-forget: implementations report the outcome
/// through [`PrimitiveEvent`]s rather than return values, mirroring how a
/// media element behaves. Only one episode is loaded at a time; a new
/// `load` supersedes the previous one.
pub trait AudioPrimitive {
    /// Loads media from `url`, tagging all resulting events with `generation`
    fn load(&mut self, url: &str, generation: u64);

    /// Requests playback to start
    fn play(&mut self);

    /// Requests playback to pause
    fn pause(&mut self);

    /// Moves the playback position
    fn seek(&mut self, position: Duration);

    /// When set, natural end-of-media restarts from position 0 instead of
    /// emitting [`PrimitiveEvent::Ended`]
    fn set_looping(&mut self, looping: bool);

    /// Discards the loaded media and stops playback
    fn stop(&mut self);

    /// Drains one pending event, if any
    fn poll_event(&mut self) -> Option<PrimitiveEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_generation_accessor() {
        let events = [
            PrimitiveEvent::MetadataLoaded {
                generation: 3,
                duration: Duration::from_seconds(100),
            },
            PrimitiveEvent::TimeUpdate {
                generation: 3,
                position: Duration::from_seconds(5),
            },
            PrimitiveEvent::Played { generation: 3 },
            PrimitiveEvent::Paused { generation: 3 },
            PrimitiveEvent::Ended { generation: 3 },
            PrimitiveEvent::Error {
                generation: 3,
                message: "boom".to_string(),
            },
        ];

        for event in events {
            assert_eq!(event.generation(), 3);
        }
    }
}
