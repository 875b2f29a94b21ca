//! UI-thread handle to the audio thread

use crate::thread::{spawn_audio_thread, AudioCommand};
use castwave_core::Duration;
use castwave_player::{AudioPrimitive, PrimitiveEvent};
use crossbeam_channel::{Receiver, Sender};
use std::thread::JoinHandle;

/// Rodio-backed implementation of [`AudioPrimitive`]
///
/// All control calls are forwarded to a dedicated audio thread; events flow
/// back through a channel drained by `poll_event`. Dropping the primitive
/// shuts the thread down.
pub struct RodioPrimitive {
    command_tx: Sender<AudioCommand>,
    event_rx: Receiver<PrimitiveEvent>,
    thread: Option<JoinHandle<()>>,
}

impl RodioPrimitive {
    /// Spawns the audio thread and returns the handle to it
    pub fn spawn() -> std::io::Result<Self> {
        let (command_tx, event_rx, thread) = spawn_audio_thread()?;
        Ok(Self {
            command_tx,
            event_rx,
            thread: Some(thread),
        })
    }

    fn send(&self, command: AudioCommand) {
        if self.command_tx.send(command).is_err() {
            log::error!("Audio thread is gone; command dropped");
        }
    }
}

impl AudioPrimitive for RodioPrimitive {
    fn load(&mut self, url: &str, generation: u64) {
        self.send(AudioCommand::Load {
            location: url.to_string(),
            generation,
        });
    }

    fn play(&mut self) {
        self.send(AudioCommand::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCommand::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.send(AudioCommand::Seek(position));
    }

    fn set_looping(&mut self, looping: bool) {
        self.send(AudioCommand::SetLooping(looping));
    }

    fn stop(&mut self) {
        self.send(AudioCommand::Stop);
    }

    fn poll_event(&mut self) -> Option<PrimitiveEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl Drop for RodioPrimitive {
    fn drop(&mut self) {
        let _ = self.command_tx.send(AudioCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration as StdDuration, Instant};

    fn wait_for_event(primitive: &mut RodioPrimitive) -> Option<PrimitiveEvent> {
        let deadline = Instant::now() + StdDuration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(event) = primitive.poll_event() {
                return Some(event);
            }
            std::thread::sleep(StdDuration::from_millis(20));
        }
        None
    }

    #[test]
    fn test_spawn_and_shutdown() {
        let primitive = RodioPrimitive::spawn().expect("audio thread spawns");
        drop(primitive);
    }

    #[test]
    fn test_load_of_missing_file_reports_error() {
        let mut primitive = RodioPrimitive::spawn().expect("audio thread spawns");
        primitive.load("/no/such/file.mp3", 1);

        // Whether or not an output device exists, this load cannot succeed
        match wait_for_event(&mut primitive) {
            Some(PrimitiveEvent::Error { generation, .. }) => assert_eq!(generation, 1),
            other => panic!("expected an error event, got {:?}", other),
        }
    }
}
