//! Audio thread implementation
//!
//! The thread owns the rodio output stream and sink, processes commands
//! from the UI thread, and reports progress as primitive events. For one
//! load, `MetadataLoaded` is always sent before the first `TimeUpdate`;
//! `Ended` is never sent while looping is active.

use crate::fetch::{stage, MediaSource};
use castwave_core::Duration;
use castwave_player::PrimitiveEvent;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::thread::{self, JoinHandle};
use std::time::Duration as StdDuration;

/// How often the thread reports playback position
const TICK: StdDuration = StdDuration::from_millis(250);

/// Commands accepted by the audio thread
#[derive(Debug)]
pub enum AudioCommand {
    Load { location: String, generation: u64 },
    Play,
    Pause,
    Seek(Duration),
    SetLooping(bool),
    Stop,
    Shutdown,
}

/// Spawns the audio thread
pub fn spawn_audio_thread(
) -> std::io::Result<(Sender<AudioCommand>, Receiver<PrimitiveEvent>, JoinHandle<()>)> {
    let (command_tx, command_rx) = unbounded();
    let (event_tx, event_rx) = unbounded();

    let thread = thread::Builder::new()
        .name("castwave-audio".to_string())
        .spawn(move || audio_thread_main(command_rx, event_tx))?;

    Ok((command_tx, event_rx, thread))
}

/// The output device; created inside the thread because the stream must
/// stay on the thread that opened it
struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// The currently loaded episode media
struct LoadedTrack {
    generation: u64,
    source: MediaSource,
    finished: bool,
}

fn audio_thread_main(command_rx: Receiver<AudioCommand>, event_tx: Sender<PrimitiveEvent>) {
    log::info!("Audio thread started");

    let output = match OutputStream::try_default() {
        Ok((stream, handle)) => Some(AudioOutput {
            _stream: stream,
            handle,
        }),
        Err(e) => {
            // Loads will report the failure per episode
            log::error!("No audio output device: {}", e);
            None
        }
    };

    let mut sink: Option<Sink> = None;
    let mut track: Option<LoadedTrack> = None;
    let mut looping = false;

    loop {
        match command_rx.recv_timeout(TICK) {
            Ok(AudioCommand::Load {
                location,
                generation,
            }) => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
                track = None;

                match handle_load(output.as_ref(), &event_tx, &location, generation) {
                    Some((new_sink, new_track)) => {
                        sink = Some(new_sink);
                        track = Some(new_track);
                    }
                    None => continue,
                }
            }

            Ok(AudioCommand::Play) => {
                if let (Some(sink), Some(track)) = (&sink, &track) {
                    if !track.finished {
                        sink.play();
                        let _ = event_tx.send(PrimitiveEvent::Played {
                            generation: track.generation,
                        });
                    }
                }
            }

            Ok(AudioCommand::Pause) => {
                if let (Some(sink), Some(track)) = (&sink, &track) {
                    if !track.finished {
                        sink.pause();
                        let _ = event_tx.send(PrimitiveEvent::Paused {
                            generation: track.generation,
                        });
                    }
                }
            }

            Ok(AudioCommand::Seek(position)) => {
                if let (Some(sink), Some(track)) = (&sink, &track) {
                    if !track.finished {
                        if let Err(e) = sink.try_seek(position.to_std()) {
                            log::warn!("Seek to {}s failed: {}", position.as_seconds(), e);
                        }
                    }
                }
            }

            Ok(AudioCommand::SetLooping(value)) => {
                looping = value;
            }

            Ok(AudioCommand::Stop) => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
                track = None;
            }

            Ok(AudioCommand::Shutdown) => break,

            Err(RecvTimeoutError::Timeout) => {
                tick(&sink, &mut track, looping, &event_tx);
            }

            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    log::info!("Audio thread exiting");
}

/// Stages and decodes an episode, reporting metadata on success
fn handle_load(
    output: Option<&AudioOutput>,
    event_tx: &Sender<PrimitiveEvent>,
    location: &str,
    generation: u64,
) -> Option<(Sink, LoadedTrack)> {
    let send_error = |message: String| {
        log::warn!("Load failed for {}: {}", location, message);
        let _ = event_tx.send(PrimitiveEvent::Error {
            generation,
            message,
        });
    };

    let Some(output) = output else {
        send_error("audio device unavailable".to_string());
        return None;
    };

    let source = match stage(location) {
        Ok(source) => source,
        Err(e) => {
            send_error(e.to_string());
            return None;
        }
    };

    let decoder = match open_decoder(&source) {
        Ok(decoder) => decoder,
        Err(message) => {
            send_error(message);
            return None;
        }
    };

    let duration = total_duration(&decoder);

    let sink = match Sink::try_new(&output.handle) {
        Ok(sink) => sink,
        Err(e) => {
            send_error(format!("audio sink unavailable: {}", e));
            return None;
        }
    };

    // Hold playback until requested; the consumer decides about autoplay
    sink.pause();
    sink.append(decoder);

    let _ = event_tx.send(PrimitiveEvent::MetadataLoaded {
        generation,
        duration,
    });

    Some((
        sink,
        LoadedTrack {
            generation,
            source,
            finished: false,
        },
    ))
}

/// Periodic position report and end-of-media handling
fn tick(
    sink: &Option<Sink>,
    track: &mut Option<LoadedTrack>,
    looping: bool,
    event_tx: &Sender<PrimitiveEvent>,
) {
    let (Some(sink), Some(track)) = (sink.as_ref(), track.as_mut()) else {
        return;
    };
    if track.finished {
        return;
    }

    let position: Duration = sink.get_pos().into();
    let _ = event_tx.send(PrimitiveEvent::TimeUpdate {
        generation: track.generation,
        position,
    });

    if sink.empty() {
        if looping {
            // Restart the same episode from position 0 instead of ending
            match open_decoder(&track.source) {
                Ok(decoder) => {
                    sink.append(decoder);
                    let _ = sink.try_seek(StdDuration::ZERO);
                    sink.play();
                }
                Err(message) => {
                    let _ = event_tx.send(PrimitiveEvent::Error {
                        generation: track.generation,
                        message,
                    });
                    track.finished = true;
                }
            }
        } else {
            track.finished = true;
            let _ = event_tx.send(PrimitiveEvent::Ended {
                generation: track.generation,
            });
        }
    }
}

fn open_decoder(source: &MediaSource) -> Result<Decoder<BufReader<File>>, String> {
    let file = File::open(source.path())
        .map_err(|e| format!("cannot open {}: {}", source.path().display(), e))?;
    Decoder::new(BufReader::new(file)).map_err(|e| format!("cannot decode media: {}", e))
}

fn total_duration(decoder: &Decoder<BufReader<File>>) -> Duration {
    use rodio::Source;
    decoder
        .total_duration()
        .map(Duration::from)
        .unwrap_or(Duration::ZERO)
}
