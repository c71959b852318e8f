use enum_map::{Enum, EnumMap};
use rodio::source::{Amplify, SineWave, TakeDuration};
use rodio::{OutputStream, OutputStreamHandle, PlayError, Sink, Source};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Audio cues triggered by the game
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum Cue {
    Move,
    Food,
    GameOver,
    BackgroundMusic,
}

impl Cue {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Cue::Move => "move",
            Cue::Food => "food",
            Cue::GameOver => "gameOver",
            Cue::BackgroundMusic => "backgroundMusic",
        }
    }
}

/// Fire-and-forget audio playback.  Playing a cue that is already playing
/// restarts it from the beginning.
pub(crate) trait SoundPlayer {
    fn play(&mut self, cue: Cue) -> Result<(), SoundError>;

    fn stop(&mut self, cue: Cue) -> Result<(), SoundError>;
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for Box<P> {
    fn play(&mut self, cue: Cue) -> Result<(), SoundError> {
        (**self).play(cue)
    }

    fn stop(&mut self, cue: Cue) -> Result<(), SoundError> {
        (**self).stop(cue)
    }
}

/// Somewhere to get fresh [`Sink`]s from
pub(crate) trait Output {
    fn sink(&self) -> Result<Sink, PlayError>;
}

/// The default audio output device
pub(crate) struct AudioOutput {
    // Playback stops when this is dropped.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl AudioOutput {
    pub(crate) fn open() -> Result<AudioOutput, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(AudioOutput {
            _stream: stream,
            handle,
        })
    }
}

impl Output for AudioOutput {
    fn sink(&self) -> Result<Sink, PlayError> {
        Sink::try_new(&self.handle)
    }
}

impl fmt::Debug for AudioOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioOutput").finish_non_exhaustive()
    }
}

/// Plays each cue on its own channel so that cues overlap but never queue
/// up behind themselves.  Background music loops until stopped.
pub(crate) struct RodioPlayer<O> {
    output: O,
    channels: EnumMap<Cue, Option<Sink>>,
}

impl<O: Output> RodioPlayer<O> {
    pub(crate) fn new(output: O) -> Self {
        RodioPlayer {
            output,
            channels: EnumMap::default(),
        }
    }
}

impl<O: Output> SoundPlayer for RodioPlayer<O> {
    fn play(&mut self, cue: Cue) -> Result<(), SoundError> {
        let sink = self.output.sink().map_err(|e| SoundError::new(cue, e))?;
        sink.append(cue_source(cue));
        if let Some(old) = self.channels[cue].replace(sink) {
            old.stop();
        }
        if cue == Cue::BackgroundMusic {
            log::debug!("Background music started");
        }
        Ok(())
    }

    fn stop(&mut self, cue: Cue) -> Result<(), SoundError> {
        if let Some(sink) = self.channels[cue].take() {
            sink.stop();
            if cue == Cue::BackgroundMusic {
                log::debug!("Background music stopped");
            }
        }
        Ok(())
    }
}

impl<O: fmt::Debug> fmt::Debug for RodioPlayer<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let playing = self
            .channels
            .iter()
            .filter_map(|(cue, sink)| sink.is_some().then_some(cue))
            .collect::<Vec<_>>();
        f.debug_struct("RodioPlayer")
            .field("output", &self.output)
            .field("playing", &playing)
            .finish()
    }
}

type Tone = Amplify<TakeDuration<SineWave>>;

fn tone(freq: f32, millis: u64, volume: f32) -> Tone {
    SineWave::new(freq)
        .take_duration(Duration::from_millis(millis))
        .amplify(volume)
}

/// The sound for a cue, synthesized on the spot
fn cue_source(cue: Cue) -> Box<dyn Source<Item = f32> + Send> {
    match cue {
        Cue::Move => Box::new(tone(660.0, 30, 0.10)),
        Cue::Food => Box::new(rodio::source::from_iter([
            tone(660.0, 60, 0.20),
            tone(990.0, 90, 0.20),
        ])),
        Cue::GameOver => Box::new(rodio::source::from_iter([
            tone(440.0, 150, 0.25),
            tone(330.0, 150, 0.25),
            tone(220.0, 300, 0.25),
        ])),
        Cue::BackgroundMusic => Box::new(
            rodio::source::from_iter([
                tone(262.0, 250, 0.05),
                tone(330.0, 250, 0.05),
                tone(392.0, 250, 0.05),
                tone(330.0, 250, 0.05),
            ])
            .repeat_infinite(),
        ),
    }
}

/// A player that plays nothing
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Silence;

impl SoundPlayer for Silence {
    fn play(&mut self, _cue: Cue) -> Result<(), SoundError> {
        Ok(())
    }

    fn stop(&mut self, _cue: Cue) -> Result<(), SoundError> {
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("failed to play {} sound", .cue.as_str())]
pub(crate) struct SoundError {
    cue: Cue,
    #[source]
    source: PlayError,
}

impl SoundError {
    pub(crate) fn new(cue: Cue, source: PlayError) -> SoundError {
        SoundError { cue, source }
    }
}
