//! Audible cues played on step transitions and at the end of a workout.
//!
//! A cue is fire-and-forget: `play` returns immediately and never reports a
//! failure. When no output device is available the cue is silently dropped.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CueKind {
    /// synthesized sine pulse through the audio device
    #[default]
    Tone,
    /// terminal bell
    Bell,
    /// no sound
    Off,
}

impl CueKind {
    /// Next kind in the `m` key rotation
    pub fn cycle(self) -> Self {
        match self {
            CueKind::Tone => CueKind::Bell,
            CueKind::Bell => CueKind::Off,
            CueKind::Off => CueKind::Tone,
        }
    }
}

pub trait Cue {
    fn play(&self);
}

/// Sound nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl Cue for SilentCue {
    fn play(&self) {}
}

/// Ring the terminal bell
#[derive(Debug, Default, Clone, Copy)]
pub struct BellCue;

impl Cue for BellCue {
    fn play(&self) {
        let mut stdout = io::stdout();
        if stdout.write_all(b"\x07").and_then(|_| stdout.flush()).is_err() {
            tracing::debug!("terminal bell unavailable");
        }
    }
}

#[cfg(feature = "audio")]
pub use tone::ToneCue;

#[cfg(feature = "audio")]
mod tone {
    use std::time::Duration;

    use rodio::{OutputStream, Sink, Source};

    use super::Cue;

    const SAMPLE_RATE: u32 = 44_100;
    const FREQUENCY_HZ: f32 = 800.0;
    const START_GAIN: f32 = 0.3;
    const END_GAIN: f32 = 0.01;
    const LENGTH: Duration = Duration::from_millis(300);

    /// 800 Hz sine decaying exponentially from 0.3 to 0.01 over 300 ms
    #[derive(Debug, Clone)]
    pub struct Pulse {
        sample: u32,
        total: u32,
        decay: f32,
    }

    impl Pulse {
        pub fn new() -> Self {
            let total = (SAMPLE_RATE as f32 * LENGTH.as_secs_f32()) as u32;
            // per-sample factor so that START_GAIN * decay^total == END_GAIN
            let decay = (END_GAIN / START_GAIN).powf(1.0 / total as f32);
            Self {
                sample: 0,
                total,
                decay,
            }
        }
    }

    impl Iterator for Pulse {
        type Item = f32;

        fn next(&mut self) -> Option<f32> {
            if self.sample >= self.total {
                return None;
            }
            let t = self.sample as f32 / SAMPLE_RATE as f32;
            let gain = START_GAIN * self.decay.powi(self.sample as i32);
            self.sample += 1;
            Some(gain * (2.0 * std::f32::consts::PI * FREQUENCY_HZ * t).sin())
        }
    }

    impl Source for Pulse {
        fn current_frame_len(&self) -> Option<usize> {
            Some((self.total - self.sample.min(self.total)) as usize)
        }

        fn channels(&self) -> u16 {
            1
        }

        fn sample_rate(&self) -> u32 {
            SAMPLE_RATE
        }

        fn total_duration(&self) -> Option<Duration> {
            Some(LENGTH)
        }
    }

    /// Plays a [`Pulse`] on a detached thread so the event loop never waits on the device
    #[derive(Debug, Default, Clone, Copy)]
    pub struct ToneCue;

    impl Cue for ToneCue {
        fn play(&self) {
            std::thread::spawn(|| {
                let Ok((_stream, handle)) = OutputStream::try_default() else {
                    tracing::debug!("no audio output device, tone skipped");
                    return;
                };
                let Ok(sink) = Sink::try_new(&handle) else {
                    tracing::debug!("could not open audio sink, tone skipped");
                    return;
                };
                sink.append(Pulse::new());
                sink.sleep_until_end();
            });
        }
    }

}

/// Build the cue for a configured kind.
///
/// Without the `audio` feature a tone request falls back to the terminal bell.
pub fn build(kind: CueKind) -> Box<dyn Cue> {
    match kind {
        #[cfg(feature = "audio")]
        CueKind::Tone => Box::new(ToneCue),
        #[cfg(not(feature = "audio"))]
        CueKind::Tone => Box::new(BellCue),
        CueKind::Bell => Box::new(BellCue),
        CueKind::Off => Box::new(SilentCue),
    }
}
