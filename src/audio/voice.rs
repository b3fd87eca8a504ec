/// One pitch lane of the sequencer
use super::{AudioDestination, ScheduledTone, Waveform, RAMP_FLOOR};

/// Seconds over which a released tone decays to silence.
pub const RELEASE_WINDOW: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneVoice {
    frequency: f32,
}

impl ToneVoice {
    pub fn new(frequency: f32) -> Self {
        Self { frequency }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Sound `time_offset` seconds from now for `duration` seconds, then
    /// release.
    pub fn play(
        &self,
        destination: &mut dyn AudioDestination,
        time_offset: f64,
        duration: f64,
        waveform: Waveform,
    ) {
        let now = destination.current_time();
        self.play_from(destination, now, time_offset, duration, waveform);
    }

    /// Like `play`, with offsets measured from a clock reading taken by the
    /// caller so a batch of voices shares one reference point.
    pub fn play_from(
        &self,
        destination: &mut dyn AudioDestination,
        now: f64,
        time_offset: f64,
        duration: f64,
        waveform: Waveform,
    ) {
        let start = now + time_offset;
        let mut tone = ScheduledTone::new(self.frequency, waveform);
        tone.set_gain_at(1.0, start);
        tone.start_at(start);
        Self::stop(&mut tone, start + duration);
        destination.schedule(tone);
    }

    fn stop(tone: &mut ScheduledTone, time: f64) {
        let end = time + RELEASE_WINDOW;
        tone.exponential_ramp_at(RAMP_FLOOR, time, end);
        tone.stop_at(end);
    }
}
