use stepgrid::audio::voice::RELEASE_WINDOW;
use stepgrid::{
    pitch, AudioDestination, Mixer, ScheduledTone, Sequencer, SessionConfig, Waveform,
};

#[derive(Default)]
struct Recorder {
    now: f64,
    tones: Vec<ScheduledTone>,
}

impl AudioDestination for Recorder {
    fn current_time(&self) -> f64 {
        self.now
    }

    fn schedule(&mut self, tone: ScheduledTone) {
        self.tones.push(tone);
    }
}

#[test]
fn diagonal_then_reset() {
    let mut seq = Sequencer::new(SessionConfig::default()).unwrap();
    for i in 0..25 {
        seq.toggle(i, i).unwrap();
    }
    assert_eq!(seq.grid().active_count(), 25);

    let mut dest = Recorder::default();
    assert_eq!(seq.play(&mut dest).unwrap(), 25);

    // column i holds row i, so pitch falls as time advances
    let f5 = pitch::note("F", 5).unwrap();
    let f3 = pitch::note("F", 3).unwrap();
    assert_eq!(dest.tones[0].frequency, f5);
    assert_eq!(dest.tones[24].frequency, f3);
    assert!(dest.tones.windows(2).all(|w| w[0].start < w[1].start));
    assert!(dest.tones.iter().all(|t| t.waveform == Waveform::Triangle));

    seq.reset();
    assert_eq!(seq.grid().active_count(), 0);
    assert_eq!((seq.grid().width(), seq.grid().height()), (48, 25));

    let mut dest = Recorder::default();
    assert_eq!(seq.play(&mut dest).unwrap(), 0);
}

#[test]
fn single_cell_timing() {
    let mut seq = Sequencer::new(SessionConfig::default()).unwrap();
    seq.toggle(2, 0).unwrap();

    let mut dest = Recorder {
        now: 3.0,
        ..Default::default()
    };
    seq.play(&mut dest).unwrap();

    assert_eq!(dest.tones.len(), 1);
    let tone = &dest.tones[0];
    assert!((tone.start - 3.4).abs() < 1e-9);
    assert!((tone.stop - (3.4 + 0.5 + RELEASE_WINDOW)).abs() < 1e-9);
    assert_eq!(tone.gain_at(3.3), 0.0);
    assert_eq!(tone.gain_at(3.5), 1.0);
    assert!(tone.gain_at(4.1) < 1.0);
}

#[test]
fn mixer_plays_and_releases_a_session() {
    let mut seq = Sequencer::new(SessionConfig {
        grid_width: 4,
        grid_height: 3,
        start_note: ("A".into(), 2),
        step_duration: 0.1,
        sustain: 0.1,
        waveform: Waveform::Square,
        ..Default::default()
    })
    .unwrap();
    seq.toggle(0, 2).unwrap();
    seq.toggle(3, 1).unwrap();

    let mut mixer = Mixer::new(1000.0);
    assert_eq!(seq.play(&mut mixer).unwrap(), 2);
    // playing again while pending layers a second batch
    assert_eq!(seq.play(&mut mixer).unwrap(), 2);
    assert_eq!(mixer.pending(), 4);

    let mut buf = vec![0.0; 50];
    mixer.render(&mut buf, 1);
    assert!(buf.iter().any(|&s| s != 0.0));

    // last tone: 0.3 start + 0.1 sustain + 0.5 release
    let mut buf = vec![0.0; 1000];
    mixer.render(&mut buf, 1);
    assert_eq!(mixer.pending(), 0);
    assert_eq!(seq.grid().active_count(), 2);
}
