use rand::rngs::StdRng;
use rand::SeedableRng;
use sequin_core::{Event, Note, Pattern, Sequence, SequenceError};
use std::time::Duration;

#[test]
fn test_layer_ramped_pattern_under_melody() {
    // Build a two-bar rhythm from a ramped pattern, then layer a melody
    let mut pattern = Pattern::subdivisions(4, 0.5).unwrap();
    pattern.ramp_value(100, 40).unwrap();
    let rhythm = Sequence::from_pattern(&pattern).unwrap();

    let mut song = Sequence::new(2.0).unwrap();
    song.add_rhythmic_melody(&rhythm, &[60, 62, 64, 65, 67, 69, 71, 72], 1)
        .unwrap();

    assert_eq!(song.len(), 16);
    let last = song.get(15).unwrap();
    assert_eq!(last.position(), 1.875);
    assert_eq!(last.event, Event::Note(Note::off(72, 1)));

    // Second bar keeps the ramped velocities of the first
    let first_on = song.get(0).unwrap();
    let second_bar_on = song.get(8).unwrap();
    assert_eq!(second_bar_on.position(), 1.0);
    assert_eq!(
        first_on.event.intensity(),
        second_bar_on.event.intensity()
    );
}

#[test]
fn test_layer_melody_over_thinned_rhythm() {
    // Thin the rhythm, not the melody, so every note keeps both halves
    let mut rhythm = Sequence::from_pattern(&Pattern::subdivisions(8, 0.5).unwrap()).unwrap();
    rhythm.add_sustain(0.0, 0.0625, Event::Pulse(90)).unwrap();
    rhythm
        .random_remove(0.5, &mut StdRng::seed_from_u64(3))
        .unwrap();
    rhythm.add_sustain(0.0, 0.0625, Event::Pulse(90)).unwrap();
    assert!(rhythm.len() <= 10);

    let pulses: Vec<f64> = rhythm.sorted().map(|e| e.position()).collect();
    let pitches: Vec<u8> = (0..rhythm.len() as u8).map(|i| 60 + i).collect();
    let mut melody = Sequence::new(1.0).unwrap();
    melody.add_rhythmic_melody(&rhythm, &pitches, 0).unwrap();

    assert_eq!(melody.len(), rhythm.len() * 2);
    for pitch in &pitches {
        let halves: Vec<(f64, bool)> = melody
            .sorted()
            .filter_map(|e| {
                e.event
                    .as_note()
                    .filter(|n| n.note == *pitch)
                    .map(|n| (e.position(), n.on))
            })
            .collect();
        assert_eq!(halves.len(), 2);
        assert!(halves[0].1 && !halves[1].1);
        assert!(pulses.contains(&halves[0].0));
    }
}

#[test]
fn test_event_list_matches_get_order() {
    let mut seq = Sequence::new(1.0).unwrap();
    seq.add_subdivisions(3, 1.0, 1.0).unwrap();
    seq.add(0.0, Event::marker("downbeat")).unwrap();

    let list = seq.event_list(Duration::from_secs(3));
    for (i, timed) in list.iter().enumerate() {
        assert_eq!(timed.event, seq.get(i).unwrap());
    }
    assert_eq!(list[0].event.event, Event::Pulse(100));
    assert_eq!(list[1].event.event, Event::marker("downbeat"));
    assert_eq!(list[1].offset, Duration::ZERO);
}

#[test]
fn test_errors_are_reported_not_panicked() {
    assert!(matches!(
        Pattern::new(0.0),
        Err(SequenceError::InvalidArgument(_))
    ));
    let mut seq = Sequence::new(1.0).unwrap();
    assert!(matches!(
        seq.add(f64::NAN, Event::pulse()),
        Err(SequenceError::InvalidPosition(_))
    ));
    assert_eq!(seq.get(3).unwrap_err(), SequenceError::EmptyStore);
}

#[cfg(feature = "serde")]
#[test]
fn test_sequence_serializes() {
    let mut seq = Sequence::new(1.0).unwrap();
    seq.add_sustain(0.25, 0.5, Note::on(60, 0, 90)).unwrap();

    let json = serde_json::to_string(&seq).unwrap();
    let restored: Sequence = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.get(0).unwrap(), seq.get(0).unwrap());
}
