//! End-to-end conversion scenarios across all supported rates.

use mediatime_core::{
    frames_to_seconds, frames_to_ticks, normalize, seconds_to_frames, seconds_to_ticks,
    ticks_to_frames, ticks_to_seconds, ConversionMode, RateSpec, RationalRate, TimebaseConverter,
    TimebaseError, TICKS_PER_SECOND,
};

// ── Helpers ────────────────────────────────────────────────────

const NOMINAL: [(f64, u32, u32); 8] = [
    (23.976, 24000, 1001),
    (23.98, 24000, 1001),
    (24.0, 24000, 1000),
    (25.0, 25000, 1000),
    (29.97, 30000, 1001),
    (30.0, 30000, 1000),
    (59.94, 60000, 1001),
    (60.0, 60000, 1000),
];

fn exact() -> TimebaseConverter {
    TimebaseConverter::default().with_mode(ConversionMode::Exact)
}

// ── Normalization ──────────────────────────────────────────────

#[test]
fn every_nominal_rate_normalizes_to_its_fraction() {
    for (fps, rate, scale) in NOMINAL {
        assert_eq!(
            normalize(RateSpec::from(fps)).unwrap(),
            RationalRate::new(rate, scale),
            "{fps}"
        );
    }
}

#[test]
fn unsupported_and_absent_rates_are_errors() {
    assert!(matches!(
        normalize(RateSpec::from(27.0)),
        Err(TimebaseError::UnsupportedRate(fps)) if fps == 27.0
    ));
    assert!(normalize(RateSpec::from(50.0)).is_err());
    assert!(matches!(normalize(None), Err(TimebaseError::MissingRate)));
}

// ── Legacy formulas ────────────────────────────────────────────

#[test]
fn legacy_frames_to_seconds_multiplies_by_rate() {
    assert_eq!(frames_to_seconds(24, RateSpec::from(24.0)).unwrap(), 576.0);
    assert_eq!(frames_to_seconds(48, RateSpec::from(24.0)).unwrap(), 1152.0);
}

#[test]
fn legacy_tick_round_trip_across_rates() {
    for (fps, _, _) in NOMINAL {
        for frames in [0, 1, 2, 23, 1_000, 86_400 * 60] {
            let ticks = frames_to_ticks(frames, RateSpec::from(fps)).unwrap();
            assert_eq!(ticks_to_frames(ticks, RateSpec::from(fps)).unwrap(), frames);
        }
    }
}

#[test]
fn legacy_ticks_to_seconds_is_whole_seconds() {
    let spec = RateSpec::from(25.0);
    assert_eq!(ticks_to_seconds(TICKS_PER_SECOND / 4, spec).unwrap(), 0.0);
    assert_eq!(ticks_to_seconds(TICKS_PER_SECOND / 2, spec).unwrap(), 1.0);
    assert_eq!(ticks_to_seconds(TICKS_PER_SECOND * 10, spec).unwrap(), 10.0);
}

#[test]
fn one_second_is_ticks_per_second_for_every_rate() {
    for (fps, _, _) in NOMINAL {
        assert_eq!(seconds_to_ticks(1.0, RateSpec::from(fps)).unwrap(), TICKS_PER_SECOND);
    }
}

// ── Exact formulas ─────────────────────────────────────────────

#[test]
fn exact_one_second_at_25_is_25_frames() {
    assert_eq!(exact().seconds_to_frames(1.0, RateSpec::from(25.0)).unwrap(), 25);
    assert_eq!(seconds_to_frames(1.0, RateSpec::from(25.0)).unwrap(), 25_000);
}

#[test]
fn exact_seconds_round_trip_across_rates() {
    let conv = exact();
    for (fps, _, _) in NOMINAL {
        for frames in [0, 1, 17, 1_001, 3_600 * 60, 24 * 3_600 * 60] {
            let seconds = conv.frames_to_seconds(frames, RateSpec::from(fps)).unwrap();
            assert_eq!(
                conv.seconds_to_frames(seconds, RateSpec::from(fps)).unwrap(),
                frames,
                "{frames} @ {fps}"
            );
        }
    }
}

#[test]
fn exact_frames_and_ticks_agree_with_seconds() {
    let conv = exact();
    let spec = RateSpec::from(RationalRate::new(30000, 1001));
    // 30000 frames at 29.97 take exactly 1001 seconds.
    let ticks = conv.frames_to_ticks(30_000, spec).unwrap();
    assert_eq!(ticks, 1001 * TICKS_PER_SECOND);
    assert_eq!(conv.ticks_to_seconds(ticks, spec).unwrap(), 1001.0);
    assert_eq!(conv.seconds_to_ticks(1001.0, spec).unwrap(), ticks);
}

#[test]
fn explicit_rate_behaves_like_matching_nominal() {
    let conv = exact();
    let nominal = RateSpec::from(59.94);
    let explicit = RateSpec::from(RationalRate::FPS_59_94);
    for frames in [0, 5, 12_345] {
        assert_eq!(
            conv.frames_to_ticks(frames, nominal).unwrap(),
            conv.frames_to_ticks(frames, explicit).unwrap()
        );
    }
}

// ── Shared converter ───────────────────────────────────────────

#[test]
fn converter_is_shareable_across_threads() {
    let conv = exact().with_default_rate(24.0);
    let handles: Vec<_> = (0..4i64)
        .map(|i| {
            std::thread::spawn(move || {
                let ticks = conv.frames_to_ticks(i * 24, None).unwrap();
                conv.ticks_to_seconds(ticks, None).unwrap()
            })
        })
        .collect();
    let seconds: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(seconds, vec![0.0, 1.0, 2.0, 3.0]);
}
