use awsm_animation_core::{Keyframe, SourceKey, TimeSpan};

use super::*;
use crate::scene::ChannelProperty;

fn secs(seconds: f64) -> SourceTime {
    SourceTime::from_seconds(seconds)
}

fn curve(keys: Vec<SourceKey>) -> SourceCurve {
    SourceCurve::new(keys).unwrap()
}

fn frame(index: i64) -> TimeSpan {
    SourceTime(TimeMode::Frames30.one_frame().0 * index).to_time_span()
}

fn resampler() -> Resampler {
    Resampler::new(TimeMode::Frames30, IncompleteChannelPolicy::ZeroFill)
}

fn stairs() -> SourceCurve {
    curve(vec![
        SourceKey::constant(secs(0.0), 1.0),
        SourceKey::constant(secs(0.5), 2.0),
        SourceKey::constant(secs(1.0), 3.0),
    ])
}

fn assert_ordered<T>(keyframes: &[Keyframe<T>]) {
    assert!(keyframes.windows(2).all(|pair| pair[0].time <= pair[1].time));
}

#[test]
fn constant_keys_make_stairs() {
    let stairs = stairs();
    let set = SourceCurveSet::new(ChannelProperty::NearPlane, &[Some(&stairs)]);
    let track = resampler().resample::<f32>(&set).unwrap().unwrap();
    let keyframes = track.keyframes();

    // 31 frames plus one extra keyframe per step
    assert_eq!(keyframes.len(), 33);
    assert_ordered(keyframes);

    for index in 0..15 {
        assert_eq!(keyframes[index as usize], Keyframe::new(frame(index), 1.0));
    }
    assert_eq!(keyframes[15], Keyframe::new(frame(15), 1.0));
    assert_eq!(keyframes[16], Keyframe::new(frame(15), 2.0));
    for index in 16..30 {
        assert_eq!(keyframes[index as usize + 1], Keyframe::new(frame(index), 2.0));
    }
    assert_eq!(keyframes[31], Keyframe::new(frame(30), 2.0));
    assert_eq!(keyframes[32], Keyframe::new(frame(30), 3.0));

    let times: Vec<TimeSpan> = keyframes.iter().map(|keyframe| keyframe.time).collect();
    let coincident = times.windows(2).filter(|pair| pair[0] == pair[1]).count();
    assert_eq!(coincident, 2);
}

#[test]
fn stairs_on_every_axis_share_one_step() {
    let stairs = stairs();
    let set = SourceCurveSet::new(
        ChannelProperty::Translation,
        &[Some(&stairs), Some(&stairs), Some(&stairs)],
    );
    let track = resampler().resample::<Vec3>(&set).unwrap().unwrap();
    assert_eq!(track.len(), 33);
    assert_eq!(track.keyframes()[15].value, Vec3::splat(1.0));
    assert_eq!(track.keyframes()[16].value, Vec3::splat(2.0));
}

#[test]
fn hold_keyframe_only_holds_crossed_channels() {
    let stepped = curve(vec![
        SourceKey::constant(secs(0.0), 1.0),
        SourceKey::constant(secs(0.5), 2.0),
    ]);
    let ramp = curve(vec![
        SourceKey::linear(secs(0.0), 0.0),
        SourceKey::linear(secs(1.0), 10.0),
    ]);
    let set = SourceCurveSet::new(
        ChannelProperty::Translation,
        &[Some(&stepped), Some(&ramp), None],
    );
    let track = resampler().resample::<Vec3>(&set).unwrap().unwrap();
    let keyframes = track.keyframes();

    assert_eq!(keyframes.len(), 32);
    assert_eq!(keyframes[15].time, keyframes[16].time);
    assert!(keyframes[15].value.abs_diff_eq(Vec3::new(1.0, 5.0, 0.0), 1e-5));
    assert!(keyframes[16].value.abs_diff_eq(Vec3::new(2.0, 5.0, 0.0), 1e-5));
    assert!(keyframes[31].value.abs_diff_eq(Vec3::new(2.0, 10.0, 0.0), 1e-5));
}

#[test]
fn step_shorter_than_a_frame_is_kept() {
    let blip = curve(vec![
        SourceKey::constant(secs(0.0), 0.0),
        SourceKey::linear(secs(0.01), 1.0),
        SourceKey::linear(secs(0.02), 1.0),
    ]);
    let set = SourceCurveSet::new(ChannelProperty::FarPlane, &[Some(&blip)]);
    let track = resampler().resample::<f32>(&set).unwrap().unwrap();
    let end = secs(0.02).to_time_span();
    assert_eq!(
        track.keyframes(),
        [
            Keyframe::new(TimeSpan::ZERO, 0.0),
            Keyframe::new(end, 0.0),
            Keyframe::new(end, 1.0),
        ]
    );
}

#[test]
fn last_step_is_clamped_to_the_end() {
    let ramp = curve(vec![
        SourceKey::linear(secs(0.1), 0.0),
        SourceKey::linear(secs(0.55), 1.0),
    ]);
    let set = SourceCurveSet::new(ChannelProperty::NearPlane, &[Some(&ramp)]);
    let track = resampler().resample::<f32>(&set).unwrap().unwrap();
    let keyframes = track.keyframes();

    assert_ordered(keyframes);
    assert_eq!(track.start_time(), Some(secs(0.1).to_time_span()));
    assert_eq!(track.end_time(), Some(secs(0.55).to_time_span()));
    assert_eq!(keyframes.last().map(|keyframe| keyframe.value), Some(1.0));
    // 0.1s + 13 frames is 0.5333s, the next step overshoots and is clamped
    assert_eq!(keyframes.len(), 15);
}

// 1000 source ticks is a fraction of one output tick
fn just_past(seconds: f64) -> SourceTime {
    SourceTime(secs(seconds).0 + 1000)
}

#[test]
fn end_within_one_output_tick_steps_once() {
    let stepped = curve(vec![
        SourceKey::constant(secs(0.0), 1.0),
        SourceKey::constant(just_past(1.0), 2.0),
    ]);
    let set = SourceCurveSet::new(ChannelProperty::NearPlane, &[Some(&stepped)]);
    let track = resampler().resample::<f32>(&set).unwrap().unwrap();
    let keyframes = track.keyframes();
    assert_ordered(keyframes);

    let end = TimeSpan(TimeSpan::TICKS_PER_SECOND);
    assert_eq!(just_past(1.0).to_time_span(), end);
    let at_end = keyframes.iter().filter(|keyframe| keyframe.time == end).count();
    assert_eq!(at_end, 2);

    // frames 0..30, then the hold and the new value at the end
    assert_eq!(keyframes.len(), 32);
    assert_eq!(keyframes[29], Keyframe::new(frame(29), 1.0));
    assert_eq!(keyframes[30], Keyframe::new(end, 1.0));
    assert_eq!(keyframes[31], Keyframe::new(end, 2.0));
}

#[test]
fn end_within_one_output_tick_is_not_duplicated() {
    let ramp = curve(vec![
        SourceKey::linear(secs(0.0), 0.0),
        SourceKey::linear(just_past(1.0), 1.0),
    ]);
    let set = SourceCurveSet::new(ChannelProperty::FarPlane, &[Some(&ramp)]);
    let track = resampler().resample::<f32>(&set).unwrap().unwrap();
    let keyframes = track.keyframes();

    assert_eq!(keyframes.len(), 31);
    assert!(keyframes.windows(2).all(|pair| pair[0].time < pair[1].time));
    assert_eq!(keyframes.last().map(|keyframe| keyframe.value), Some(1.0));
}

#[test]
fn span_covers_every_channel() {
    let early = curve(vec![
        SourceKey::linear(secs(0.0), 0.0),
        SourceKey::linear(secs(0.5), 1.0),
    ]);
    let late = curve(vec![
        SourceKey::linear(secs(0.5), 5.0),
        SourceKey::linear(secs(1.0), 7.0),
    ]);
    let set = SourceCurveSet::new(
        ChannelProperty::Scaling,
        &[Some(&early), Some(&late), Some(&early)],
    );
    let track = resampler().resample::<Vec3>(&set).unwrap().unwrap();
    assert_eq!(track.len(), 31);
    assert_eq!(track.start_time(), Some(TimeSpan::ZERO));
    assert_eq!(track.end_time(), Some(TimeSpan(TimeSpan::TICKS_PER_SECOND)));

    // channels hold their ends outside their own keys
    assert_eq!(track.keyframes()[0].value, Vec3::new(0.0, 5.0, 0.0));
    assert_eq!(track.keyframes()[30].value, Vec3::new(1.0, 7.0, 1.0));
}

#[test]
fn absent_or_keyless_groups_produce_nothing() {
    let set = SourceCurveSet::new(ChannelProperty::Translation, &[None, None, None]);
    assert_eq!(resampler().resample::<Vec3>(&set), Ok(None));

    let empty = SourceCurve::default();
    let set = SourceCurveSet::new(ChannelProperty::Translation, &[Some(&empty), None, None]);
    assert_eq!(resampler().resample::<Vec3>(&set), Ok(None));
}

#[test]
fn incomplete_groups_follow_the_policy() {
    let ramp = curve(vec![
        SourceKey::linear(secs(0.0), 1.0),
        SourceKey::linear(secs(1.0), 2.0),
    ]);
    let set = SourceCurveSet::new(ChannelProperty::Rotation, &[None, Some(&ramp), None]);

    let filled = resampler().resample::<Vec3>(&set).unwrap().unwrap();
    assert_eq!(filled.keyframes()[0].value, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(filled.keyframes()[30].value, Vec3::new(0.0, 2.0, 0.0));

    let strict = Resampler::new(TimeMode::Frames30, IncompleteChannelPolicy::Skip);
    assert_eq!(strict.resample::<Vec3>(&set), Ok(None));
}

#[test]
fn four_channels() {
    let ramp = curve(vec![
        SourceKey::linear(secs(0.0), 0.0),
        SourceKey::linear(secs(1.0), 4.0),
    ]);
    let set = SourceCurveSet::new(
        ChannelProperty::Rotation,
        &[Some(&ramp), Some(&ramp), Some(&ramp), Some(&ramp)],
    );
    let track = resampler().resample::<Vec4>(&set).unwrap().unwrap();
    assert_eq!(track.len(), 31);
    assert!(track.keyframes()[15].value.abs_diff_eq(Vec4::splat(2.0), 1e-5));
}

#[test]
fn single_key_gives_single_keyframe() {
    let single = curve(vec![SourceKey::constant(secs(2.0), 3.0)]);
    let set = SourceCurveSet::new(ChannelProperty::NearPlane, &[Some(&single)]);
    let track = resampler().resample::<f32>(&set).unwrap().unwrap();
    assert_eq!(track.keyframes(), [Keyframe::new(TimeSpan::from_seconds(2.0), 3.0)]);
}

#[test]
fn resampling_is_deterministic() {
    let wobble = curve(vec![
        SourceKey::cubic(secs(0.0), 0.0, 0.0, 3.0),
        SourceKey::constant(secs(0.3), 1.0),
        SourceKey::linear(secs(0.7), -1.0),
        SourceKey::cubic(secs(1.3), 2.0, 1.0, 0.0),
    ]);
    let stairs = stairs();
    let set = SourceCurveSet::new(
        ChannelProperty::Translation,
        &[Some(&wobble), Some(&stairs), Some(&wobble)],
    );
    let first = resampler().resample::<Vec3>(&set).unwrap();
    let second = resampler().resample::<Vec3>(&set).unwrap();
    assert_eq!(first, second);
}
