use super::*;
use crate::foundation::core::Direction;

fn at(progress: f64) -> Timeline {
    Timeline {
        progress,
        direction: Direction::Forward,
        paused: false,
    }
}

#[test]
fn progress_zero_yields_the_from_values() {
    let p = FrameParams::derive(&at(0.0), &Options::default());
    assert_eq!(p.amplitude, 50.0);
    assert_eq!(p.frequency, 8.0);
    assert_eq!(p.mask_offset, -30.0);
}

#[test]
fn progress_one_yields_the_to_values() {
    let p = FrameParams::derive(&at(1.0), &Options::default());
    assert_eq!(p.amplitude, 0.0);
    assert_eq!(p.frequency, 7.0);
    assert_eq!(p.mask_offset, 28.0);
}

#[test]
fn midpoint_interpolates_all_three() {
    let p = FrameParams::derive(&at(0.5), &Options::default());
    assert_eq!(p.amplitude, 25.0);
    assert_eq!(p.frequency, 7.5);
    assert_eq!(p.mask_offset, -1.0);
}
