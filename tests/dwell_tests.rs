// Dwell state machine: hold detection, focus changes and the grace period.

use bci_core::{DwellPhase, DwellStateMachine};

#[test]
fn held_after_threshold_and_stays_held_while_focused() {
    let mut m = DwellStateMachine::new(1.0, 0.3);
    assert!(m.update(0.0, Some(1)), "first focus is a change");
    assert_eq!(m.phase(), DwellPhase::Entering);
    m.update(0.5, Some(1));
    assert!(!m.held_long_enough());
    m.update(1.0, Some(1));
    assert!(m.held_long_enough());
    assert_eq!(m.phase(), DwellPhase::Held);
    for i in 1..100 {
        m.update(1.0 + i as f64 * 0.1, Some(1));
        assert!(m.held_long_enough(), "hold lost at tick {i}");
        assert!(m.should_track_target(1.0 + i as f64 * 0.1));
    }
}

#[test]
fn any_focus_change_resets_hold() {
    let mut m = DwellStateMachine::new(1.0, 0.3);
    m.update(0.0, Some(1));
    m.update(2.0, Some(1));
    assert!(m.held_long_enough());

    assert!(m.update(2.1, Some(2)));
    assert!(!m.held_long_enough());
    assert_eq!(m.focused(), Some(2));
    assert_eq!(m.state().focus_start, Some(2.1));
    assert_eq!(m.state().lost_focus_at, None);

    // The new target needs its own full dwell.
    m.update(2.9, Some(2));
    assert!(!m.held_long_enough());
    m.update(3.2, Some(2));
    assert!(m.held_long_enough());
}

#[test]
fn losing_focus_starts_grace_period() {
    let mut m = DwellStateMachine::new(1.0, 0.3);
    m.update(-2.0, Some(4));
    m.update(-0.5, Some(4));
    assert!(m.held_long_enough());

    m.update(0.0, None);
    assert_eq!(m.phase(), DwellPhase::Neutral);
    assert_eq!(m.state().lost_focus_at, Some(0.0));
    assert_eq!(m.state().focus_start, None);
    assert!(m.should_track_target(0.29));
    assert_eq!(m.tracked_target(0.29), Some(4), "grace keeps the released target");
    assert!(!m.should_track_target(0.31));
    assert_eq!(m.tracked_target(0.31), None);
}

#[test]
fn unheld_target_gets_no_grace_period() {
    let mut m = DwellStateMachine::new(2.0, 0.3);
    m.update(0.0, Some(3));
    m.update(0.1, Some(3));
    m.update(0.2, None);
    assert_eq!(m.state().released, None);
    assert!(!m.should_track_target(0.25));
    assert_eq!(m.tracked_target(0.25), None);
}

#[test]
fn grazing_another_target_clears_the_released_one() {
    let mut m = DwellStateMachine::new(1.0, 0.3);
    m.update(0.0, Some(2));
    m.update(1.0, Some(2));
    m.update(1.1, Some(5));
    m.update(1.2, None);
    assert_eq!(m.tracked_target(1.25), None);
}

#[test]
fn grace_timer_is_not_restarted_by_further_neutral_ticks() {
    let mut m = DwellStateMachine::new(1.0, 0.3);
    m.update(0.0, Some(1));
    m.update(1.0, None);
    m.update(1.1, None);
    m.update(1.2, None);
    assert_eq!(m.state().lost_focus_at, Some(1.0));
    assert!(!m.should_track_target(1.35));
}

#[test]
fn neutral_from_the_start_marks_grace_without_a_target() {
    let mut m = DwellStateMachine::new(1.0, 0.3);
    assert!(!m.update(0.0, None));
    assert_eq!(m.state().lost_focus_at, Some(0.0));
    assert_eq!(m.tracked_target(0.1), None);
}

#[test]
fn entering_target_is_not_tracked() {
    let mut m = DwellStateMachine::new(2.0, 0.3);
    m.update(0.0, Some(3));
    m.update(1.0, Some(3));
    assert!(!m.should_track_target(1.0));
}

#[test]
fn refocus_during_grace_cancels_it() {
    let mut m = DwellStateMachine::new(1.0, 0.3);
    m.update(0.0, Some(1));
    m.update(1.0, Some(1));
    m.update(1.1, None);
    m.update(1.2, Some(1));
    assert_eq!(m.state().lost_focus_at, None);
    assert!(!m.should_track_target(1.2));
}

#[test]
fn thresholds_are_clamped() {
    let mut m = DwellStateMachine::new(-5.0, -1.0);
    assert!(m.dwell_threshold() > 0.0);
    assert_eq!(m.return_delay(), 0.0);
    m.set_dwell_threshold(f64::NAN);
    assert!(m.dwell_threshold() > 0.0);
    m.set_dwell_threshold(2.5);
    assert_eq!(m.dwell_threshold(), 2.5);
}

#[test]
fn reset_clears_everything() {
    let mut m = DwellStateMachine::new(1.0, 0.3);
    m.update(0.0, Some(1));
    m.update(1.0, Some(1));
    m.reset();
    assert_eq!(m.focused(), None);
    assert!(!m.held_long_enough());
    assert!(!m.should_track_target(1.0));
}
