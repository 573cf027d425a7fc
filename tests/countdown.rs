//! Countdown state-machine properties
//!
//! All instants are synthetic offsets from a single base, so no test sleeps.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use tablero::{Countdown, Phase};

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn reset_immediately_after_start_restores_the_full_total() {
    let base = Instant::now();
    let mut cd = Countdown::new(secs(10), base);

    cd.reset(base);

    assert_eq!(cd.remaining(), secs(10));
    assert_eq!(cd.phase(), Phase::Running);
}

#[test]
fn elapsed_time_while_paused_does_not_decrease_remaining() {
    let base = Instant::now();
    let mut cd = Countdown::new(secs(10), base);

    cd.tick(base + secs(3));
    cd.toggle_pause(base + secs(3));
    assert_eq!(cd.remaining(), secs(7));

    // a long real-time gap passes while paused
    cd.tick(base + secs(300));
    assert_eq!(cd.remaining(), secs(7));
    assert_eq!(cd.phase(), Phase::Paused);
}

#[test]
fn resume_continues_from_the_value_held_at_pause_time() {
    let base = Instant::now();
    let mut cd = Countdown::new(secs(10), base);

    cd.tick(base + secs(4));
    cd.toggle_pause(base + secs(4)); // 6s remaining held
    cd.toggle_pause(base + secs(50)); // resume after a 46s pause

    // two seconds of running after the resume
    cd.tick(base + secs(52));
    assert_eq!(cd.remaining(), secs(4));
}

#[test]
fn remaining_is_derived_from_the_deadline_not_tick_cadence() {
    let base = Instant::now();
    let mut cd = Countdown::new(secs(30), base);

    // irregular, delayed frames
    cd.tick(base + Duration::from_millis(1700));
    cd.tick(base + secs(11));
    cd.tick(base + secs(29));

    assert_eq!(cd.remaining(), secs(1));
}

#[test]
fn finish_fires_exactly_once_and_is_terminal_until_reset() {
    let base = Instant::now();
    let mut cd = Countdown::new(secs(5), base);

    assert!(!cd.tick(base + secs(4)));
    assert!(cd.tick(base + secs(5)));
    assert!(!cd.tick(base + secs(7)));
    assert_eq!(cd.phase(), Phase::Finished);

    // pause is ignored once finished; reset is valid from any state
    cd.toggle_pause(base + secs(8));
    assert_eq!(cd.phase(), Phase::Finished);

    cd.reset(base + secs(9));
    assert_eq!(cd.phase(), Phase::Running);
    assert_eq!(cd.remaining(), secs(5));
}

#[test]
fn display_renders_minutes_and_seconds() {
    let base = Instant::now();
    let mut cd = Countdown::new(secs(125), base);
    assert_eq!(cd.display(), "02:05");

    cd.tick(base + secs(65));
    assert_eq!(cd.display(), "01:00");

    cd.tick(base + secs(125));
    assert_eq!(cd.display(), "00:00");
}
