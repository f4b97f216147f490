//! Frame pacing and the animation-time offset persisted across page loads.

/// Session-storage key the animation offset is stored under.
pub const OFFSET_STORAGE_KEY: &str = "offset-animation";

/// The stored offset runs a fixed half second ahead of the rendered time;
/// the increment is constant, not the real inter-frame delta.
const OFFSET_PRE_ADVANCE: f64 = 0.5;

/// Source of the target frame rate, queried once per loop iteration.
pub trait RateProvider {
    fn target_fps(&self) -> f64;
}

/// Constant frame rate, used when no external rate collaborator is wired up.
#[derive(Clone, Copy, Debug)]
pub struct FixedRate(pub f64);

impl RateProvider for FixedRate {
    fn target_fps(&self) -> f64 {
        self.0
    }
}

/// Gates frame execution to a target rate. A tick runs only when at least
/// `1000 / target_fps` milliseconds have passed since the last executed one;
/// the first tick always runs.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    last_run_ms: Option<f64>,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_run(&mut self, now_ms: f64, target_fps: f64) -> bool {
        let interval_ms = 1000.0 / target_fps;
        match self.last_run_ms {
            Some(last) if now_ms - last < interval_ms => false,
            _ => {
                self.last_run_ms = Some(now_ms);
                true
            }
        }
    }
}

/// Decodes a persisted offset. Absent or unparsable values fall back to 0.
pub fn decode_offset(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0.0)
}

/// Stringifies an offset for storage.
pub fn encode_offset(offset: f64) -> String {
    offset.to_string()
}

/// Offset value persisted after rendering a frame at time `t`.
pub fn advance_offset(t: f64) -> f64 {
    t + OFFSET_PRE_ADVANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_always_runs() {
        let mut throttle = FrameThrottle::new();
        assert!(throttle.should_run(0.0, 30.0));
    }

    #[test]
    fn ticks_inside_the_interval_are_skipped() {
        let mut throttle = FrameThrottle::new();
        assert!(throttle.should_run(0.0, 10.0));
        assert!(!throttle.should_run(50.0, 10.0));
        assert!(!throttle.should_run(99.0, 10.0));
        assert!(throttle.should_run(100.0, 10.0));
    }

    #[test]
    fn skipped_ticks_do_not_move_the_gate() {
        let mut throttle = FrameThrottle::new();
        assert!(throttle.should_run(0.0, 10.0));
        assert!(!throttle.should_run(60.0, 10.0));
        // interval is measured from the last *executed* frame at t=0
        assert!(throttle.should_run(110.0, 10.0));
    }

    #[test]
    fn rate_changes_apply_on_the_next_tick() {
        let mut throttle = FrameThrottle::new();
        assert!(throttle.should_run(0.0, 10.0));
        assert!(!throttle.should_run(50.0, 10.0));
        assert!(throttle.should_run(50.0, 20.0));
    }

    #[test]
    fn missing_offset_decodes_to_zero() {
        assert_eq!(decode_offset(None), 0.0);
    }

    #[test]
    fn garbage_offset_decodes_to_zero() {
        assert_eq!(decode_offset(Some("not-a-number")), 0.0);
    }

    #[test]
    fn offset_round_trips_through_storage() {
        let stored = encode_offset(advance_offset(12.25));
        assert_eq!(decode_offset(Some(&stored)), 12.75);
    }

    #[test]
    fn reloaded_offset_never_decreases() {
        let mut offset = 0.0;
        for frame in 0..5 {
            let t = frame as f64 * 0.016 + offset;
            let stored = encode_offset(advance_offset(t));
            let reloaded = decode_offset(Some(&stored));
            assert!(reloaded >= offset);
            offset = reloaded;
        }
    }
}
