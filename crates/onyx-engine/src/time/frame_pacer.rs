use std::time::{Duration, Instant};

/// Schedules frames at a fixed target rate.
///
/// The runtime asks [`is_due`](Self::is_due) before requesting a redraw and
/// sleeps until [`next_frame_at`](Self::next_frame_at) otherwise. Deadlines
/// advance by whole periods so the average rate stays on target; after a
/// stall longer than one period the schedule restarts from `now` instead of
/// bursting to catch up.
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    next: Option<Instant>,
}

impl FramePacer {
    /// Creates a pacer for `target_fps` frames per second.
    ///
    /// Non-positive or non-finite rates disable pacing (every frame is due).
    pub fn new(target_fps: f64) -> Self {
        let period = if target_fps.is_finite() && target_fps > 0.0 {
            Duration::from_secs_f64(1.0 / target_fps)
        } else {
            Duration::ZERO
        };
        Self { period, next: None }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Deadline of the next frame. `None` before the first frame.
    #[inline]
    pub fn next_frame_at(&self) -> Option<Instant> {
        self.next
    }

    /// Whether a frame should be produced at `now`.
    #[inline]
    pub fn is_due(&self, now: Instant) -> bool {
        self.next.is_none_or(|next| now >= next)
    }

    /// Records that a frame started at `now` and schedules the following one.
    pub fn frame_started(&mut self, now: Instant) {
        let scheduled = match self.next {
            Some(next) => next + self.period,
            None => now + self.period,
        };

        self.next = Some(if scheduled <= now { now + self.period } else { scheduled });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_due_immediately() {
        let pacer = FramePacer::new(60.0);
        assert!(pacer.is_due(Instant::now()));
        assert!(pacer.next_frame_at().is_none());
    }

    #[test]
    fn deadlines_advance_by_whole_periods() {
        let mut pacer = FramePacer::new(20.0);
        let t0 = Instant::now();

        pacer.frame_started(t0);
        assert_eq!(pacer.next_frame_at(), Some(t0 + Duration::from_millis(50)));
        assert!(!pacer.is_due(t0 + Duration::from_millis(49)));
        assert!(pacer.is_due(t0 + Duration::from_millis(50)));

        // A slightly late frame does not push the schedule back.
        pacer.frame_started(t0 + Duration::from_millis(53));
        assert_eq!(pacer.next_frame_at(), Some(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn long_stall_restarts_schedule_from_now() {
        let mut pacer = FramePacer::new(20.0);
        let t0 = Instant::now();
        pacer.frame_started(t0);

        let late = t0 + Duration::from_millis(400);
        pacer.frame_started(late);
        assert_eq!(pacer.next_frame_at(), Some(late + Duration::from_millis(50)));
    }

    #[test]
    fn invalid_rate_disables_pacing() {
        let mut pacer = FramePacer::new(0.0);
        let t0 = Instant::now();
        pacer.frame_started(t0);
        assert_eq!(pacer.period(), Duration::ZERO);
        assert!(pacer.is_due(t0));
    }
}
