use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct LoopMetricsSnapshot {
    pub(crate) fps: f32,
    pub(crate) frame_time_ms: f32,
}

#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    interval_start: Instant,
    interval: Duration,
    frames: u32,
    frame_time_sum: Duration,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval: Duration) -> Self {
        Self::starting_at(Instant::now(), interval)
    }

    fn starting_at(interval_start: Instant, interval: Duration) -> Self {
        Self {
            interval_start,
            interval,
            frames: 0,
            frame_time_sum: Duration::ZERO,
        }
    }

    pub(crate) fn record_frame(&mut self, frame_dt: Duration) {
        self.frames = self.frames.saturating_add(1);
        self.frame_time_sum = self.frame_time_sum.saturating_add(frame_dt);
    }

    pub(crate) fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed < self.interval {
            return None;
        }

        let elapsed_seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let frame_time_ms = if self.frames == 0 {
            0.0
        } else {
            (self.frame_time_sum.as_secs_f32() / self.frames as f32) * 1000.0
        };

        let snapshot = LoopMetricsSnapshot {
            fps: self.frames as f32 / elapsed_seconds,
            frame_time_ms,
        };

        self.interval_start = now;
        self.frames = 0;
        self.frame_time_sum = Duration::ZERO;

        Some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_snapshot_before_interval_elapses() {
        let start = Instant::now();
        let mut metrics = MetricsAccumulator::starting_at(start, Duration::from_secs(1));
        metrics.record_frame(Duration::from_millis(16));

        assert!(metrics
            .maybe_snapshot(start + Duration::from_millis(500))
            .is_none());
    }

    #[test]
    fn snapshot_averages_frame_time_and_resets() {
        let start = Instant::now();
        let mut metrics = MetricsAccumulator::starting_at(start, Duration::from_secs(1));
        metrics.record_frame(Duration::from_millis(10));
        metrics.record_frame(Duration::from_millis(30));

        let snapshot = metrics
            .maybe_snapshot(start + Duration::from_secs(1))
            .expect("snapshot");
        assert!((snapshot.fps - 2.0).abs() < 0.001);
        assert!((snapshot.frame_time_ms - 20.0).abs() < 0.001);

        let empty = metrics
            .maybe_snapshot(start + Duration::from_secs(2))
            .expect("second snapshot");
        assert_eq!(empty.frame_time_ms, 0.0);
        assert_eq!(empty.fps, 0.0);
    }
}
