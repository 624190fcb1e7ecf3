use std::thread;
use std::time::{Duration, Instant};

/// Paces the frame loop to a fixed target rate
#[derive(Clone, Debug)]
pub struct FrameClock {
    frame: Duration,
    next_frame: Instant,
}

impl FrameClock {
    pub fn new(fps: u32, now: Instant) -> Self {
        let frame = Duration::from_secs(1) / fps.max(1);
        FrameClock {
            frame,
            next_frame: now + frame,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Time left until the next frame boundary
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_frame.saturating_duration_since(now)
    }

    /// Moves the boundary one frame on; a late frame restarts the schedule from `now`
    fn advance(&mut self, now: Instant) {
        self.next_frame += self.frame;
        if self.next_frame < now {
            self.next_frame = now + self.frame;
        }
    }

    /// Blocks until the next frame boundary
    pub fn tick(&mut self) {
        let wait = self.remaining(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        self.advance(Instant::now());
    }
}

/// Counts frames over one-second windows
#[derive(Clone, Debug)]
pub struct FpsMeter {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl FpsMeter {
    pub fn new(now: Instant) -> Self {
        FpsMeter {
            frames_since_last_update: 0,
            last_fps_calculation: now,
            fps: 0.0,
        }
    }

    /// Records a presented frame and returns the latest rate
    pub fn record_frame(&mut self, now: Instant) -> f64 {
        self.frames_since_last_update += 1;
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
        self.fps
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_duration_matches_rate() {
        let clock = FrameClock::new(50, Instant::now());
        assert_eq!(clock.frame_duration(), Duration::from_millis(20));
    }

    #[test]
    fn remaining_counts_down_to_the_boundary() {
        let t0 = Instant::now();
        let clock = FrameClock::new(10, t0);
        assert_eq!(clock.remaining(t0), Duration::from_millis(100));
        assert_eq!(clock.remaining(t0 + Duration::from_millis(30)), Duration::from_millis(70));
        assert!(clock.remaining(t0 + Duration::from_millis(150)).is_zero());
    }

    #[test]
    fn late_frames_reset_the_schedule() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new(10, t0);
        clock.advance(t0 + Duration::from_millis(100));
        assert_eq!(clock.remaining(t0 + Duration::from_millis(100)), Duration::from_millis(100));

        let late = t0 + Duration::from_millis(1000);
        clock.advance(late);
        assert_eq!(clock.remaining(late), Duration::from_millis(100));
    }

    #[test]
    fn fps_updates_once_per_second() {
        let t0 = Instant::now();
        let mut meter = FpsMeter::new(t0);
        for i in 1..30 {
            assert_eq!(meter.record_frame(t0 + Duration::from_millis(i * 33)), 0.0);
        }
        let fps = meter.record_frame(t0 + Duration::from_secs(1));
        assert!((fps - 30.0).abs() < 1e-9);
        assert_eq!(meter.fps(), fps);
    }
}
