use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame, in seconds.
    pub dt: f64,

    /// Smoothed frames per second.
    pub fps: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Produces `FrameTime` snapshots for one renderer.
///
/// Delta time is clamped so that a renderer left idle for a while (nothing
/// is drawn between option changes) does not report absurd rates.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    fps: f64,
    dt_min: Duration,
    dt_max: Duration,
}

/// Weight of the newest sample in the FPS moving average.
const SMOOTHING: f64 = 0.2;

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_secs(1))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: None,
            frame_index: 0,
            fps: 0.0,
            dt_min,
            dt_max,
        }
    }

    /// Forgets the previous frame so the next tick starts a new measurement.
    pub fn reset(&mut self) {
        self.last = None;
        self.fps = 0.0;
    }

    /// Advances the clock.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = match self.last {
            Some(last) => now
                .saturating_duration_since(last)
                .clamp(self.dt_min, self.dt_max)
                .as_secs_f64(),
            None => 0.0,
        };
        self.last = Some(now);

        if dt > 0.0 {
            let rate = 1.0 / dt;
            self.fps = if self.fps == 0.0 {
                rate
            } else {
                self.fps + SMOOTHING * (rate - self.fps)
            };
        }

        let ft = FrameTime {
            dt,
            fps: self.fps,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_no_rate() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_at(Instant::now());
        assert_eq!(ft.dt, 0.0);
        assert_eq!(ft.fps, 0.0);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn second_tick_measures_rate() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick_at(start);
        let ft = clock.tick_at(start + Duration::from_millis(20));
        assert!((ft.fps - 50.0).abs() < 1e-9);
        assert_eq!(ft.frame_index, 1);
    }

    #[test]
    fn long_pauses_are_clamped() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(500));
        let start = Instant::now();
        clock.tick_at(start);
        let ft = clock.tick_at(start + Duration::from_secs(30));
        assert!((ft.dt - 0.5).abs() < 1e-9);
    }
}
