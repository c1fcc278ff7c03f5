//! Frame timing for the animation driver.
//!
//! A thin clock over `std::time::Instant` providing the monotonically
//! increasing elapsed time pushed into the shader uniform each frame.

use std::time::Instant;

/// Elapsed/delta time tracking for the render loop.
#[derive(Debug)]
pub struct Clock {
    /// When the clock was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total elapsed time in seconds, cached at the last update.
    elapsed_secs: f32,
    /// Time between the last two updates in seconds.
    delta_secs: f32,
    /// Frames since start.
    frame_count: u64,
}

impl Clock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the clock. Call once per frame.
    ///
    /// Returns `(elapsed_time, delta_time)` for convenience.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.frame_count += 1;
        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time between the last two updates in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Reset the clock to zero.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_clock_new() {
        let clock = Clock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_clock_advances_monotonically() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(10));
        let (first, delta) = clock.update();
        assert!(first > 0.0);
        assert!(delta > 0.0);

        thread::sleep(Duration::from_millis(5));
        let (second, _) = clock.update();
        assert!(second > first);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_clock_reset() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(5));
        clock.update();
        clock.reset();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
    }
}
