use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the timestamps stored when an object passes the timing bands
///
/// The tracker asks for `now` while it processes a frame and calls
/// `advance_frame` once per `update`, after the frame is processed.
///
pub trait Clock: Send {
    /// Current time in seconds
    fn now(&self) -> f64;

    /// Notifies the clock that a frame was processed
    fn advance_frame(&mut self) {}
}

/// Wall clock, seconds since the UNIX epoch
///
/// Speed measured with it is pixels per real second spent processing, so a slow
/// consumer makes objects look slower than they are.
///
#[derive(Default, Clone, Debug)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default()
    }
}

/// Clock whose time is set by the caller
///
/// Clones share the same time value, so a copy can be kept outside the tracker to
/// drive it.
///
#[derive(Default, Clone, Debug)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start.to_bits())),
        }
    }

    pub fn set(&self, secs: f64) {
        self.bits.store(secs.to_bits(), Ordering::SeqCst);
    }

    pub fn advance(&self, secs: f64) {
        self.set(self.now() + secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

/// Clock derived from the number of processed frames and the stream frame rate
///
/// Makes the measured speed independent of how fast frames are processed.
///
#[derive(Clone, Debug)]
pub struct FrameRateClock {
    fps: f64,
    frame: u64,
}

impl FrameRateClock {
    pub fn new(fps: f64) -> Self {
        assert!(fps > 0.0, "Frame rate must be a positive number");
        Self { fps, frame: 0 }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Clock for FrameRateClock {
    fn now(&self) -> f64 {
        self.frame as f64 / self.fps
    }

    fn advance_frame(&mut self) {
        self.frame += 1;
    }
}

#[cfg(test)]
mod tests {
    use crate::clock::{Clock, FrameRateClock, ManualClock, SystemClock};

    #[test]
    fn manual_clock_is_shared() {
        let c = ManualClock::new(1.5);
        let driver = c.clone();
        assert_eq!(c.now(), 1.5);
        driver.set(10.0);
        assert_eq!(c.now(), 10.0);
        driver.advance(0.25);
        assert_eq!(c.now(), 10.25);
    }

    #[test]
    fn frame_rate_clock() {
        let mut c = FrameRateClock::new(25.0);
        assert_eq!(c.now(), 0.0);
        for _ in 0..50 {
            c.advance_frame();
        }
        assert_eq!(c.frame(), 50);
        assert!((c.now() - 2.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic]
    fn frame_rate_clock_zero_fps() {
        FrameRateClock::new(0.0);
    }

    #[test]
    fn system_clock_moves_forward() {
        let c = SystemClock;
        let t0 = c.now();
        assert!(t0 > 0.0);
        assert!(c.now() >= t0);
    }
}
