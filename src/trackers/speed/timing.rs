use crate::utils::bbox::Centroid;

/// Horizontal band of frame rows `[low, high]`, both ends included
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    low: i32,
    high: i32,
}

impl Band {
    pub fn new(low: i32, high: i32) -> Self {
        assert!(low <= high, "Band lower bound must not exceed the upper one");
        Self { low, high }
    }

    pub fn low(&self) -> i32 {
        self.low
    }

    pub fn high(&self) -> i32 {
        self.high
    }

    #[inline]
    pub fn contains(&self, y: i32) -> bool {
        (self.low..=self.high).contains(&y)
    }

    /// The bands share at least one row
    pub fn overlaps(&self, other: &Band) -> bool {
        self.low <= other.high && other.low <= self.high
    }

    /// The row lies strictly above the band (smaller y)
    #[inline]
    pub fn passed(&self, y: i32) -> bool {
        y < self.low
    }
}

/// Timing state of an identity
///
/// Lives from the first detection of the identity until the tracker is reset, even
/// when the identity drops out of the live centroid mapping.
///
#[derive(Debug, Clone, PartialEq)]
pub struct TrackState {
    /// Last known centroid
    pub centroid: Centroid,
    /// Time the identity was last observed inside the start band
    pub entry: Option<f64>,
    /// Time the identity was last observed inside the end band
    pub exit: Option<f64>,
    /// `exit - entry`, refreshed with every exit observation
    pub elapsed: Option<f64>,
    /// The identity passed the end band and its speed may be captured
    pub armed: bool,
    /// The speed of the identity was recorded
    pub captured: bool,
}

impl TrackState {
    pub fn new(centroid: Centroid) -> Self {
        Self {
            centroid,
            entry: None,
            exit: None,
            elapsed: None,
            armed: false,
            captured: false,
        }
    }

    /// Applies the band rules to the centroid observed at time `now`
    ///
    pub(crate) fn observe(&mut self, centroid: Centroid, start: &Band, end: &Band, now: f64) {
        self.centroid = centroid;
        let y = centroid.y;

        if start.contains(y) {
            self.entry = Some(now);
        }

        if end.contains(y) {
            self.exit = Some(now);
            // without an entry there is nothing to measure against
            self.elapsed = self.entry.map(|entry| now - entry);
        }

        if end.passed(y) {
            self.armed = true;
        }
    }

    /// Speed in pixels per second over `reference_distance`, truncated toward zero
    ///
    /// Zero while the elapsed time is unknown or equal to zero. Negative and very small
    /// elapsed times are passed through.
    ///
    pub fn speed(&self, reference_distance: f64) -> i64 {
        match self.elapsed {
            Some(elapsed) if elapsed != 0.0 => (reference_distance / elapsed).trunc() as i64,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::trackers::speed::timing::{Band, TrackState};
    use crate::utils::bbox::Centroid;

    fn bands() -> (Band, Band) {
        (Band::new(410, 430), Band::new(235, 255))
    }

    #[test]
    fn band_overlap() {
        let (start, end) = bands();
        assert!(!start.overlaps(&end));
        assert!(Band::new(240, 260).overlaps(&end));
        assert!(Band::new(255, 300).overlaps(&end));
        assert!(!Band::new(256, 300).overlaps(&end));
        assert!(end.overlaps(&Band::new(200, 235)));
    }

    #[test]
    fn band_bounds_are_inclusive() {
        let b = Band::new(235, 255);
        assert!(b.contains(235));
        assert!(b.contains(255));
        assert!(!b.contains(234));
        assert!(!b.contains(256));
        assert!(b.passed(234));
        assert!(!b.passed(235));
    }

    #[test]
    #[should_panic]
    fn inverted_band() {
        Band::new(10, 5);
    }

    #[test]
    fn entry_exit_elapsed() {
        let (start, end) = bands();
        let mut s = TrackState::new(Centroid::new(100, 500));
        s.observe(Centroid::new(100, 420), &start, &end, 10.0);
        assert_eq!(s.entry, Some(10.0));
        assert_eq!(s.speed(200.0), 0);

        s.observe(Centroid::new(100, 300), &start, &end, 11.0);
        assert_eq!(s.elapsed, None);

        s.observe(Centroid::new(100, 245), &start, &end, 12.0);
        assert_eq!(s.exit, Some(12.0));
        assert_eq!(s.elapsed, Some(2.0));
        assert_eq!(s.speed(200.0), 100);
        assert!(!s.armed);

        // last exit observation wins
        s.observe(Centroid::new(100, 240), &start, &end, 14.0);
        assert_eq!(s.elapsed, Some(4.0));
        assert_eq!(s.speed(200.0), 50);

        s.observe(Centroid::new(100, 234), &start, &end, 15.0);
        assert!(s.armed);
        assert_eq!(s.elapsed, Some(4.0));
    }

    #[test]
    fn exit_without_entry_is_unmeasured() {
        let (start, end) = bands();
        let mut s = TrackState::new(Centroid::new(0, 300));
        s.observe(Centroid::new(0, 250), &start, &end, 5.0);
        assert_eq!(s.exit, Some(5.0));
        assert_eq!(s.elapsed, None);
        assert_eq!(s.speed(200.0), 0);
    }

    #[test]
    fn reversed_crossing_gives_negative_speed() {
        let (start, end) = bands();
        let mut s = TrackState::new(Centroid::new(0, 100));
        s.observe(Centroid::new(0, 420), &start, &end, 1.0);
        s.observe(Centroid::new(0, 250), &start, &end, 3.0);
        s.observe(Centroid::new(0, 425), &start, &end, 4.0);
        s.observe(Centroid::new(0, 250), &start, &end, 2.0);
        assert_eq!(s.elapsed, Some(-2.0));
        assert_eq!(s.speed(200.0), -100);
    }

    #[test]
    fn speed_truncates() {
        let mut s = TrackState::new(Centroid::new(0, 0));
        s.elapsed = Some(1.96);
        assert_eq!(s.speed(200.0), 102);
        s.elapsed = Some(0.0);
        assert_eq!(s.speed(200.0), 0);
    }
}
