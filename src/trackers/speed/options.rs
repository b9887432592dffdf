use crate::trackers::speed::timing::Band;

/// Default distance below which a detection continues an existing identity
pub const DEFAULT_MATCHING_RADIUS: f32 = 70.0;
/// Default rows of the start line
pub const DEFAULT_START_BAND: (i32, i32) = (410, 430);
/// Default rows of the end line
pub const DEFAULT_END_BAND: (i32, i32) = (235, 255);
/// Default pixel distance between the start and the end lines
pub const DEFAULT_REFERENCE_DISTANCE: f64 = 200.0;
/// Default speed limit, px/s
pub const DEFAULT_SPEED_LIMIT: i64 = 150;
/// Default maximum number of identities the tracker allocates
pub const DEFAULT_MAX_IDENTITIES: usize = 1000;

/// Class that is used to configure the speed tracker
///
#[derive(Debug, Clone)]
pub struct SpeedTrackerOptions {
    pub(crate) matching_radius: f32,
    pub(crate) start_band: Band,
    pub(crate) end_band: Band,
    pub(crate) reference_distance: f64,
    pub(crate) speed_limit: i64,
    pub(crate) max_identities: Option<usize>,
    pub(crate) min_plausible_elapsed: f64,
}

impl Default for SpeedTrackerOptions {
    fn default() -> Self {
        Self {
            matching_radius: DEFAULT_MATCHING_RADIUS,
            start_band: Band::new(DEFAULT_START_BAND.0, DEFAULT_START_BAND.1),
            end_band: Band::new(DEFAULT_END_BAND.0, DEFAULT_END_BAND.1),
            reference_distance: DEFAULT_REFERENCE_DISTANCE,
            speed_limit: DEFAULT_SPEED_LIMIT,
            max_identities: Some(DEFAULT_MAX_IDENTITIES),
            min_plausible_elapsed: 0.0,
        }
    }
}

impl SpeedTrackerOptions {
    /// The distance in pixels between centroids of consecutive frames that is still
    /// considered the same object. The comparison is strict.
    ///
    pub fn matching_radius(mut self, radius: f32) -> Self {
        assert!(radius > 0.0, "Matching radius must be a positive number");
        self.matching_radius = radius;
        self
    }

    /// Rows of the line where the timer starts
    ///
    pub fn start_band(mut self, low: i32, high: i32) -> Self {
        self.start_band = Band::new(low, high);
        self
    }

    /// Rows of the line where the timer stops. Objects whose centroid goes above
    /// `low` become eligible for the capture.
    ///
    pub fn end_band(mut self, low: i32, high: i32) -> Self {
        self.end_band = Band::new(low, high);
        self
    }

    /// The distance in pixels the object travels between the lines
    ///
    pub fn reference_distance(mut self, distance: f64) -> Self {
        assert!(
            distance > 0.0,
            "Reference distance must be a positive number"
        );
        self.reference_distance = distance;
        self
    }

    /// Speed limit in px/s. Captured speeds above it are counted as exceeding.
    ///
    pub fn speed_limit(mut self, limit: i64) -> Self {
        self.speed_limit = limit;
        self
    }

    /// The maximum number of identities allocated during the stream. Detections that
    /// require a new identity after the limit is reached are rejected.
    ///
    pub fn max_identities(mut self, n: usize) -> Self {
        assert!(n > 0, "Identity capacity must be a positive number");
        self.max_identities = Some(n);
        self
    }

    /// Removes the identity capacity limit
    ///
    pub fn unbounded(mut self) -> Self {
        self.max_identities = None;
        self
    }

    /// Elapsed times below the value are reported as invalid by `checked_speed_of`
    ///
    pub fn min_plausible_elapsed(mut self, secs: f64) -> Self {
        assert!(secs >= 0.0, "Plausible elapsed time must not be negative");
        self.min_plausible_elapsed = secs;
        self
    }

    pub fn get_matching_radius(&self) -> f32 {
        self.matching_radius
    }

    pub fn get_start_band(&self) -> Band {
        self.start_band
    }

    pub fn get_end_band(&self) -> Band {
        self.end_band
    }

    pub fn get_reference_distance(&self) -> f64 {
        self.reference_distance
    }

    pub fn get_speed_limit(&self) -> i64 {
        self.speed_limit
    }

    pub fn get_max_identities(&self) -> Option<usize> {
        self.max_identities
    }

    pub fn get_min_plausible_elapsed(&self) -> f64 {
        self.min_plausible_elapsed
    }
}

#[cfg(test)]
mod tests {
    use crate::trackers::speed::options::SpeedTrackerOptions;
    use crate::trackers::speed::timing::Band;

    #[test]
    fn defaults() {
        let opts = SpeedTrackerOptions::default();
        assert_eq!(opts.get_matching_radius(), 70.0);
        assert_eq!(opts.get_start_band(), Band::new(410, 430));
        assert_eq!(opts.get_end_band(), Band::new(235, 255));
        assert_eq!(opts.get_reference_distance(), 200.0);
        assert_eq!(opts.get_speed_limit(), 150);
        assert_eq!(opts.get_max_identities(), Some(1000));
    }

    #[test]
    fn builder() {
        let opts = SpeedTrackerOptions::default()
            .matching_radius(30.0)
            .start_band(600, 620)
            .end_band(100, 120)
            .reference_distance(500.0)
            .speed_limit(90)
            .unbounded();
        assert_eq!(opts.get_matching_radius(), 30.0);
        assert_eq!(opts.get_start_band().low(), 600);
        assert_eq!(opts.get_end_band().high(), 120);
        assert_eq!(opts.get_reference_distance(), 500.0);
        assert_eq!(opts.get_speed_limit(), 90);
        assert_eq!(opts.get_max_identities(), None);
    }

    #[test]
    #[should_panic]
    fn zero_capacity() {
        SpeedTrackerOptions::default().max_identities(0);
    }

    #[test]
    #[should_panic]
    fn negative_radius() {
        SpeedTrackerOptions::default().matching_radius(-1.0);
    }
}
