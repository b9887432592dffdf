use crate::clock::{Clock, SystemClock};
use crate::trackers::speed::chart::SpeedChart;
use crate::trackers::speed::dataset::{Dataset, SpeedRecord};
use crate::trackers::speed::matcher::CentroidMatcher;
use crate::trackers::speed::options::SpeedTrackerOptions;
use crate::trackers::speed::timing::TrackState;
use crate::utils::bbox::{BoundingBox, Centroid};
use crate::Errors;
use anyhow::Result;
use itertools::Itertools;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Greedy centroid matching of detections to identities
pub mod matcher;

/// Start/end bands and per-identity timing state
pub mod timing;

/// Tracker configuration
pub mod options;

/// Captured speed records
pub mod dataset;

/// Text bar chart of the captured speeds
pub mod chart;

#[cfg(feature = "python")]
pub mod speed_py;


/// Detection annotated with the identity assigned in the current frame
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedTrack {
    /// id of the track
    pub id: u64,
    /// the bbox passed by the detector
    pub bbox: BoundingBox,
}

/// Detection the tracker refused to assign an identity to
///
#[derive(Debug, Clone)]
pub struct RejectedDetection {
    pub bbox: BoundingBox,
    pub reason: Errors,
}

/// Outcome of `SpeedTracker::update` for one frame
///
#[derive(Debug, Clone, Default)]
pub struct FrameTracks {
    /// accepted detections in the input order
    pub tracks: Vec<SpeedTrack>,
    /// detections dropped because no identity could be allocated
    pub rejected: Vec<RejectedDetection>,
}

/// Track of the frame with its current speed and the capture made for it, if any
///
#[derive(Debug, Clone)]
pub struct FrameObservation {
    pub track: SpeedTrack,
    /// current speed, px/s, 0 until measured
    pub speed: i64,
    /// the current speed reached the speed limit
    pub over_limit: bool,
    /// the record finalized for the track during this frame
    pub captured: Option<SpeedRecord>,
}

/// Outcome of `SpeedTracker::step` for one frame
///
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub observations: Vec<FrameObservation>,
    pub rejected: Vec<RejectedDetection>,
}

/// Tracker that assigns identities to per-frame detections and measures the time
/// each identity needs to get from the start band to the end band
///
/// The tracker must be fed with the frames of a single stream in order. The
/// timestamps are taken from the clock `C`, the wall clock by default.
///
pub struct SpeedTracker<C: Clock = SystemClock> {
    opts: SpeedTrackerOptions,
    clock: C,
    matcher: CentroidMatcher,
    states: HashMap<u64, TrackState>,
    next_id: u64,
    dataset: Dataset,
    finished: bool,
}

impl Default for SpeedTracker<SystemClock> {
    fn default() -> Self {
        Self::new(SpeedTrackerOptions::default())
    }
}

impl SpeedTracker<SystemClock> {
    /// Creates new tracker that measures time with the wall clock
    ///
    pub fn new(opts: SpeedTrackerOptions) -> Self {
        Self::with_clock(opts, SystemClock)
    }
}

impl<C: Clock> SpeedTracker<C> {
    /// Creates new tracker
    ///
    /// # Parameters
    /// * `opts` - tracker options
    /// * `clock` - the source of timestamps for band observations
    ///
    /// Panics when the start and end bands share rows.
    ///
    pub fn with_clock(opts: SpeedTrackerOptions, clock: C) -> Self {
        assert!(
            !opts.start_band.overlaps(&opts.end_band),
            "Start band and end band must not overlap"
        );
        Self {
            matcher: CentroidMatcher::new(opts.matching_radius),
            opts,
            clock,
            states: HashMap::default(),
            next_id: 0,
            dataset: Dataset::default(),
            finished: false,
        }
    }

    pub fn options(&self) -> &SpeedTrackerOptions {
        &self.opts
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn allocate_identity(&mut self, centroid: Centroid) -> Result<u64, Errors> {
        if let Some(capacity) = self.opts.max_identities {
            if self.states.len() >= capacity {
                return Err(Errors::CapacityExceeded { capacity });
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.states.insert(id, TrackState::new(centroid));
        debug!("New identity {} at ({}, {})", id, centroid.x, centroid.y);
        Ok(id)
    }

    /// Assigns identities to the detections of the next frame
    ///
    /// Every detection either continues the first live identity found within the
    /// matching radius or gets a new identity. The band rules are applied to each
    /// accepted detection. When the identity capacity is exhausted, detections that
    /// need a new identity are rejected and the rest of the frame is processed as usual.
    ///
    /// # Parameters
    /// * `detections` - bounding boxes received from a detector
    ///
    pub fn update(&mut self, detections: &[BoundingBox]) -> Result<FrameTracks> {
        if self.finished {
            return Err(Errors::StreamFinished.into());
        }

        let now = self.clock.now();
        let mut res = FrameTracks::default();

        for bbox in detections {
            let centroid = bbox.centroid();
            let id = match self.matcher.find(&centroid) {
                Some(id) => {
                    self.matcher.refresh(id, centroid);
                    id
                }
                None => match self.allocate_identity(centroid) {
                    Ok(id) => {
                        self.matcher.insert(id, centroid);
                        id
                    }
                    Err(e) => {
                        warn!("Detection {:?} is dropped: {}", bbox, e);
                        res.rejected.push(RejectedDetection {
                            bbox: *bbox,
                            reason: e,
                        });
                        continue;
                    }
                },
            };

            if let Some(state) = self.states.get_mut(&id) {
                state.observe(centroid, &self.opts.start_band, &self.opts.end_band, now);
            }

            res.tracks.push(SpeedTrack { id, bbox: *bbox });
        }

        let emitted = res.tracks.iter().map(|t| t.id).collect_vec();
        self.matcher.retain_emitted(&emitted);
        self.clock.advance_frame();

        Ok(res)
    }

    /// Timing state of the identity
    ///
    pub fn track_state(&self, id: u64) -> Result<&TrackState> {
        Ok(self.states.get(&id).ok_or(Errors::UnknownIdentity(id))?)
    }

    fn track_state_mut(&mut self, id: u64) -> Result<&mut TrackState> {
        Ok(self.states.get_mut(&id).ok_or(Errors::UnknownIdentity(id))?)
    }

    /// Speed of the identity in px/s, 0 while it is not measured yet
    ///
    /// The value is not checked for plausibility: an object that visited the bands in
    /// reverse order has a negative speed.
    ///
    pub fn speed_of(&self, id: u64) -> Result<i64> {
        Ok(self.track_state(id)?.speed(self.opts.reference_distance))
    }

    /// Same as `speed_of`, but fails with `Errors::InvalidTiming` when the measured
    /// elapsed time is zero, negative or shorter than the configured plausible minimum
    ///
    pub fn checked_speed_of(&self, id: u64) -> Result<i64> {
        let state = self.track_state(id)?;
        match state.elapsed {
            Some(elapsed) if elapsed <= 0.0 || elapsed < self.opts.min_plausible_elapsed => {
                warn!("Identity {} has implausible elapsed time {}", id, elapsed);
                Err(Errors::InvalidTiming(elapsed).into())
            }
            _ => Ok(state.speed(self.opts.reference_distance)),
        }
    }

    /// The identity was observed above the end band since its last capture
    ///
    /// Capturing clears the flag, the next observation above the end band sets it
    /// again. Use `is_captured` to learn whether the speed was recorded.
    ///
    pub fn is_armed(&self, id: u64) -> Result<bool> {
        Ok(self.track_state(id)?.armed)
    }

    pub fn is_captured(&self, id: u64) -> Result<bool> {
        Ok(self.track_state(id)?.captured)
    }

    /// Records the speed of the identity unless it was recorded before
    ///
    /// Returns the new record or `None` when the identity is already captured.
    ///
    pub fn capture(&mut self, id: u64, speed: i64) -> Result<Option<SpeedRecord>> {
        let speed_limit = self.opts.speed_limit;
        let state = self.track_state_mut(id)?;
        if state.captured {
            return Ok(None);
        }

        state.captured = true;
        state.armed = false;

        let record = SpeedRecord { id, speed };
        self.dataset.push(record, speed_limit);
        debug!("Captured identity {} with speed {} px/s", id, speed);
        Ok(Some(record))
    }

    /// Captures the identity when it is armed and the speed is measured
    ///
    pub fn maybe_capture(&mut self, id: u64, speed: i64) -> Result<Option<SpeedRecord>> {
        if self.is_armed(id)? && speed != 0 {
            self.capture(id, speed)
        } else {
            Ok(None)
        }
    }

    /// Processes a frame the way a typical frame loop does: assigns identities, reads
    /// the speed of every track and captures the ones that are due
    ///
    pub fn step(&mut self, detections: &[BoundingBox]) -> Result<FrameReport> {
        let FrameTracks { tracks, rejected } = self.update(detections)?;
        let mut observations = Vec::with_capacity(tracks.len());

        for track in tracks {
            let speed = self.speed_of(track.id)?;
            let captured = self.maybe_capture(track.id, speed)?;
            observations.push(FrameObservation {
                track,
                speed,
                over_limit: self.is_over_limit(speed),
                captured,
            });
        }

        Ok(FrameReport {
            observations,
            rejected,
        })
    }

    pub fn speed_limit(&self) -> i64 {
        self.opts.speed_limit
    }

    /// The speed reached the configured limit, tracks with such speeds are highlighted
    pub fn is_over_limit(&self, speed: i64) -> bool {
        speed >= self.opts.speed_limit
    }

    /// Captured identities and their speeds in capture order
    ///
    pub fn dataset(&self) -> (Vec<u64>, Vec<i64>) {
        self.dataset.export()
    }

    pub fn records(&self) -> &[SpeedRecord] {
        self.dataset.records()
    }

    pub fn captured_count(&self) -> usize {
        self.dataset.len()
    }

    /// Number of captured records above the speed limit
    pub fn exceeded_count(&self) -> usize {
        self.dataset.exceeded()
    }

    /// Chart of the captured speeds against the speed limit
    ///
    pub fn chart(&self) -> Result<SpeedChart> {
        let (ids, speeds) = self.dataset();
        SpeedChart::new(&ids, &speeds, self.opts.speed_limit)
    }

    /// Identities seen in the last frame, in mapping order
    ///
    pub fn live_identities(&self) -> Vec<u64> {
        self.matcher.live().iter().map(|(id, _)| *id).collect()
    }

    /// Number of identities allocated since the creation or the last reset
    ///
    pub fn allocated_identities(&self) -> usize {
        self.states.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Ends the stream and returns the final dataset
    ///
    /// The dataset stays readable; further updates fail until `reset` is called.
    ///
    pub fn finish(&mut self) -> Dataset {
        if !self.finished {
            self.finished = true;
            info!(
                "Stream finished: {} identities tracked, {} speeds captured, {} above the limit of {} px/s",
                self.states.len(),
                self.dataset.len(),
                self.dataset.exceeded(),
                self.opts.speed_limit
            );
        }
        self.dataset.clone()
    }

    /// Drops all the identities, timing states and captured records
    ///
    pub fn reset(&mut self) {
        self.matcher.clear();
        self.states.clear();
        self.next_id = 0;
        self.dataset = Dataset::default();
        self.finished = false;
    }
}
