use crate::clock::SystemClock;
use crate::trackers::speed::options::{
    SpeedTrackerOptions, DEFAULT_END_BAND, DEFAULT_MATCHING_RADIUS, DEFAULT_MAX_IDENTITIES,
    DEFAULT_REFERENCE_DISTANCE, DEFAULT_SPEED_LIMIT, DEFAULT_START_BAND,
};
use crate::trackers::speed::SpeedTracker;
use crate::utils::bbox::BoundingBox;
use crate::Errors;
use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(e: anyhow::Error) -> PyErr {
    match e.downcast_ref::<Errors>() {
        Some(Errors::UnknownIdentity(id)) => PyKeyError::new_err(format!("Unknown identity {id}")),
        Some(Errors::InvalidTiming(_)) | Some(Errors::DatasetLengthMismatch { .. }) => {
            PyValueError::new_err(e.to_string())
        }
        _ => PyRuntimeError::new_err(e.to_string()),
    }
}

#[pyclass(name = "SpeedTrackerOptions")]
#[derive(Debug, Clone, Default)]
pub struct PySpeedTrackerOptions(pub(crate) SpeedTrackerOptions);

#[pymethods]
impl PySpeedTrackerOptions {
    #[new]
    #[pyo3(signature = (
        matching_radius = DEFAULT_MATCHING_RADIUS,
        start_band = DEFAULT_START_BAND,
        end_band = DEFAULT_END_BAND,
        reference_distance = DEFAULT_REFERENCE_DISTANCE,
        speed_limit = DEFAULT_SPEED_LIMIT,
        max_identities = Some(DEFAULT_MAX_IDENTITIES),
        min_plausible_elapsed = 0.0
    ))]
    pub fn new(
        matching_radius: f32,
        start_band: (i32, i32),
        end_band: (i32, i32),
        reference_distance: f64,
        speed_limit: i64,
        max_identities: Option<usize>,
        min_plausible_elapsed: f64,
    ) -> Self {
        let opts = SpeedTrackerOptions::default()
            .matching_radius(matching_radius)
            .start_band(start_band.0, start_band.1)
            .end_band(end_band.0, end_band.1)
            .reference_distance(reference_distance)
            .speed_limit(speed_limit)
            .min_plausible_elapsed(min_plausible_elapsed);
        Self(match max_identities {
            Some(n) => opts.max_identities(n),
            None => opts.unbounded(),
        })
    }

    #[classattr]
    const __hash__: Option<Py<PyAny>> = None;

    fn __repr__(&self) -> String {
        format!("{:?}", self.0)
    }

    fn __str__(&self) -> String {
        format!("{:#?}", self.0)
    }
}

#[pyclass(name = "SpeedTracker")]
pub struct PySpeedTracker(pub(crate) SpeedTracker<SystemClock>);

#[pymethods]
impl PySpeedTracker {
    #[new]
    #[pyo3(signature = (opts = None))]
    pub fn new(opts: Option<PySpeedTrackerOptions>) -> Self {
        Self(SpeedTracker::new(opts.map(|o| o.0).unwrap_or_default()))
    }

    /// Assigns identities to the boxes `(x, y, width, height)` of the next frame
    ///
    /// Returns `(x, y, width, height, id)` for every accepted box in the input order.
    ///
    #[pyo3(text_signature = "($self, detections)")]
    pub fn update(
        &mut self,
        detections: Vec<(i32, i32, i32, i32)>,
    ) -> PyResult<Vec<(i32, i32, i32, i32, u64)>> {
        let boxes = detections
            .into_iter()
            .map(BoundingBox::from)
            .collect::<Vec<_>>();
        let res = self.0.update(&boxes).map_err(to_py_err)?;
        Ok(res
            .tracks
            .into_iter()
            .map(|t| {
                let (x, y, w, h) = t.bbox.as_tuple();
                (x, y, w, h, t.id)
            })
            .collect())
    }

    #[pyo3(text_signature = "($self, id)")]
    pub fn speed_of(&self, id: u64) -> PyResult<i64> {
        self.0.speed_of(id).map_err(to_py_err)
    }

    #[pyo3(text_signature = "($self, id)")]
    pub fn checked_speed_of(&self, id: u64) -> PyResult<i64> {
        self.0.checked_speed_of(id).map_err(to_py_err)
    }

    #[pyo3(text_signature = "($self, id)")]
    pub fn is_armed(&self, id: u64) -> PyResult<bool> {
        self.0.is_armed(id).map_err(to_py_err)
    }

    /// Records the speed once, returns `True` when a new record was made
    ///
    #[pyo3(text_signature = "($self, id, speed)")]
    pub fn capture(&mut self, id: u64, speed: i64) -> PyResult<bool> {
        Ok(self.0.capture(id, speed).map_err(to_py_err)?.is_some())
    }

    #[pyo3(text_signature = "($self, id, speed)")]
    pub fn maybe_capture(&mut self, id: u64, speed: i64) -> PyResult<bool> {
        Ok(self.0.maybe_capture(id, speed).map_err(to_py_err)?.is_some())
    }

    pub fn speed_limit(&self) -> i64 {
        self.0.speed_limit()
    }

    pub fn dataset(&self) -> (Vec<u64>, Vec<i64>) {
        self.0.dataset()
    }

    pub fn captured_count(&self) -> usize {
        self.0.captured_count()
    }

    pub fn exceeded_count(&self) -> usize {
        self.0.exceeded_count()
    }

    pub fn chart(&self) -> PyResult<String> {
        Ok(self.0.chart().map_err(to_py_err)?.to_string())
    }

    pub fn finish(&mut self) -> (Vec<u64>, Vec<i64>) {
        self.0.finish().export()
    }

    pub fn reset(&mut self) {
        self.0.reset()
    }
}
