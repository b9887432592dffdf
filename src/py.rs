use crate::trackers::speed::speed_py::{PySpeedTracker, PySpeedTrackerOptions};
use pyo3::prelude::*;

#[pymodule]
#[pyo3(name = "crossing_speed")]
fn crossing_speed(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();
    m.add_class::<PySpeedTrackerOptions>()?;
    m.add_class::<PySpeedTracker>()?;
    Ok(())
}
