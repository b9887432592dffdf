use crate::trackers;

pub use crate::clock::{Clock, FrameRateClock, ManualClock, SystemClock};
pub use crate::utils::bbox::BoundingBox;
pub use trackers::speed::chart::SpeedChart;
pub use trackers::speed::dataset::{Dataset, SpeedRecord};
pub use trackers::speed::options::SpeedTrackerOptions;
pub use trackers::speed::{FrameReport, FrameTracks, SpeedTrack, SpeedTracker};

pub use crate::Errors;
