/// Tracker that measures the time objects need to get from one line to another
///
pub mod speed;
