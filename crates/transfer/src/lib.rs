//! Emission-segment driver: the outer loop that turns a packet budget
//! into parallel launches against a prepared source system.

pub mod segment;

pub use segment::{launch_all, run_segment, SegmentConfig};
