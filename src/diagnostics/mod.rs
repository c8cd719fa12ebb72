//! Serializable reports produced by the extractor and the controllers.
//!
//! `TrackReport` explains a single vector extraction (threshold split,
//! region size, fit quality, per-stage timings). `WalkReport` records one
//! walk cycle. Both are plain data meant for JSON dumps next to the
//! diagnostic images.

pub mod timing;
pub mod track;
pub mod walk;

pub use timing::{StageTiming, TimingBreakdown};
pub use track::TrackReport;
pub use walk::WalkReport;
