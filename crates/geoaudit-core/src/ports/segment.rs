//! Optional semantic-segmentation capability

use crate::error::Result;
use crate::models::{FeatureCollection, SegmentationSummary};

/// Best-effort segmentation port.
///
/// Unavailability is a normal, expected state: the orchestrator treats a
/// missing or failing segmenter as "no summary", never as an error.
pub trait Segmenter: Send + Sync {
    fn name(&self) -> &str;

    fn segment(&self, collection: &FeatureCollection) -> Result<SegmentationSummary>;
}
