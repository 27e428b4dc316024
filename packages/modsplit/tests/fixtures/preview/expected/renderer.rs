use super::cache::FrameCache;
use super::types::{PreviewStats, DEFAULT_MAX_PREVIEW_WIDTH};

/// Generates composited preview frames for the current timeline time.
pub struct PreviewRenderer {
    cache: FrameCache,
    stats: PreviewStats,
    max_width: u32,
}

impl PreviewRenderer {
    pub fn new() -> Self {
        Self {
            cache: FrameCache::new(64),
            stats: PreviewStats::default(),
            max_width: DEFAULT_MAX_PREVIEW_WIDTH,
        }
    }
}
