use std::collections::HashMap;
use std::path::PathBuf;

const DEFAULT_MAX_PREVIEW_WIDTH: u32 = 1280;
const DEFAULT_MAX_PREVIEW_HEIGHT: u32 = 720;

#[derive(Debug, Default, Clone, Copy)]
pub struct PreviewStats {
    pub frames_rendered: u64,
    pub cache_hits: u64,
}

pub type FrameKey = (PathBuf, i64);

pub struct FrameCache {
    frames: HashMap<FrameKey, Vec<u8>>,
    capacity: usize,
}

impl FrameCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: HashMap::new(),
            capacity,
        }
    }

    pub fn get(&self, key: &FrameKey) -> Option<&[u8]> {
        self.frames.get(key).map(Vec::as_slice)
    }
}

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

pub(crate) struct PendingDecode {
    path: PathBuf,
    time: f64,
}

pub fn clamp_time(time: f64, duration: f64) -> f64 {
    time.clamp(0.0, duration)
}
