use std::path::PathBuf;

const DEFAULT_MAX_PREVIEW_WIDTH: u32 = 1280;
const DEFAULT_MAX_PREVIEW_HEIGHT: u32 = 720;

#[derive(Debug, Default, Clone, Copy)]
pub struct PreviewStats {
    pub frames_rendered: u64,
    pub cache_hits: u64,
}

pub type FrameKey = (PathBuf, i64);
