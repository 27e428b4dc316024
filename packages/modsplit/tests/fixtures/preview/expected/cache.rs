use std::collections::HashMap;

use super::FrameKey;

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
