use std::path::PathBuf;

pub(crate) struct PendingDecode {
    path: PathBuf,
    time: f64,
}
