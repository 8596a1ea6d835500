use crate::storage::store::ObjectStore;
use std::path::PathBuf;
use std::sync::Arc;

pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub local_root: Option<PathBuf>,
    pub max_upload_bytes: usize,
}
