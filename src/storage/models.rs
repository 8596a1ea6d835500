use bytes::Bytes;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// One object headed for the remote store.
#[derive(Debug, Clone)]
pub struct ObjectUpload {
    pub key: String,
    pub body: Bytes,
    pub content_type: String,
}

impl ObjectUpload {
    pub fn new(key: impl Into<String>, body: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        ObjectUpload {
            key: key.into(),
            body: body.into(),
            content_type: content_type
                .filter(|ct| !ct.trim().is_empty())
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string(),
        }
    }
}

/// A part acknowledged by the store during a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedPartInfo {
    pub part_number: i32,
    pub etag: String,
}
