use crate::error::AgentError;
use crate::storage::models::CompletedPartInfo;
use async_trait::async_trait;
use bytes::Bytes;

/// Primitive operations of an S3-compatible object store.
///
/// Keys are relative to the store's namespace; implementations apply any
/// prefix themselves.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str)
    -> Result<(), AgentError>;

    /// Starts a multipart upload and returns its upload id.
    async fn create_multipart(&self, key: &str, content_type: &str) -> Result<String, AgentError>;

    /// Sends one part and returns the store's ETag for it.
    async fn upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: i32,
        body: Bytes,
    ) -> Result<String, AgentError>;

    async fn complete_multipart(
        &self,
        key: &str,
        upload_id: &str,
        parts: Vec<CompletedPartInfo>,
    ) -> Result<(), AgentError>;

    /// Discards every part stored so far under `upload_id`.
    async fn abort_multipart(&self, key: &str, upload_id: &str) -> Result<(), AgentError>;
}
