use crate::error::AgentError;
use crate::storage::models::{CompletedPartInfo, ObjectUpload};
use crate::storage::store::ObjectStore;

/// Payloads above this size are sent as a multipart upload.
pub const PART_SIZE: usize = 5 * 1024 * 1024;

pub async fn upload_object(store: &dyn ObjectStore, upload: &ObjectUpload) -> Result<(), AgentError> {
    upload_in_parts(store, upload, PART_SIZE).await
}

/// Writes `upload` in one put, or in `part_size` chunks when larger.
///
/// A failed multipart transfer is aborted before the error is returned, so no
/// parts stay behind under the key.
pub async fn upload_in_parts(
    store: &dyn ObjectStore,
    upload: &ObjectUpload,
    part_size: usize,
) -> Result<(), AgentError> {
    let part_size = part_size.max(1);
    if upload.body.len() <= part_size {
        return store
            .put_object(&upload.key, upload.body.clone(), &upload.content_type)
            .await;
    }

    let upload_id = store.create_multipart(&upload.key, &upload.content_type).await?;
    log::info!(
        "multipart upload {upload_id} started for {} ({} bytes)",
        upload.key,
        upload.body.len()
    );

    match send_parts(store, upload, &upload_id, part_size).await {
        Ok(()) => Ok(()),
        Err(err) => {
            log::error!("multipart upload {upload_id} for {} failed: {err}", upload.key);
            if let Err(abort_err) = store.abort_multipart(&upload.key, &upload_id).await {
                log::error!("abort of {upload_id} for {} failed: {abort_err}", upload.key);
            }
            Err(err)
        }
    }
}

async fn send_parts(
    store: &dyn ObjectStore,
    upload: &ObjectUpload,
    upload_id: &str,
    part_size: usize,
) -> Result<(), AgentError> {
    let len = upload.body.len();
    let mut parts = Vec::with_capacity(len.div_ceil(part_size));

    for (idx, offset) in (0..len).step_by(part_size).enumerate() {
        let end = (offset + part_size).min(len);
        let part_number = idx as i32 + 1;
        let etag = store
            .upload_part(&upload.key, upload_id, part_number, upload.body.slice(offset..end))
            .await?;
        parts.push(CompletedPartInfo { part_number, etag });
    }

    store.complete_multipart(&upload.key, upload_id, parts).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    fn upload(key: &str, len: usize) -> ObjectUpload {
        let body: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        ObjectUpload::new(key, body, Some("application/pdf"))
    }

    #[tokio::test]
    async fn small_payload_is_a_single_put() {
        let store = MemoryStore::default();
        let object = upload("Report1.pdf", 10);

        upload_in_parts(&store, &object, 16).await.unwrap();

        let (body, content_type) = store.object("Report1.pdf").unwrap();
        assert_eq!(body, object.body);
        assert_eq!(content_type, "application/pdf");
        assert_eq!(store.multipart_started(), 0);
    }

    #[tokio::test]
    async fn large_payload_is_reassembled_from_parts() {
        let store = MemoryStore::default();
        let object = upload("big.zip", 50);

        upload_in_parts(&store, &object, 16).await.unwrap();

        let (body, _) = store.object("big.zip").unwrap();
        assert_eq!(body, object.body);
        assert_eq!(store.multipart_started(), 1);
        assert_eq!(store.pending_uploads(), 0);
    }

    #[tokio::test]
    async fn failed_part_leaves_no_fragments() {
        let store = MemoryStore::failing_on_part(2);
        let object = upload("broken.zip", 50);

        let err = upload_in_parts(&store, &object, 16).await.unwrap_err();

        assert!(matches!(err, AgentError::Upload(_)));
        assert!(store.object("broken.zip").is_none());
        assert_eq!(store.pending_uploads(), 0);
        assert_eq!(store.aborted(), vec!["broken.zip".to_string()]);
    }

    #[tokio::test]
    async fn reupload_overwrites() {
        let store = MemoryStore::default();
        upload_in_parts(&store, &upload("same.bin", 4), 16).await.unwrap();
        upload_in_parts(&store, &upload("same.bin", 40), 16).await.unwrap();

        let (body, _) = store.object("same.bin").unwrap();
        assert_eq!(body.len(), 40);
    }
}
