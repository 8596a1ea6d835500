use crate::error::AgentError;
use crate::storage::models::CompletedPartInfo;
use crate::storage::store::ObjectStore;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

#[derive(Default)]
struct MemoryState {
    objects: HashMap<String, (Bytes, String)>,
    pending: HashMap<String, (String, String, BTreeMap<i32, Bytes>)>,
    aborted: Vec<String>,
    started: usize,
}

/// In-process store for tests. Objects only become visible on a completed
/// put or multipart completion.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    fail_part: Option<i32>,
    fail_put: bool,
}

impl MemoryStore {
    pub fn failing_on_part(part_number: i32) -> Self {
        MemoryStore {
            fail_part: Some(part_number),
            ..Default::default()
        }
    }

    pub fn failing_puts() -> Self {
        MemoryStore {
            fail_put: true,
            ..Default::default()
        }
    }

    pub fn object(&self, key: &str) -> Option<(Bytes, String)> {
        self.state.lock().unwrap().objects.get(key).cloned()
    }

    pub fn pending_uploads(&self) -> usize {
        self.state.lock().unwrap().pending.len()
    }

    pub fn multipart_started(&self) -> usize {
        self.state.lock().unwrap().started
    }

    pub fn aborted(&self) -> Vec<String> {
        self.state.lock().unwrap().aborted.clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), AgentError> {
        if self.fail_put {
            return Err(AgentError::Upload("store unavailable".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        state
            .objects
            .insert(key.to_string(), (body, content_type.to_string()));
        Ok(())
    }

    async fn create_multipart(&self, key: &str, content_type: &str) -> Result<String, AgentError> {
        let mut state = self.state.lock().unwrap();
        state.started += 1;
        let upload_id = format!("upload-{}", state.started);
        state.pending.insert(
            upload_id.clone(),
            (key.to_string(), content_type.to_string(), BTreeMap::new()),
        );
        Ok(upload_id)
    }

    async fn upload_part(
        &self,
        _key: &str,
        upload_id: &str,
        part_number: i32,
        body: Bytes,
    ) -> Result<String, AgentError> {
        if self.fail_part == Some(part_number) {
            return Err(AgentError::Upload(format!("connection reset on part {part_number}")));
        }
        let mut state = self.state.lock().unwrap();
        let (_, _, parts) = state
            .pending
            .get_mut(upload_id)
            .ok_or_else(|| AgentError::Upload(format!("no such upload {upload_id}")))?;
        parts.insert(part_number, body);
        Ok(format!("etag-{part_number}"))
    }

    async fn complete_multipart(
        &self,
        _key: &str,
        upload_id: &str,
        parts: Vec<CompletedPartInfo>,
    ) -> Result<(), AgentError> {
        let mut state = self.state.lock().unwrap();
        let (key, content_type, stored) = state
            .pending
            .remove(upload_id)
            .ok_or_else(|| AgentError::Upload(format!("no such upload {upload_id}")))?;

        let mut body = BytesMut::new();
        for part in parts {
            let chunk = stored
                .get(&part.part_number)
                .ok_or_else(|| AgentError::Upload(format!("missing part {}", part.part_number)))?;
            body.extend_from_slice(chunk);
        }
        state.objects.insert(key, (body.freeze(), content_type));
        Ok(())
    }

    async fn abort_multipart(&self, key: &str, upload_id: &str) -> Result<(), AgentError> {
        let mut state = self.state.lock().unwrap();
        state.pending.remove(upload_id);
        state.aborted.push(key.to_string());
        Ok(())
    }
}
