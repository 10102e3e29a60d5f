//! Upload Session Store: the files a user has dropped into the wizard.

use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::models::document::DocumentCategory;

/// A file as received from the client, before it is tagged and stored.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub filename: String,
    /// MIME type reported by the client. May be empty.
    pub mime_type: String,
    pub data: Bytes,
}

/// A stored upload. Owned exclusively by its `UploadStore`; dropping it
/// releases the payload backing the preview.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub id: String,
    pub filename: String,
    pub descriptor_id: String,
    pub category: DocumentCategory,
    pub mime_type: String,
    pub data: Bytes,
}

impl UploadedDocument {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

#[derive(Debug, Default)]
pub struct UploadStore {
    files: Vec<UploadedDocument>,
}

/// `{descriptor}-{unix millis}-{random}`. The random part keeps ids distinct
/// inside a single batch where the timestamp repeats.
fn generate_id(descriptor_id: &str) -> String {
    format!(
        "{descriptor_id}-{}-{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

impl UploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a batch in order, returning the generated ids.
    pub fn add_batch(
        &mut self,
        descriptor_id: &str,
        category: DocumentCategory,
        uploads: Vec<NewUpload>,
    ) -> Vec<String> {
        let mut ids = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let id = generate_id(descriptor_id);
            ids.push(id.clone());
            self.files.push(UploadedDocument {
                id,
                filename: upload.filename,
                descriptor_id: descriptor_id.to_string(),
                category,
                mime_type: upload.mime_type,
                data: upload.data,
            });
        }
        ids
    }

    /// Removes one file. Unknown ids are ignored. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        before != self.files.len()
    }

    pub fn get(&self, id: &str) -> Option<&UploadedDocument> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UploadedDocument> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of all stored payload sizes.
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(UploadedDocument::size).sum()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Cheap clone of every stored file (payloads are reference-counted).
    pub fn snapshot(&self) -> Vec<UploadedDocument> {
        self.files.clone()
    }
}
