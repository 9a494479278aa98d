//! File hierarchy service.
//!
//! Creation, lookup, paginated listing and blob reads for file records.
//! Every operation takes the already authenticated user id; the caller runs
//! the authorization guard first.

use std::path::PathBuf;
use std::sync::Arc;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use tracing::{info, warn};

use super::repository::FileRepository;
use super::storage::BlobStore;
use super::types::{parse_record_id, FileRecord, FileType, NewFileRecord, ParentRef};
use super::PAGE_SIZE;
use crate::db::Database;
use crate::{FilesError, Result};

/// Payload decoder: standard alphabet, padding optional.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Request data for creating a record.
///
/// Fields mirror the client payload; presence and shape are checked by
/// [`FileService::create`], not at construction.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// Display name.
    pub name: Option<String>,
    /// `folder`, `file` or `image`.
    pub file_type: Option<String>,
    /// Public flag, defaults to `false`.
    pub is_public: Option<bool>,
    /// Base64 payload. Ignored for folders.
    pub data: Option<String>,
    /// Parent folder id; absent or `"0"` means root.
    pub parent_id: Option<String>,
}

impl UploadRequest {
    /// Create a folder request.
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            file_type: Some("folder".to_string()),
            ..Default::default()
        }
    }

    /// Create a blob-backed request.
    pub fn blob(name: impl Into<String>, file_type: FileType, data: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            file_type: Some(file_type.as_str().to_string()),
            data: Some(data.into()),
            ..Default::default()
        }
    }

    /// Set the parent folder.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the public flag.
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    fn parsed_type(&self) -> Option<FileType> {
        self.file_type.as_deref().and_then(|t| t.parse().ok())
    }
}

type UploadCheck = fn(&UploadRequest) -> bool;

fn has_name(req: &UploadRequest) -> bool {
    req.name.as_deref().is_some_and(|n| !n.is_empty())
}

fn has_valid_type(req: &UploadRequest) -> bool {
    req.parsed_type().is_some()
}

fn has_data_unless_folder(req: &UploadRequest) -> bool {
    req.parsed_type() == Some(FileType::Folder) || req.data.as_deref().is_some_and(|d| !d.is_empty())
}

/// Field checks for [`FileService::create`], in the order they are reported.
const UPLOAD_CHECKS: &[(UploadCheck, &str)] = &[
    (has_name, "Missing name"),
    (has_valid_type, "Missing type"),
    (has_data_unless_folder, "Missing data"),
];

/// A blob together with the record it belongs to.
#[derive(Debug)]
pub struct BlobContent {
    /// Record metadata.
    pub record: FileRecord,
    /// Raw payload.
    pub content: Vec<u8>,
}

/// Parse a page number, treating anything invalid as page 0.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse().ok()).unwrap_or(0)
}

/// File hierarchy service.
#[derive(Debug, Clone)]
pub struct FileService {
    db: Arc<Database>,
    storage: BlobStore,
    max_upload_size: u64,
}

impl FileService {
    /// Create a new FileService.
    pub fn new(db: Arc<Database>, storage: BlobStore, max_upload_size: u64) -> Self {
        Self {
            db,
            storage,
            max_upload_size,
        }
    }

    /// Blob storage used by this service.
    pub fn storage(&self) -> &BlobStore {
        &self.storage
    }

    /// Largest accepted decoded payload, in bytes.
    pub fn max_upload_size(&self) -> u64 {
        self.max_upload_size
    }

    fn repo(&self) -> FileRepository<'_> {
        FileRepository::new(self.db.pool())
    }

    /// Create a folder, file or image record owned by `user_id`.
    ///
    /// Nothing is written unless every check passes. For blob-backed records
    /// the blob is written first and removed again if the record insert fails.
    pub async fn create(&self, user_id: i64, request: &UploadRequest) -> Result<FileRecord> {
        for (check, message) in UPLOAD_CHECKS {
            if !check(request) {
                return Err(FilesError::Validation((*message).to_string()));
            }
        }

        let name = request.name.clone().unwrap_or_default();
        let file_type = request
            .parsed_type()
            .ok_or_else(|| FilesError::Validation("Missing type".to_string()))?;
        let is_public = request.is_public.unwrap_or(false);
        let parent = self.resolve_parent(request.parent_id.as_deref()).await?;

        if !file_type.has_content() {
            let record = self
                .repo()
                .insert(NewFileRecord::folder(user_id, name, parent).with_public(is_public))
                .await?;
            info!(user_id, file_id = record.id, "Folder created");
            return Ok(record);
        }

        let content = self.decode_payload(request.data.as_deref().unwrap_or_default())?;
        let path = self.storage.store(&content).await?;
        let new = NewFileRecord::blob(
            user_id,
            name,
            file_type,
            parent,
            path.to_string_lossy().into_owned(),
        )
        .with_public(is_public);

        match self.repo().insert(new).await {
            Ok(record) => {
                info!(
                    user_id,
                    file_id = record.id,
                    size = content.len(),
                    "File uploaded"
                );
                Ok(record)
            }
            Err(e) => {
                self.discard_blob(path).await;
                Err(e)
            }
        }
    }

    /// Get a record owned by `user_id`.
    ///
    /// Unparseable ids and records owned by someone else are both
    /// [`FilesError::NotFound`].
    pub async fn get(&self, user_id: i64, id: &str) -> Result<FileRecord> {
        let id = parse_record_id(id).ok_or_else(not_found)?;
        self.repo()
            .find_owned(id, user_id)
            .await?
            .ok_or_else(not_found)
    }

    /// List one page of the records `user_id` owns directly under `parent_id`.
    ///
    /// Records are returned in creation order, [`PAGE_SIZE`] per page.
    pub async fn list(
        &self,
        user_id: i64,
        parent_id: Option<&str>,
        page: u32,
    ) -> Result<Vec<FileRecord>> {
        // An unparseable parent cannot match any record.
        let Some(parent) = parent_id.map_or(Some(ParentRef::Root), ParentRef::parse) else {
            return Ok(Vec::new());
        };

        let repo = self.repo();
        if repo.count_children(user_id, parent).await? == 0 {
            return Ok(Vec::new());
        }

        let offset = i64::from(page) * PAGE_SIZE;
        repo.list_children(user_id, parent, offset, PAGE_SIZE).await
    }

    /// Read the blob of a record.
    ///
    /// Public records are readable by anyone. Private records are readable
    /// only by their owner; to everyone else they look absent.
    pub async fn read_data(&self, viewer: Option<i64>, id: &str) -> Result<BlobContent> {
        let id = parse_record_id(id).ok_or_else(not_found)?;
        let record = self
            .repo()
            .find_by_id(id)
            .await?
            .filter(|r| r.is_public || viewer == Some(r.user_id))
            .ok_or_else(not_found)?;

        let Some(path) = record.local_path.as_deref() else {
            return Err(FilesError::Validation(
                "A folder doesn't have content".to_string(),
            ));
        };

        let content = self.storage.read(path).await?;
        Ok(BlobContent { record, content })
    }

    async fn resolve_parent(&self, parent_id: Option<&str>) -> Result<ParentRef> {
        let parent = match parent_id {
            None => return Ok(ParentRef::Root),
            Some(raw) => ParentRef::parse(raw).ok_or(FilesError::ParentNotFound)?,
        };

        let ParentRef::Id(id) = parent else {
            return Ok(ParentRef::Root);
        };

        // Parent existence is checked across all users.
        match self.repo().find_by_id(id).await? {
            None => Err(FilesError::ParentNotFound),
            Some(record) if record.file_type != FileType::Folder => {
                Err(FilesError::ParentNotFolder)
            }
            Some(_) => Ok(parent),
        }
    }

    fn decode_payload(&self, data: &str) -> Result<Vec<u8>> {
        // Line-wrapped payloads are accepted.
        let compact: Vec<u8> = data
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        let content = PAYLOAD_ENGINE
            .decode(compact)
            .map_err(|_| FilesError::Validation("Invalid data".to_string()))?;

        if content.len() as u64 > self.max_upload_size {
            return Err(FilesError::Validation("File too large".to_string()));
        }
        Ok(content)
    }

    async fn discard_blob(&self, path: PathBuf) {
        if let Err(e) = self.storage.remove(&path).await {
            warn!(path = %path.display(), error = %e, "Failed to remove orphaned blob");
        }
    }
}

fn not_found() -> FilesError {
    FilesError::NotFound("File".to_string())
}
