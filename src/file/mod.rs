//! File management module.
//!
//! This module provides the per-user file hierarchy:
//! - Folder, file and image records forming a forest per user
//! - Blob storage with UUID naming
//! - Ordered upload validation and owner-scoped reads

mod repository;
mod service;
mod storage;
mod types;

pub use repository::FileRepository;
pub use service::{parse_page, BlobContent, FileService, UploadRequest};
pub use storage::BlobStore;
pub use types::{parse_record_id, FileRecord, FileType, NewFileRecord, ParentRef};

/// Number of records per listing page.
pub const PAGE_SIZE: i64 = 20;

/// Storage root used when none is configured.
pub const DEFAULT_FOLDER_PATH: &str = "/tmp/files_manager";

/// Default maximum decoded upload size in megabytes.
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: u64 = 10;

/// Default maximum decoded upload size in bytes.
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = DEFAULT_MAX_UPLOAD_SIZE_MB * 1024 * 1024;
