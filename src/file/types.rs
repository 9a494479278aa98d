//! File record types.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Kind of a file record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// A container for other records. Never has a blob.
    Folder,
    /// An arbitrary binary payload.
    File,
    /// An image payload.
    Image,
}

impl FileType {
    /// Convert to the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Folder => "folder",
            FileType::File => "file",
            FileType::Image => "image",
        }
    }

    /// Whether records of this type are backed by a blob.
    pub fn has_content(&self) -> bool {
        !matches!(self, FileType::Folder)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "folder" => Ok(FileType::Folder),
            "file" => Ok(FileType::File),
            "image" => Ok(FileType::Image),
            _ => Err(format!("unknown file type: {s}")),
        }
    }
}

/// Reference from a record to its parent.
///
/// `Root` is the sentinel meaning "no parent folder". It is stored as NULL
/// and rendered as `0` on the wire; a folder reference is rendered as its id
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParentRef {
    /// Top level.
    #[default]
    Root,
    /// The folder record with this id.
    Id(i64),
}

impl ParentRef {
    /// Parse a parent reference received from a client.
    ///
    /// Empty and `"0"` mean root. Anything that is not a positive integer
    /// cannot name an existing record and yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "" | "0" => Some(ParentRef::Root),
            s => s.parse::<i64>().ok().filter(|id| *id > 0).map(ParentRef::Id),
        }
    }

    /// Column value for this reference.
    pub fn as_db(&self) -> Option<i64> {
        match self {
            ParentRef::Root => None,
            ParentRef::Id(id) => Some(*id),
        }
    }

    /// Build a reference from a column value.
    pub fn from_db(value: Option<i64>) -> Self {
        value.map_or(ParentRef::Root, ParentRef::Id)
    }
}

impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParentRef::Root => serializer.serialize_u8(0),
            ParentRef::Id(id) => serializer.serialize_str(&id.to_string()),
        }
    }
}

/// Parse a record id received from a client.
pub fn parse_record_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// A file, image or folder record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Record ID, assigned at insertion and never reused.
    pub id: i64,
    /// Owner.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Record kind.
    pub file_type: FileType,
    /// Whether the blob may be read by anyone.
    pub is_public: bool,
    /// Parent folder.
    pub parent: ParentRef,
    /// Blob location. Set iff `file_type` has content.
    pub local_path: Option<String>,
}

/// Data for inserting a new record.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    /// Owner.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Record kind.
    pub file_type: FileType,
    /// Whether the blob may be read by anyone.
    pub is_public: bool,
    /// Parent folder.
    pub parent: ParentRef,
    /// Blob location.
    pub local_path: Option<String>,
}

impl NewFileRecord {
    /// Create a folder record.
    pub fn folder(user_id: i64, name: impl Into<String>, parent: ParentRef) -> Self {
        Self {
            user_id,
            name: name.into(),
            file_type: FileType::Folder,
            is_public: false,
            parent,
            local_path: None,
        }
    }

    /// Create a blob-backed record.
    pub fn blob(
        user_id: i64,
        name: impl Into<String>,
        file_type: FileType,
        parent: ParentRef,
        local_path: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            file_type,
            is_public: false,
            parent,
            local_path: Some(local_path.into()),
        }
    }

    /// Set the public flag.
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Attach the id assigned by the store.
    pub fn into_record(self, id: i64) -> FileRecord {
        FileRecord {
            id,
            user_id: self.user_id,
            name: self.name,
            file_type: self.file_type,
            is_public: self.is_public,
            parent: self.parent,
            local_path: self.local_path,
        }
    }
}
