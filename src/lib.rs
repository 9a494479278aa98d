//! Files manager
//!
//! A multi-user file hierarchy service over HTTP: token sessions, folders,
//! files and images with blobs kept on the local filesystem.

pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use auth::{
    authenticate, hash_password, login, logout, register, verify_password, PasswordError,
    RegistrationRequest, SessionStore,
};
pub use cache::Cache;
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{FilesError, Result};
pub use file::{BlobStore, FileRecord, FileService, FileType, ParentRef, UploadRequest};
pub use web::{AppState, WebServer};
