//! Database schema and migrations for the metadata store.
//!
//! Migrations are applied in order when the database is opened; the
//! schema_version table records how many have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    email       TEXT NOT NULL UNIQUE,    -- case-sensitive (BINARY collation)
    password    TEXT NOT NULL,           -- Argon2 hash
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: file and folder records
    r#"
CREATE TABLE files (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id),
    name        TEXT NOT NULL,
    file_type   TEXT NOT NULL CHECK (file_type IN ('folder', 'file', 'image')),
    is_public   INTEGER NOT NULL DEFAULT 0,
    parent_id   INTEGER REFERENCES files(id),  -- NULL for top-level records
    local_path  TEXT,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    CHECK ((file_type = 'folder') = (local_path IS NULL))
);

CREATE INDEX idx_files_owner_parent ON files(user_id, parent_id, id);
"#,
];
