//! File record repository.

use sqlx::FromRow;

use super::types::{FileRecord, FileType, NewFileRecord, ParentRef};
use crate::db::DbPool;
use crate::{FilesError, Result};

const SELECT_FILE: &str =
    "SELECT id, user_id, name, file_type, is_public, parent_id, local_path FROM files";

#[derive(Debug, FromRow)]
struct FileRow {
    id: i64,
    user_id: i64,
    name: String,
    file_type: String,
    is_public: bool,
    parent_id: Option<i64>,
    local_path: Option<String>,
}

impl TryFrom<FileRow> for FileRecord {
    type Error = FilesError;

    fn try_from(row: FileRow) -> Result<Self> {
        let file_type: FileType = row.file_type.parse().map_err(FilesError::Database)?;
        Ok(FileRecord {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            file_type,
            is_public: row.is_public,
            parent: ParentRef::from_db(row.parent_id),
            local_path: row.local_path,
        })
    }
}

/// Repository for file record operations.
pub struct FileRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> FileRepository<'a> {
    /// Create a new FileRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a record and return it with its assigned id.
    pub async fn insert(&self, new: NewFileRecord) -> Result<FileRecord> {
        if new.file_type.has_content() != new.local_path.is_some() {
            return Err(FilesError::Validation(format!(
                "{} records must {}have a local path",
                new.file_type,
                if new.file_type.has_content() { "" } else { "not " }
            )));
        }

        let result = sqlx::query(
            "INSERT INTO files (user_id, name, file_type, is_public, parent_id, local_path)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(new.user_id)
        .bind(&new.name)
        .bind(new.file_type.as_str())
        .bind(new.is_public)
        .bind(new.parent.as_db())
        .bind(&new.local_path)
        .execute(self.pool)
        .await?;

        Ok(new.into_record(result.last_insert_rowid()))
    }

    /// Get a record by id regardless of owner.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<FileRecord>> {
        let row = sqlx::query_as::<_, FileRow>(&format!("{SELECT_FILE} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(FileRecord::try_from).transpose()
    }

    /// Get a record by id only if `user_id` owns it.
    pub async fn find_owned(&self, id: i64, user_id: i64) -> Result<Option<FileRecord>> {
        let row =
            sqlx::query_as::<_, FileRow>(&format!("{SELECT_FILE} WHERE id = ? AND user_id = ?"))
                .bind(id)
                .bind(user_id)
                .fetch_optional(self.pool)
                .await?;

        row.map(FileRecord::try_from).transpose()
    }

    /// Count the records `user_id` owns directly under `parent`.
    pub async fn count_children(&self, user_id: i64, parent: ParentRef) -> Result<i64> {
        let count =
            sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE user_id = ? AND parent_id IS ?")
                .bind(user_id)
                .bind(parent.as_db())
                .fetch_one(self.pool)
                .await?;
        Ok(count)
    }

    /// List the records `user_id` owns directly under `parent`, in creation
    /// order.
    pub async fn list_children(
        &self,
        user_id: i64,
        parent: ParentRef,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<FileRecord>> {
        let rows = sqlx::query_as::<_, FileRow>(&format!(
            "{SELECT_FILE} WHERE user_id = ? AND parent_id IS ? ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(user_id)
        .bind(parent.as_db())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(FileRecord::try_from).collect()
    }

    /// Count all records.
    pub async fn count_all(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, UserRepository};

    async fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("alice@example.com", "hash"))
            .await
            .unwrap();
        (db, user.id)
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (db, user_id) = setup().await;
        let repo = FileRepository::new(db.pool());

        let folder = repo
            .insert(NewFileRecord::folder(user_id, "docs", ParentRef::Root))
            .await
            .unwrap();
        let file = repo
            .insert(
                NewFileRecord::blob(
                    user_id,
                    "a.txt",
                    FileType::File,
                    ParentRef::Id(folder.id),
                    "/tmp/blob",
                )
                .with_public(true),
            )
            .await
            .unwrap();

        let found = repo.find_by_id(file.id).await.unwrap().unwrap();
        assert_eq!(found, file);
        assert_eq!(found.parent, ParentRef::Id(folder.id));

        let found = repo.find_by_id(folder.id).await.unwrap().unwrap();
        assert_eq!(found.parent, ParentRef::Root);
        assert_eq!(found.local_path, None);
    }

    #[tokio::test]
    async fn test_insert_rejects_folder_with_path() {
        let (db, user_id) = setup().await;
        let repo = FileRepository::new(db.pool());

        let mut new = NewFileRecord::folder(user_id, "docs", ParentRef::Root);
        new.local_path = Some("/tmp/x".to_string());

        assert!(matches!(
            repo.insert(new).await,
            Err(FilesError::Validation(_))
        ));
        assert_eq!(repo.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_owned() {
        let (db, user_id) = setup().await;
        let repo = FileRepository::new(db.pool());
        let folder = repo
            .insert(NewFileRecord::folder(user_id, "docs", ParentRef::Root))
            .await
            .unwrap();

        assert!(repo.find_owned(folder.id, user_id).await.unwrap().is_some());
        assert!(repo
            .find_owned(folder.id, user_id + 1)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_children_pages_in_creation_order() {
        let (db, user_id) = setup().await;
        let repo = FileRepository::new(db.pool());

        for i in 0..5 {
            repo.insert(NewFileRecord::folder(user_id, format!("f{i}"), ParentRef::Root))
                .await
                .unwrap();
        }

        assert_eq!(
            repo.count_children(user_id, ParentRef::Root).await.unwrap(),
            5
        );

        let page = repo
            .list_children(user_id, ParentRef::Root, 2, 2)
            .await
            .unwrap();
        let names: Vec<_> = page.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["f2", "f3"]);
    }

    #[tokio::test]
    async fn test_list_children_filters_parent_and_owner() {
        let (db, user_id) = setup().await;
        let other = UserRepository::new(db.pool())
            .create(&NewUser::new("bob@example.com", "hash"))
            .await
            .unwrap();
        let repo = FileRepository::new(db.pool());

        let folder = repo
            .insert(NewFileRecord::folder(user_id, "docs", ParentRef::Root))
            .await
            .unwrap();
        repo.insert(NewFileRecord::folder(
            user_id,
            "nested",
            ParentRef::Id(folder.id),
        ))
        .await
        .unwrap();
        repo.insert(NewFileRecord::folder(other.id, "bob", ParentRef::Root))
            .await
            .unwrap();

        let root = repo
            .list_children(user_id, ParentRef::Root, 0, 20)
            .await
            .unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root[0].name, "docs");

        let nested = repo
            .list_children(user_id, ParentRef::Id(folder.id), 0, 20)
            .await
            .unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].name, "nested");
    }
}
