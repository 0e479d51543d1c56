//! Class store: CRUD over the `classes` table.
//!
//! Each class is one row; its members live in a JSON column and are written back whole.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Class, Member, NewClass};

const CLASS_COLUMNS: &str =
    "id, name, code, git_repository, system_url, members, created_at, updated_at";

/// Database repository for class records.
#[derive(Clone)]
pub struct ClassRepository {
    pool: SqlitePool,
}

impl ClassRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new class, generating its id and timestamps.
    ///
    /// A name or code collision fails with [`AppError::Duplicate`] via the UNIQUE constraints.
    pub async fn insert(&self, new_class: NewClass) -> Result<Class, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let members_json = serde_json::to_string(&new_class.members)?;

        sqlx::query(
            "INSERT INTO classes (id, name, code, git_repository, system_url, members, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&new_class.name)
        .bind(&new_class.code)
        .bind(&new_class.git_repository)
        .bind(&new_class.system_url)
        .bind(&members_json)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Class {
            id,
            name: new_class.name,
            code: new_class.code,
            git_repository: new_class.git_repository,
            system_url: new_class.system_url,
            members: Some(new_class.members),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get a class by ID.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Class>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM classes WHERE id = ?", CLASS_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(class_from_row).transpose()
    }

    /// Get a class by its code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Class>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM classes WHERE code = ?",
            CLASS_COLUMNS
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(class_from_row).transpose()
    }

    /// Get any class whose name or code matches.
    pub async fn find_by_name_or_code(
        &self,
        name: &str,
        code: &str,
    ) -> Result<Option<Class>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM classes WHERE name = ? OR code = ? LIMIT 1",
            CLASS_COLUMNS
        ))
        .bind(name)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(class_from_row).transpose()
    }

    /// List all classes ordered by name.
    pub async fn list_all(&self) -> Result<Vec<Class>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM classes ORDER BY name ASC",
            CLASS_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(class_from_row).collect()
    }

    /// Overwrite the mutable fields of an existing class and refresh `updated_at`.
    ///
    /// Last write wins: there is no version check.
    pub async fn save(&self, class: &Class) -> Result<Class, AppError> {
        let now = Utc::now().to_rfc3339();
        let members_json = class
            .members
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            "UPDATE classes SET git_repository = ?, system_url = ?, members = ?, updated_at = ? WHERE id = ?"
        )
        .bind(&class.git_repository)
        .bind(&class.system_url)
        .bind(&members_json)
        .bind(&now)
        .bind(&class.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Class {} not found", class.id)));
        }

        Ok(Class {
            updated_at: now,
            ..class.clone()
        })
    }

    /// Delete a class, reporting whether a row was removed.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ==================== ROW MAPPING ====================

fn class_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Class, AppError> {
    let id: String = row.get("id");
    let members_json: Option<String> = row.get("members");

    let members = members_json
        .map(|json| parse_members(&id, &json))
        .transpose()?;

    Ok(Class {
        id,
        name: row.get("name"),
        code: row.get("code"),
        git_repository: row.get("git_repository"),
        system_url: row.get("system_url"),
        members,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn parse_members(class_id: &str, json: &str) -> Result<Vec<Member>, AppError> {
    serde_json::from_str(json).map_err(|e| {
        tracing::error!("Corrupt member list for class {}: {}", class_id, e);
        AppError::Database(format!("Corrupt member list for class {}", class_id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    async fn repo() -> (ClassRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .unwrap();
        (ClassRepository::new(pool), temp_dir)
    }

    fn new_class(name: &str, code: &str) -> NewClass {
        NewClass {
            name: name.to_string(),
            code: code.to_string(),
            git_repository: None,
            system_url: None,
            members: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let (repo, _dir) = repo().await;

        let class = repo.insert(new_class("BSIT 2A", "BSIT-2A")).await.unwrap();
        assert_eq!(class.members, Some(Vec::new()));
        assert_eq!(class.created_at, class.updated_at);

        let by_id = repo.find_by_id(&class.id).await.unwrap().unwrap();
        assert_eq!(by_id.code, "BSIT-2A");

        let by_code = repo.find_by_code("BSIT-2A").await.unwrap().unwrap();
        assert_eq!(by_code.id, class.id);

        assert!(repo
            .find_by_name_or_code("BSIT 2A", "other")
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .find_by_name_or_code("other", "BSIT-2A")
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .find_by_name_or_code("other", "other")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_unique_constraint_maps_to_duplicate() {
        let (repo, _dir) = repo().await;

        repo.insert(new_class("BSIT 2A", "BSIT-2A")).await.unwrap();
        let err = repo
            .insert(new_class("Another", "BSIT-2A"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));

        let err = repo
            .insert(new_class("BSIT 2A", "OTHER"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_list_all_orders_by_name() {
        let (repo, _dir) = repo().await;

        repo.insert(new_class("C", "c")).await.unwrap();
        repo.insert(new_class("A", "a")).await.unwrap();
        repo.insert(new_class("B", "b")).await.unwrap();

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_save_overwrites_members() {
        let (repo, _dir) = repo().await;

        let mut class = repo.insert(new_class("BSIT 2A", "BSIT-2A")).await.unwrap();
        class.members = Some(vec![Member::new(&class.id, "Ana", None)]);
        class.system_url = Some("https://example.com".to_string());
        repo.save(&class).await.unwrap();

        let stored = repo.find_by_id(&class.id).await.unwrap().unwrap();
        let members = stored.members.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Ana");
        assert_eq!(stored.system_url.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_null_member_column_reads_as_none() {
        let (repo, _dir) = repo().await;

        let class = repo.insert(new_class("BSIT 2A", "BSIT-2A")).await.unwrap();
        sqlx::query("UPDATE classes SET members = NULL WHERE id = ?")
            .bind(&class.id)
            .execute(&repo.pool)
            .await
            .unwrap();

        let stored = repo.find_by_id(&class.id).await.unwrap().unwrap();
        assert!(stored.members.is_none());
    }

    #[tokio::test]
    async fn test_save_missing_class_is_not_found() {
        let (repo, _dir) = repo().await;

        let mut class = repo.insert(new_class("BSIT 2A", "BSIT-2A")).await.unwrap();
        assert!(repo.delete_by_id(&class.id).await.unwrap());

        class.system_url = Some("https://example.com".to_string());
        let err = repo.save(&class).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_reports_affected() {
        let (repo, _dir) = repo().await;

        let class = repo.insert(new_class("BSIT 2A", "BSIT-2A")).await.unwrap();
        assert!(repo.delete_by_id(&class.id).await.unwrap());
        assert!(!repo.delete_by_id(&class.id).await.unwrap());
        assert!(repo.find_by_id(&class.id).await.unwrap().is_none());
    }
}
