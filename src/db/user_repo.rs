// src/db/user_repo.rs

use sqlx::SqlitePool;

use crate::{common::error::AppError, models::user::User};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

// Converte violação de chave única em um erro mais amigável
fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::UserAlreadyExists;
        }
    }
    AppError::Database(e)
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Cria a tabela se ainda não existir. Não há migrações.
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email    TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT id, username, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT id, username, email FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn create_user(&self, username: &str, email: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email) VALUES (?, ?) RETURNING id, username, email",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)
    }

    /// Atualiza só os campos informados; `None` quando o usuário não existe.
    pub async fn update_user(
        &self,
        id: i64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = COALESCE(?, username),
                email    = COALESCE(?, email)
            WHERE id = ?
            RETURNING id, username, email
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)
    }

    /// Devolve `true` se alguma linha foi removida.
    pub async fn delete_user(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repo() -> UserRepository {
        // Uma conexão só: cada conexão `:memory:` teria o seu próprio banco.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let repo = UserRepository::new(pool);
        repo.ensure_schema().await.unwrap();
        repo
    }

    #[tokio::test]
    async fn crud_round_trip() {
        let repo = repo().await;

        let ana = repo.create_user("ana", "ana@example.com").await.unwrap();
        assert_eq!(ana.username, "ana");
        assert_eq!(repo.find_by_id(ana.id).await.unwrap(), Some(ana.clone()));

        let updated = repo
            .update_user(ana.id, None, Some("ana@crm.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.username, "ana");
        assert_eq!(updated.email, "ana@crm.com");

        assert_eq!(repo.list_users().await.unwrap().len(), 1);
        assert!(repo.delete_user(ana.id).await.unwrap());
        assert!(!repo.delete_user(ana.id).await.unwrap());
        assert!(repo.find_by_id(ana.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repo = repo().await;
        repo.create_user("ana", "ana@example.com").await.unwrap();

        let err = repo.create_user("ana", "otra@example.com").await.unwrap_err();
        assert!(matches!(err, AppError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn update_of_missing_user_returns_none() {
        let repo = repo().await;
        assert!(repo.update_user(99, Some("x"), None).await.unwrap().is_none());
    }
}
