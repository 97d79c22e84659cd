use folio_core::{
    models::{ContactMessage, CreateContactMessageRequest},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const MESSAGE_COLUMNS: &str =
    "id, first_name, last_name, email, phone, service, message, is_read, created_at";

/// Repository for contact form submissions
#[derive(Clone)]
pub struct ContactMessageRepository {
    pool: PgPool,
}

impl ContactMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, request), fields(db.table = "contact_messages", db.operation = "insert"))]
    pub async fn create(
        &self,
        request: &CreateContactMessageRequest,
    ) -> Result<ContactMessage, AppError> {
        let sql = format!(
            r#"
            INSERT INTO contact_messages (first_name, last_name, email, phone, service, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            MESSAGE_COLUMNS
        );
        let message = sqlx::query_as::<Postgres, ContactMessage>(&sql)
            .bind(&request.first_name)
            .bind(&request.last_name)
            .bind(&request.email)
            .bind(&request.phone)
            .bind(&request.service)
            .bind(&request.message)
            .fetch_one(&self.pool)
            .await?;

        Ok(message)
    }

    #[tracing::instrument(skip(self), fields(db.table = "contact_messages", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<ContactMessage>, AppError> {
        let sql = format!(
            "SELECT {} FROM contact_messages ORDER BY created_at DESC",
            MESSAGE_COLUMNS
        );
        let messages = sqlx::query_as::<Postgres, ContactMessage>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(messages)
    }

    #[tracing::instrument(skip(self), fields(db.table = "contact_messages", db.operation = "update", db.record_id = %id))]
    pub async fn mark_read(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE contact_messages SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
