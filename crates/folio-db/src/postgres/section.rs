use folio_core::{
    models::{CreateSectionRequest, Section, UpdateSectionRequest},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::map_write_error;

const SECTION_COLUMNS: &str =
    "id, name, slug, description, is_active, display_order, created_at, updated_at";

/// Repository for managing sections
#[derive(Clone)]
pub struct SectionRepository {
    pool: PgPool,
}

impl SectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "sections", db.operation = "select"))]
    pub async fn list(&self) -> Result<Vec<Section>, AppError> {
        let sql = format!(
            "SELECT {} FROM sections ORDER BY display_order ASC, name ASC",
            SECTION_COLUMNS
        );
        let sections = sqlx::query_as::<Postgres, Section>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(sections)
    }

    #[tracing::instrument(skip(self), fields(db.table = "sections", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Section>, AppError> {
        let sql = format!("SELECT {} FROM sections WHERE id = $1", SECTION_COLUMNS);
        let section = sqlx::query_as::<Postgres, Section>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(section)
    }

    #[tracing::instrument(skip(self), fields(db.table = "sections", db.operation = "select"))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Section>, AppError> {
        let sql = format!("SELECT {} FROM sections WHERE slug = $1", SECTION_COLUMNS);
        let section = sqlx::query_as::<Postgres, Section>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(section)
    }

    #[tracing::instrument(skip(self, request), fields(db.table = "sections", db.operation = "insert", slug = %request.slug))]
    pub async fn create(&self, request: &CreateSectionRequest) -> Result<Section, AppError> {
        let sql = format!(
            r#"
            INSERT INTO sections (name, slug, description, is_active, display_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            SECTION_COLUMNS
        );
        sqlx::query_as::<Postgres, Section>(&sql)
            .bind(&request.name)
            .bind(&request.slug)
            .bind(&request.description)
            .bind(request.is_active)
            .bind(request.display_order)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| slug_taken(e, &request.slug))
    }

    /// Apply the fields present in `request`; `None` when the id is unknown.
    #[tracing::instrument(skip(self, request), fields(db.table = "sections", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateSectionRequest,
    ) -> Result<Option<Section>, AppError> {
        if request.is_empty() {
            return self.get(id).await;
        }

        let mut sets = Vec::new();
        let mut param_count = 1;

        if request.name.is_some() {
            sets.push(format!("name = ${}", param_count));
            param_count += 1;
        }
        if request.slug.is_some() {
            sets.push(format!("slug = ${}", param_count));
            param_count += 1;
        }
        if request.description.is_some() {
            sets.push(format!("description = ${}", param_count));
            param_count += 1;
        }
        if request.is_active.is_some() {
            sets.push(format!("is_active = ${}", param_count));
            param_count += 1;
        }
        if request.display_order.is_some() {
            sets.push(format!("display_order = ${}", param_count));
            param_count += 1;
        }
        sets.push("updated_at = NOW()".to_string());

        let sql = format!(
            "UPDATE sections SET {} WHERE id = ${} RETURNING {}",
            sets.join(", "),
            param_count,
            SECTION_COLUMNS
        );

        // Bind in the same order the placeholders were numbered
        let mut query = sqlx::query_as::<Postgres, Section>(&sql);
        if let Some(name) = &request.name {
            query = query.bind(name);
        }
        if let Some(slug) = &request.slug {
            query = query.bind(slug);
        }
        if let Some(description) = &request.description {
            query = query.bind(description);
        }
        if let Some(is_active) = request.is_active {
            query = query.bind(is_active);
        }
        if let Some(display_order) = request.display_order {
            query = query.bind(display_order);
        }

        query
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| slug_taken(e, request.slug.as_deref().unwrap_or_default()))
    }

    /// Photos in the section are detached by `ON DELETE SET NULL`.
    #[tracing::instrument(skip(self), fields(db.table = "sections", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn slug_taken(err: sqlx::Error, slug: &str) -> AppError {
    map_write_error(
        err,
        &format!("A section with slug '{}' already exists", slug),
        "Referenced record does not exist",
    )
}
