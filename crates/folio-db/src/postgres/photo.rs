use folio_core::{
    models::{NewPhoto, Photo, PhotoChanges, PhotoFilter},
    AppError,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use super::map_write_error;

const PHOTO_COLUMNS: &str = "id, title, description, filename, original_filename, mime_type, \
     file_size, width, height, section_id, tags, is_published, display_order, views, \
     created_at, updated_at";

const MISSING_SECTION: &str = "Section does not exist";

/// Repository for managing photo records
#[derive(Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "select"))]
    pub async fn list(&self, filter: &PhotoFilter) -> Result<Vec<Photo>, AppError> {
        let columns = PHOTO_COLUMNS
            .split(", ")
            .map(|c| format!("p.{}", c.trim()))
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!("SELECT {} FROM photos p", columns);
        if filter.section_slug.is_some() {
            sql.push_str(" JOIN sections s ON s.id = p.section_id AND s.slug = $1");
        }
        sql.push_str(" WHERE 1=1");
        if filter.published_only {
            sql.push_str(" AND p.is_published = TRUE");
        }
        sql.push_str(" ORDER BY p.display_order ASC, p.created_at DESC");

        let mut query = sqlx::query_as::<Postgres, Photo>(&sql);
        if let Some(slug) = &filter.section_slug {
            query = query.bind(slug);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Photo>, AppError> {
        let sql = format!("SELECT {} FROM photos WHERE id = $1", PHOTO_COLUMNS);
        let photo = sqlx::query_as::<Postgres, Photo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(photo)
    }

    #[tracing::instrument(skip(self, photo), fields(db.table = "photos", db.operation = "insert", filename = %photo.filename))]
    pub async fn create(&self, photo: &NewPhoto) -> Result<Photo, AppError> {
        let sql = format!(
            r#"
            INSERT INTO photos (
                title, description, filename, original_filename, mime_type, file_size,
                width, height, section_id, tags, is_published, display_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            PHOTO_COLUMNS
        );

        sqlx::query_as::<Postgres, Photo>(&sql)
            .bind(&photo.title)
            .bind(&photo.description)
            .bind(&photo.filename)
            .bind(&photo.original_filename)
            .bind(&photo.mime_type)
            .bind(photo.file_size)
            .bind(photo.width)
            .bind(photo.height)
            .bind(photo.section_id)
            .bind(&photo.tags)
            .bind(photo.is_published)
            .bind(photo.display_order)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "A photo with this filename already exists", MISSING_SECTION))
    }

    #[tracing::instrument(skip(self, changes), fields(db.table = "photos", db.operation = "update", db.record_id = %id))]
    pub async fn update(&self, id: Uuid, changes: &PhotoChanges) -> Result<Option<Photo>, AppError> {
        if changes.is_empty() {
            return self.get(id).await;
        }

        let mut sets = Vec::new();
        let mut param_count = 1;

        if changes.title.is_some() {
            sets.push(format!("title = ${}", param_count));
            param_count += 1;
        }
        if changes.description.is_some() {
            sets.push(format!("description = ${}", param_count));
            param_count += 1;
        }
        if changes.section_id.is_some() {
            sets.push(format!("section_id = ${}", param_count));
            param_count += 1;
        }
        if changes.tags.is_some() {
            sets.push(format!("tags = ${}", param_count));
            param_count += 1;
        }
        if changes.is_published.is_some() {
            sets.push(format!("is_published = ${}", param_count));
            param_count += 1;
        }
        if changes.display_order.is_some() {
            sets.push(format!("display_order = ${}", param_count));
            param_count += 1;
        }
        sets.push("updated_at = NOW()".to_string());

        let sql = format!(
            "UPDATE photos SET {} WHERE id = ${} RETURNING {}",
            sets.join(", "),
            param_count,
            PHOTO_COLUMNS
        );

        let mut query = sqlx::query_as::<Postgres, Photo>(&sql);
        if let Some(title) = &changes.title {
            query = query.bind(title);
        }
        if let Some(description) = &changes.description {
            query = query.bind(description);
        }
        if let Some(section_id) = changes.section_id {
            query = query.bind(section_id);
        }
        if let Some(tags) = &changes.tags {
            query = query.bind(tags);
        }
        if let Some(is_published) = changes.is_published {
            query = query.bind(is_published);
        }
        if let Some(display_order) = changes.display_order {
            query = query.bind(display_order);
        }

        query
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Photo update conflicts with an existing record", MISSING_SECTION))
    }

    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "delete", db.record_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Single-statement increment, so concurrent views never lose updates.
    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "update", db.record_id = %id))]
    pub async fn increment_views(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE photos SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
