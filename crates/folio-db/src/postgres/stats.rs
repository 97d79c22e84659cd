use folio_core::{models::GalleryStats, AppError};
use sqlx::{PgPool, Postgres};

/// Aggregate queries for the admin dashboard
#[derive(Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.operation = "aggregate"))]
    pub async fn compute(&self) -> Result<GalleryStats, AppError> {
        let (total_photos, total_sections, total_views, unread_messages) =
            sqlx::query_as::<Postgres, (i64, i64, i64, i64)>(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM photos),
                    (SELECT COUNT(*) FROM sections),
                    (SELECT COALESCE(SUM(views), 0)::BIGINT FROM photos),
                    (SELECT COUNT(*) FROM contact_messages WHERE is_read = FALSE)
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(GalleryStats {
            total_photos,
            total_sections,
            total_views,
            unread_messages,
        })
    }
}
