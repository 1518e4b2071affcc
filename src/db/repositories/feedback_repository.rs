use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::models::Feedback;
use crate::db::DatabaseError;

use super::FeedbackStore;

pub struct PgFeedbackRepository {
    pool: PgPool,
}

impl PgFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackRepository {
    async fn upsert(&self, feedback: &Feedback) -> Result<(), DatabaseError> {
        // The feedback id is derived from the report id, so a resubmission
        // overwrites the earlier record instead of appending history.
        sqlx::query(
            r#"
            INSERT INTO feedback (
                feedback_id, report_id, user_id, user_name, report_title, report_status,
                rating, comments, feedback_type, timestamp, is_acknowledged, requires_follow_up
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (feedback_id) DO UPDATE SET
                user_name = EXCLUDED.user_name,
                report_title = EXCLUDED.report_title,
                report_status = EXCLUDED.report_status,
                rating = EXCLUDED.rating,
                comments = EXCLUDED.comments,
                feedback_type = EXCLUDED.feedback_type,
                timestamp = EXCLUDED.timestamp,
                is_acknowledged = EXCLUDED.is_acknowledged,
                requires_follow_up = EXCLUDED.requires_follow_up
            "#,
        )
        .bind(&feedback.feedback_id)
        .bind(&feedback.report_id)
        .bind(&feedback.user_id)
        .bind(&feedback.user_name)
        .bind(&feedback.report_title)
        .bind(feedback.report_status)
        .bind(feedback.rating)
        .bind(&feedback.comments)
        .bind(feedback.feedback_type)
        .bind(feedback.timestamp)
        .bind(feedback.is_acknowledged)
        .bind(feedback.requires_follow_up)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_report(&self, report_id: &str) -> Result<Option<Feedback>, DatabaseError> {
        let feedback = sqlx::query_as::<_, Feedback>("SELECT * FROM feedback WHERE report_id = $1")
            .bind(report_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(feedback)
    }

    async fn list_all(&self) -> Result<Vec<Feedback>, DatabaseError> {
        let feedback =
            sqlx::query_as::<_, Feedback>("SELECT * FROM feedback ORDER BY timestamp DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(feedback)
    }
}
