use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::models::{MaintenanceReport, ReportStatus, StatusChange};
use crate::db::DatabaseError;

use super::ReportStore;

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportRepository {
    async fn insert(&self, report: &MaintenanceReport) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO reports (
                report_id, reporter_id, reporter_name, building_block, room_number,
                category, description, status, timestamp, assigned_technician_id,
                assigned_technician_name, completed_timestamp, technician_notes,
                estimated_completion, image_url, report_latitude, report_longitude
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(&report.report_id)
        .bind(&report.reporter_id)
        .bind(&report.reporter_name)
        .bind(&report.building_block)
        .bind(&report.room_number)
        .bind(report.category)
        .bind(&report.description)
        .bind(report.status)
        .bind(report.timestamp)
        .bind(&report.assigned_technician_id)
        .bind(&report.assigned_technician_name)
        .bind(report.completed_timestamp)
        .bind(&report.technician_notes)
        .bind(&report.estimated_completion)
        .bind(&report.image_url)
        .bind(report.report_latitude)
        .bind(report.report_longitude)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, report_id: &str) -> Result<Option<MaintenanceReport>, DatabaseError> {
        let report =
            sqlx::query_as::<_, MaintenanceReport>("SELECT * FROM reports WHERE report_id = $1")
                .bind(report_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(report)
    }

    async fn list_all(&self) -> Result<Vec<MaintenanceReport>, DatabaseError> {
        let reports =
            sqlx::query_as::<_, MaintenanceReport>("SELECT * FROM reports ORDER BY timestamp DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(reports)
    }

    async fn list_by_status(
        &self,
        status: ReportStatus,
    ) -> Result<Vec<MaintenanceReport>, DatabaseError> {
        let reports = sqlx::query_as::<_, MaintenanceReport>(
            "SELECT * FROM reports WHERE status = $1 ORDER BY timestamp DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(reports)
    }

    async fn list_by_reporter(
        &self,
        reporter_id: &str,
    ) -> Result<Vec<MaintenanceReport>, DatabaseError> {
        let reports = sqlx::query_as::<_, MaintenanceReport>(
            "SELECT * FROM reports WHERE reporter_id = $1 ORDER BY timestamp DESC",
        )
        .bind(reporter_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reports)
    }

    async fn list_by_technician(
        &self,
        technician_id: &str,
    ) -> Result<Vec<MaintenanceReport>, DatabaseError> {
        let reports = sqlx::query_as::<_, MaintenanceReport>(
            "SELECT * FROM reports WHERE assigned_technician_id = $1 ORDER BY timestamp DESC",
        )
        .bind(technician_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reports)
    }

    async fn assign(
        &self,
        report_id: &str,
        technician_id: &str,
        technician_name: &str,
    ) -> Result<(), DatabaseError> {
        // Last write wins on the whole record; there is no version token.
        let result = sqlx::query(
            r#"
            UPDATE reports
            SET status = $2, assigned_technician_id = $3, assigned_technician_name = $4
            WHERE report_id = $1
            "#,
        )
        .bind(report_id)
        .bind(ReportStatus::Assigned)
        .bind(technician_id)
        .bind(technician_name)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }

    async fn apply_status_update(
        &self,
        report_id: &str,
        status: ReportStatus,
        notes: Option<&str>,
        estimated_completion: Option<&str>,
        technician_id: &str,
        technician_name: &str,
        completed_timestamp: Option<i64>,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE reports
            SET status = $2,
                technician_notes = $3,
                estimated_completion = COALESCE($4, estimated_completion),
                assigned_technician_id = COALESCE(assigned_technician_id, $5),
                assigned_technician_name = COALESCE(assigned_technician_name, $6),
                completed_timestamp = COALESCE($7, completed_timestamp)
            WHERE report_id = $1
            "#,
        )
        .bind(report_id)
        .bind(status)
        .bind(notes)
        .bind(estimated_completion)
        .bind(technician_id)
        .bind(technician_name)
        .bind(completed_timestamp)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }

    async fn append_history(
        &self,
        report_id: &str,
        change: &StatusChange,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO report_status_history (report_id, status, timestamp, changed_by, notes)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(report_id)
        .bind(change.status)
        .bind(change.timestamp)
        .bind(&change.changed_by)
        .bind(&change.notes)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn history(&self, report_id: &str) -> Result<Vec<StatusChange>, DatabaseError> {
        let entries = sqlx::query_as::<_, StatusChange>(
            r#"
            SELECT status, timestamp, changed_by, notes
            FROM report_status_history
            WHERE report_id = $1
            ORDER BY id
            "#,
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn delete(&self, report_id: &str) -> Result<(), DatabaseError> {
        // No cascade: feedback and notifications referencing the report
        // remain behind.
        let result = sqlx::query("DELETE FROM reports WHERE report_id = $1")
            .bind(report_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }
}
