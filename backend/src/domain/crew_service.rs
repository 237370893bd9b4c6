use anyhow::Result;
use shared::{CreateCrewDetailPayload, CrewDetail, DeleteResponse, UpdateCrewDetailPayload};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

use crate::db::{self, DbConnection};
use crate::error::ApiError;
use crate::validate::Validate;

// "index" stays quoted; it is a SQLite keyword.
const CREW_COLUMNS: &str = "id, flight_record_id, description, qty, arm_m, weight_kg, \
     \"index\", created_at, updated_at";

/// CRUD for crew-and-luggage line items, same contract shape as the
/// galley service.
#[derive(Clone)]
pub struct CrewDetailService {
    db: DbConnection,
}

impl CrewDetailService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, payload: CreateCrewDetailPayload) -> Result<CrewDetail, ApiError> {
        let detail = payload.validate()?;
        info!(
            "Creating crew detail '{}' for flight record {}",
            detail.description, detail.flight_record_id
        );

        let sql = format!(
            "INSERT INTO crew_details (
                flight_record_id, description, qty, arm_m, weight_kg, \"index\"
            ) VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {CREW_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(detail.flight_record_id)
            .bind(&detail.description)
            .bind(detail.qty)
            .bind(detail.arm_m)
            .bind(detail.weight_kg)
            .bind(detail.index)
            .fetch_one(self.db.pool())
            .await?;

        Ok(crew_from_row(&row)?)
    }

    pub async fn update(
        &self,
        id: i64,
        payload: UpdateCrewDetailPayload,
    ) -> Result<CrewDetail, ApiError> {
        let detail = payload.validate()?;
        info!("Updating crew detail {}", id);

        let sql = format!(
            "UPDATE crew_details SET
                description = ?, qty = ?, arm_m = ?, weight_kg = ?, \"index\" = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING {CREW_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&detail.description)
            .bind(detail.qty)
            .bind(detail.arm_m)
            .bind(detail.weight_kg)
            .bind(detail.index)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| ApiError::NotFound("Crew Detail not found for update.".to_string()))?;

        Ok(crew_from_row(&row)?)
    }

    pub async fn delete(&self, id: i64) -> Result<DeleteResponse, ApiError> {
        info!("Deleting crew detail {}", id);

        let row = sqlx::query("DELETE FROM crew_details WHERE id = ? RETURNING id")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(_) => Ok(DeleteResponse {
                message: format!("Crew Detail with ID {id} deleted successfully."),
            }),
            None => Err(ApiError::NotFound(
                "Crew Detail not found for deletion.".to_string(),
            )),
        }
    }
}

fn crew_from_row(row: &SqliteRow) -> Result<CrewDetail> {
    Ok(CrewDetail {
        id: db::integer_column(row, "id")?,
        flight_record_id: Some(db::integer_column(row, "flight_record_id")?),
        description: row.try_get("description")?,
        qty: db::integer_column(row, "qty")?,
        arm_m: db::numeric_column(row, "arm_m")?,
        weight_kg: db::numeric_column(row, "weight_kg")?,
        index: db::numeric_column(row, "index")?,
        created_at: Some(row.try_get("created_at")?),
        updated_at: Some(row.try_get("updated_at")?),
    })
}
