use anyhow::Result;
use shared::{CreateGalleyDetailPayload, DeleteResponse, GalleyDetail, UpdateGalleyDetailPayload};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

use crate::db::{self, DbConnection};
use crate::error::ApiError;
use crate::validate::Validate;

const GALLEY_COLUMNS: &str = "id, flight_record_id, galley_no, arm_m, domestic_weight_kg, \
     domestic_index, international_weight_kg, international_index, created_at, updated_at";

/// CRUD for galley line items. A line always belongs to exactly one
/// flight record; whether that record exists at create time is left to
/// the foreign-key constraint.
#[derive(Clone)]
pub struct GalleyDetailService {
    db: DbConnection,
}

impl GalleyDetailService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, payload: CreateGalleyDetailPayload) -> Result<GalleyDetail, ApiError> {
        let detail = payload.validate()?;
        info!(
            "Creating galley detail {} for flight record {}",
            detail.galley_no, detail.flight_record_id
        );

        let sql = format!(
            "INSERT INTO galley_details (
                flight_record_id, galley_no, arm_m, domestic_weight_kg,
                domestic_index, international_weight_kg, international_index
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {GALLEY_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(detail.flight_record_id)
            .bind(&detail.galley_no)
            .bind(detail.arm_m)
            .bind(detail.domestic_weight_kg)
            .bind(detail.domestic_index)
            .bind(detail.international_weight_kg)
            .bind(detail.international_index)
            .fetch_one(self.db.pool())
            .await?;

        Ok(galley_from_row(&row)?)
    }

    /// Update by the child's own id. The owning record link does not change.
    pub async fn update(
        &self,
        id: i64,
        payload: UpdateGalleyDetailPayload,
    ) -> Result<GalleyDetail, ApiError> {
        let detail = payload.validate()?;
        info!("Updating galley detail {}", id);

        let sql = format!(
            "UPDATE galley_details SET
                galley_no = ?, arm_m = ?, domestic_weight_kg = ?, domestic_index = ?,
                international_weight_kg = ?, international_index = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING {GALLEY_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&detail.galley_no)
            .bind(detail.arm_m)
            .bind(detail.domestic_weight_kg)
            .bind(detail.domestic_index)
            .bind(detail.international_weight_kg)
            .bind(detail.international_index)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| ApiError::NotFound("Galley Detail not found for update.".to_string()))?;

        Ok(galley_from_row(&row)?)
    }

    pub async fn delete(&self, id: i64) -> Result<DeleteResponse, ApiError> {
        info!("Deleting galley detail {}", id);

        let row = sqlx::query("DELETE FROM galley_details WHERE id = ? RETURNING id")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(_) => Ok(DeleteResponse {
                message: format!("Galley Detail with ID {id} deleted successfully."),
            }),
            None => Err(ApiError::NotFound(
                "Galley Detail not found for deletion.".to_string(),
            )),
        }
    }
}

fn galley_from_row(row: &SqliteRow) -> Result<GalleyDetail> {
    Ok(GalleyDetail {
        id: db::integer_column(row, "id")?,
        flight_record_id: Some(db::integer_column(row, "flight_record_id")?),
        galley_no: row.try_get("galley_no")?,
        arm_m: db::numeric_column(row, "arm_m")?,
        domestic_weight_kg: db::numeric_column(row, "domestic_weight_kg")?,
        domestic_index: db::numeric_column(row, "domestic_index")?,
        international_weight_kg: db::numeric_column(row, "international_weight_kg")?,
        international_index: db::numeric_column(row, "international_index")?,
        created_at: Some(row.try_get("created_at")?),
        updated_at: Some(row.try_get("updated_at")?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlightRecordService;
    use shared::FlightRecordPayload;

    async fn setup_test() -> (FlightRecordService, GalleyDetailService) {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        (
            FlightRecordService::new(db.clone()),
            GalleyDetailService::new(db),
        )
    }

    async fn create_record(records: &FlightRecordService, doc: &str) -> i64 {
        let payload = FlightRecordPayload {
            loading_index_doc: Some(doc.to_string()),
            weight_report_doc: Some("WR1".to_string()),
            report_date: Some("2024-01-01".to_string()),
            aircraft_reg: None,
            empty_weight: Some(0.0),
            empty_weight_index: Some(0.0),
            dow_domestic: Some(0.0),
            doi_domestic: Some(0.0),
            dow_international: Some(0.0),
            doi_international: Some(0.0),
        };
        records.create(payload).await.unwrap().id
    }

    fn galley_payload(flight_record_id: i64) -> CreateGalleyDetailPayload {
        CreateGalleyDetailPayload {
            flight_record_id: Some(flight_record_id),
            galley_no: Some("G1".to_string()),
            arm_m: Some(20.0),
            domestic_weight_kg: Some(100.0),
            domestic_index: Some(0.23),
            international_weight_kg: Some(50.0),
            international_index: Some(0.12),
        }
    }

    #[tokio::test]
    async fn test_create_returns_stored_row() {
        let (records, galley) = setup_test().await;
        let record_id = create_record(&records, "DOC-G1").await;

        let created = galley.create(galley_payload(record_id)).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.flight_record_id, Some(record_id));
        assert_eq!(created.galley_no, "G1");
        // The stored index is exactly what the client sent, not the formula result.
        assert_eq!(created.domestic_index, 0.23);
        assert!(created.created_at.is_some());
        assert!(created.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_create_with_unknown_parent_is_internal() {
        let (_records, galley) = setup_test().await;
        let err = galley.create(galley_payload(999)).await.unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn test_create_validation() {
        let (records, galley) = setup_test().await;
        let record_id = create_record(&records, "DOC-G2").await;

        let mut missing_no = galley_payload(record_id);
        missing_no.galley_no = Some("".to_string());
        assert!(matches!(
            galley.create(missing_no).await.unwrap_err(),
            ApiError::Validation(_)
        ));

        let mut bad_arm = galley_payload(record_id);
        bad_arm.arm_m = Some(f64::NAN);
        assert!(matches!(
            galley.create(bad_arm).await.unwrap_err(),
            ApiError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_update_detail() {
        let (records, galley) = setup_test().await;
        let record_id = create_record(&records, "DOC-G3").await;
        let created = galley.create(galley_payload(record_id)).await.unwrap();

        let updated = galley
            .update(
                created.id,
                UpdateGalleyDetailPayload {
                    galley_no: Some("G2".to_string()),
                    arm_m: Some(21.5),
                    domestic_weight_kg: Some(120.0),
                    domestic_index: Some(0.32),
                    international_weight_kg: Some(60.0),
                    international_index: Some(0.16),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.flight_record_id, Some(record_id));
        assert_eq!(updated.galley_no, "G2");
        assert_eq!(updated.arm_m, 21.5);
    }

    #[tokio::test]
    async fn test_update_missing_detail() {
        let (_records, galley) = setup_test().await;
        let err = galley
            .update(
                999,
                UpdateGalleyDetailPayload {
                    galley_no: Some("G9".to_string()),
                    arm_m: Some(20.0),
                    domestic_weight_kg: Some(0.0),
                    domestic_index: Some(0.0),
                    international_weight_kg: Some(0.0),
                    international_index: Some(0.0),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_detail() {
        let (records, galley) = setup_test().await;
        let record_id = create_record(&records, "DOC-G4").await;
        let created = galley.create(galley_payload(record_id)).await.unwrap();

        let response = galley.delete(created.id).await.unwrap();
        assert!(response.message.contains(&created.id.to_string()));

        assert!(matches!(
            galley.delete(created.id).await.unwrap_err(),
            ApiError::NotFound(_)
        ));
    }
}
