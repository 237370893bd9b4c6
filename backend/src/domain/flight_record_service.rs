use anyhow::Result;
use shared::{CrewDetail, DeleteResponse, FlightRecord, FlightRecordDetail, FlightRecordPayload, GalleyDetail};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

use crate::db::{self, DbConnection};
use crate::error::ApiError;
use crate::validate::Validate;

const RECORD_COLUMNS: &str = "id, loading_index_doc, weight_report_doc, report_date, \
     aircraft_reg, empty_weight, empty_weight_index, dow_domestic, doi_domestic, \
     dow_international, doi_international";

/// CRUD for the parent flight-record entity, plus assembly of the full
/// report aggregate (parent + galley + crew lines) for the detail view.
#[derive(Clone)]
pub struct FlightRecordService {
    db: DbConnection,
}

impl FlightRecordService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// All record summaries, most recently created first.
    pub async fn list(&self) -> Result<Vec<FlightRecord>, ApiError> {
        info!("Listing flight records");

        let sql = format!("SELECT {RECORD_COLUMNS} FROM flight_records ORDER BY id DESC");
        let rows = sqlx::query(&sql).fetch_all(self.db.pool()).await?;

        let records = rows
            .iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>>>()?;

        info!("Found {} flight records", records.len());
        Ok(records)
    }

    pub async fn create(&self, payload: FlightRecordPayload) -> Result<FlightRecord, ApiError> {
        let record = payload.validate()?;
        info!("Creating flight record: loading_index_doc={}", record.loading_index_doc);

        let sql = format!(
            "INSERT INTO flight_records (
                loading_index_doc, weight_report_doc, report_date, aircraft_reg,
                empty_weight, empty_weight_index, dow_domestic, doi_domestic,
                dow_international, doi_international
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {RECORD_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&record.loading_index_doc)
            .bind(&record.weight_report_doc)
            .bind(&record.report_date)
            .bind(&record.aircraft_reg)
            .bind(record.empty_weight)
            .bind(record.empty_weight_index)
            .bind(record.dow_domestic)
            .bind(record.doi_domestic)
            .bind(record.dow_international)
            .bind(record.doi_international)
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| {
                duplicate_doc(e, "A report with this Loading Index Doc already exists.")
            })?;

        let created = record_from_row(&row)?;
        info!("Created flight record with ID {}", created.id);
        Ok(created)
    }

    /// Fetch the full aggregate: the parent row and both child
    /// collections, children ordered by their own id ascending.
    pub async fn get(&self, id: i64) -> Result<FlightRecordDetail, ApiError> {
        info!("Fetching flight record {}", id);

        let sql = format!("SELECT {RECORD_COLUMNS} FROM flight_records WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| ApiError::NotFound("Flight Record not found.".to_string()))?;
        let record = record_from_row(&row)?;

        let galley_rows = sqlx::query(
            "SELECT id, galley_no, arm_m, domestic_weight_kg, domestic_index,
                    international_weight_kg, international_index
             FROM galley_details WHERE flight_record_id = ? ORDER BY id",
        )
        .bind(id)
        .fetch_all(self.db.pool())
        .await?;
        let galley_details = galley_rows
            .iter()
            .map(galley_item)
            .collect::<Result<Vec<_>>>()?;

        let crew_rows = sqlx::query(
            r#"SELECT id, description, qty, arm_m, weight_kg, "index"
               FROM crew_details WHERE flight_record_id = ? ORDER BY id"#,
        )
        .bind(id)
        .fetch_all(self.db.pool())
        .await?;
        let crew_details = crew_rows.iter().map(crew_item).collect::<Result<Vec<_>>>()?;

        Ok(FlightRecordDetail {
            id: record.id,
            loading_index_doc: record.loading_index_doc,
            weight_report_doc: record.weight_report_doc,
            report_date: record.report_date,
            aircraft_reg: record.aircraft_reg,
            empty_weight: record.empty_weight,
            empty_weight_index: record.empty_weight_index,
            dow_domestic: record.dow_domestic,
            doi_domestic: record.doi_domestic,
            dow_international: record.dow_international,
            doi_international: record.doi_international,
            galley_details,
            crew_details,
        })
    }

    /// Update every mutable parent field. Children are untouched.
    pub async fn update(
        &self,
        id: i64,
        payload: FlightRecordPayload,
    ) -> Result<FlightRecord, ApiError> {
        let record = payload.validate()?;
        info!("Updating flight record {}", id);

        let sql = format!(
            "UPDATE flight_records SET
                loading_index_doc = ?, weight_report_doc = ?, report_date = ?,
                aircraft_reg = ?, empty_weight = ?, empty_weight_index = ?,
                dow_domestic = ?, doi_domestic = ?, dow_international = ?,
                doi_international = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            RETURNING {RECORD_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&record.loading_index_doc)
            .bind(&record.weight_report_doc)
            .bind(&record.report_date)
            .bind(&record.aircraft_reg)
            .bind(record.empty_weight)
            .bind(record.empty_weight_index)
            .bind(record.dow_domestic)
            .bind(record.doi_domestic)
            .bind(record.dow_international)
            .bind(record.doi_international)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| {
                duplicate_doc(e, "Another report with this Loading Index Doc already exists.")
            })?
            .ok_or_else(|| ApiError::NotFound("Flight Record not found for update.".to_string()))?;

        Ok(record_from_row(&row)?)
    }

    /// Delete the parent row; the foreign-key cascade removes its
    /// galley and crew children in the same statement.
    pub async fn delete(&self, id: i64) -> Result<DeleteResponse, ApiError> {
        info!("Deleting flight record {}", id);

        let row = sqlx::query("DELETE FROM flight_records WHERE id = ? RETURNING id")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(_) => Ok(DeleteResponse {
                message: format!("Flight Record with ID {id} deleted successfully."),
            }),
            None => Err(ApiError::NotFound(
                "Flight Record not found for deletion.".to_string(),
            )),
        }
    }
}

fn duplicate_doc(err: sqlx::Error, message: &str) -> ApiError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ApiError::DuplicateKey(message.to_string())
        }
        _ => ApiError::from(err),
    }
}

fn record_from_row(row: &SqliteRow) -> Result<FlightRecord> {
    Ok(FlightRecord {
        id: db::integer_column(row, "id")?,
        loading_index_doc: row.try_get("loading_index_doc")?,
        weight_report_doc: row.try_get("weight_report_doc")?,
        report_date: row.try_get("report_date")?,
        aircraft_reg: row.try_get("aircraft_reg")?,
        empty_weight: db::numeric_column(row, "empty_weight")?,
        empty_weight_index: db::numeric_column(row, "empty_weight_index")?,
        dow_domestic: db::numeric_column(row, "dow_domestic")?,
        doi_domestic: db::numeric_column(row, "doi_domestic")?,
        dow_international: db::numeric_column(row, "dow_international")?,
        doi_international: db::numeric_column(row, "doi_international")?,
    })
}

fn galley_item(row: &SqliteRow) -> Result<GalleyDetail> {
    Ok(GalleyDetail {
        id: db::integer_column(row, "id")?,
        flight_record_id: None,
        galley_no: row.try_get("galley_no")?,
        arm_m: db::numeric_column(row, "arm_m")?,
        domestic_weight_kg: db::numeric_column(row, "domestic_weight_kg")?,
        domestic_index: db::numeric_column(row, "domestic_index")?,
        international_weight_kg: db::numeric_column(row, "international_weight_kg")?,
        international_index: db::numeric_column(row, "international_index")?,
        created_at: None,
        updated_at: None,
    })
}

fn crew_item(row: &SqliteRow) -> Result<CrewDetail> {
    Ok(CrewDetail {
        id: db::integer_column(row, "id")?,
        flight_record_id: None,
        description: row.try_get("description")?,
        qty: db::integer_column(row, "qty")?,
        arm_m: db::numeric_column(row, "arm_m")?,
        weight_kg: db::numeric_column(row, "weight_kg")?,
        index: db::numeric_column(row, "index")?,
        created_at: None,
        updated_at: None,
    })
}
