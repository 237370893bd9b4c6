use serde::{Deserialize, Serialize};

pub mod balance;
pub mod session;

/// Summary view of one weight-and-balance report, as returned by the
/// list endpoint (children excluded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub id: i64,
    /// Business identifier of the loading index document, unique across all records
    pub loading_index_doc: String,
    pub weight_report_doc: String,
    /// Report date as "YYYY-MM-DD"
    pub report_date: String,
    /// Aircraft registration; optional on the entry form
    pub aircraft_reg: Option<String>,
    pub empty_weight: f64,
    pub empty_weight_index: f64,
    pub dow_domestic: f64,
    pub doi_domestic: f64,
    pub dow_international: f64,
    pub doi_international: f64,
}

/// Full aggregate for the report detail view: the parent record plus
/// all of its galley and crew line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecordDetail {
    pub id: i64,
    pub loading_index_doc: String,
    pub weight_report_doc: String,
    pub report_date: String,
    pub aircraft_reg: Option<String>,
    pub empty_weight: f64,
    pub empty_weight_index: f64,
    pub dow_domestic: f64,
    pub doi_domestic: f64,
    pub dow_international: f64,
    pub doi_international: f64,
    pub galley_details: Vec<GalleyDetail>,
    pub crew_details: Vec<CrewDetail>,
}

/// One galley (pax-convenience) line item owned by a flight record.
///
/// `flight_record_id` and the timestamps are present on rows returned
/// by the create/update endpoints and omitted inside the aggregate,
/// matching the wire shapes of the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleyDetail {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_record_id: Option<i64>,
    pub galley_no: String,
    /// Moment arm in meters
    pub arm_m: f64,
    pub domestic_weight_kg: f64,
    pub domestic_index: f64,
    pub international_weight_kg: f64,
    pub international_index: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// One crew-and-luggage line item owned by a flight record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewDetail {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_record_id: Option<i64>,
    pub description: String,
    /// Head count for this line
    pub qty: i64,
    pub arm_m: f64,
    pub weight_kg: f64,
    pub index: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request body for creating or updating a flight record.
///
/// Every field is optional at the serde level so that an absent field
/// reaches the validator and comes back as a named `missing field`
/// error instead of an opaque deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecordPayload {
    pub loading_index_doc: Option<String>,
    pub weight_report_doc: Option<String>,
    pub report_date: Option<String>,
    pub aircraft_reg: Option<String>,
    pub empty_weight: Option<f64>,
    pub empty_weight_index: Option<f64>,
    pub dow_domestic: Option<f64>,
    pub doi_domestic: Option<f64>,
    pub dow_international: Option<f64>,
    pub doi_international: Option<f64>,
}

/// Request body for creating a galley detail line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGalleyDetailPayload {
    pub flight_record_id: Option<i64>,
    pub galley_no: Option<String>,
    pub arm_m: Option<f64>,
    pub domestic_weight_kg: Option<f64>,
    pub domestic_index: Option<f64>,
    pub international_weight_kg: Option<f64>,
    pub international_index: Option<f64>,
}

/// Request body for updating a galley detail line. The owning record
/// link is deliberately not updatable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateGalleyDetailPayload {
    pub galley_no: Option<String>,
    pub arm_m: Option<f64>,
    pub domestic_weight_kg: Option<f64>,
    pub domestic_index: Option<f64>,
    pub international_weight_kg: Option<f64>,
    pub international_index: Option<f64>,
}

/// Request body for creating a crew detail line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCrewDetailPayload {
    pub flight_record_id: Option<i64>,
    pub description: Option<String>,
    pub qty: Option<i64>,
    pub arm_m: Option<f64>,
    pub weight_kg: Option<f64>,
    pub index: Option<f64>,
}

/// Request body for updating a crew detail line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCrewDetailPayload {
    pub description: Option<String>,
    pub qty: Option<i64>,
    pub arm_m: Option<f64>,
    pub weight_kg: Option<f64>,
    pub index: Option<f64>,
}

/// Error body returned by every failing endpoint:
/// `{ "message": "...", "error": "..."? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Success body for delete operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_omits_child_bookkeeping_fields() {
        let detail = GalleyDetail {
            id: 1,
            flight_record_id: None,
            galley_no: "G1".to_string(),
            arm_m: 20.0,
            domestic_weight_kg: 100.0,
            domestic_index: 0.12,
            international_weight_kg: 50.0,
            international_index: 0.06,
            created_at: None,
            updated_at: None,
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("flight_record_id").is_none());
        assert!(json.get("created_at").is_none());
        assert_eq!(json["galley_no"], "G1");
    }

    #[test]
    fn created_row_carries_owner_and_timestamps() {
        let detail = CrewDetail {
            id: 7,
            flight_record_id: Some(3),
            description: "Cockpit crew".to_string(),
            qty: 2,
            arm_m: 5.1,
            weight_kg: 170.0,
            index: -2.34,
            created_at: Some("2024-01-01 10:00:00".to_string()),
            updated_at: Some("2024-01-01 10:00:00".to_string()),
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["flight_record_id"], 3);
        assert_eq!(json["index"], -2.34);
        assert!(json.get("created_at").is_some());
    }

    #[test]
    fn payload_tolerates_missing_fields() {
        // An empty body must deserialize; the validator reports what is missing.
        let payload: FlightRecordPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.loading_index_doc.is_none());
        assert!(payload.empty_weight.is_none());
    }

    #[test]
    fn error_body_omits_detail_when_absent() {
        let body = ErrorBody {
            message: "Flight Record not found.".to_string(),
            error: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"message":"Flight Record not found."}"#);
    }
}
