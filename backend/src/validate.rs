//! Presence and numeric checks for incoming payloads.
//!
//! Each request payload type validates into a concrete `Valid*` struct
//! whose fields are no longer optional, so the services never touch an
//! unchecked value. The rules are deliberately shallow: required fields
//! must be present (non-empty after trimming for strings), numeric
//! fields must be finite. No range checks, no cross-field checks;
//! uniqueness belongs to the database constraint.

use shared::{
    CreateCrewDetailPayload, CreateGalleyDetailPayload, FlightRecordPayload,
    UpdateCrewDetailPayload, UpdateGalleyDetailPayload,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` is not a valid number")]
    NotNumeric(&'static str),
    /// The request body never deserialized into the payload type, e.g.
    /// text in a numeric field or malformed JSON.
    #[error("{0}")]
    InvalidBody(String),
}

/// Turn a raw payload into its validated counterpart.
pub trait Validate {
    type Valid;

    fn validate(self) -> Result<Self::Valid, ValidationError>;
}

fn required_str(name: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ValidationError::MissingField(name)),
    }
}

fn required_f64(name: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField(name)),
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(ValidationError::NotNumeric(name)),
    }
}

fn required_i64(name: &'static str, value: Option<i64>) -> Result<i64, ValidationError> {
    value.ok_or(ValidationError::MissingField(name))
}

/// The owning record id on a child create. The entry forms send 0 when
/// the field never got filled in, so non-positive counts as missing.
fn required_parent_id(name: &'static str, value: Option<i64>) -> Result<i64, ValidationError> {
    match value {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::MissingField(name)),
    }
}

/// An optional string, with an empty form value normalized to absent.
fn optional_str(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Debug)]
pub struct ValidFlightRecord {
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
}

impl Validate for FlightRecordPayload {
    type Valid = ValidFlightRecord;

    fn validate(self) -> Result<ValidFlightRecord, ValidationError> {
        Ok(ValidFlightRecord {
            loading_index_doc: required_str("loading_index_doc", self.loading_index_doc)?,
            weight_report_doc: required_str("weight_report_doc", self.weight_report_doc)?,
            report_date: required_str("report_date", self.report_date)?,
            aircraft_reg: optional_str(self.aircraft_reg),
            empty_weight: required_f64("empty_weight", self.empty_weight)?,
            empty_weight_index: required_f64("empty_weight_index", self.empty_weight_index)?,
            dow_domestic: required_f64("dow_domestic", self.dow_domestic)?,
            doi_domestic: required_f64("doi_domestic", self.doi_domestic)?,
            dow_international: required_f64("dow_international", self.dow_international)?,
            doi_international: required_f64("doi_international", self.doi_international)?,
        })
    }
}

#[derive(Debug)]
pub struct ValidGalleyDetail {
    pub flight_record_id: i64,
    pub galley_no: String,
    pub arm_m: f64,
    pub domestic_weight_kg: f64,
    pub domestic_index: f64,
    pub international_weight_kg: f64,
    pub international_index: f64,
}

impl Validate for CreateGalleyDetailPayload {
    type Valid = ValidGalleyDetail;

    fn validate(self) -> Result<ValidGalleyDetail, ValidationError> {
        Ok(ValidGalleyDetail {
            flight_record_id: required_parent_id("flight_record_id", self.flight_record_id)?,
            galley_no: required_str("galley_no", self.galley_no)?,
            arm_m: required_f64("arm_m", self.arm_m)?,
            domestic_weight_kg: required_f64("domestic_weight_kg", self.domestic_weight_kg)?,
            domestic_index: required_f64("domestic_index", self.domestic_index)?,
            international_weight_kg: required_f64(
                "international_weight_kg",
                self.international_weight_kg,
            )?,
            international_index: required_f64("international_index", self.international_index)?,
        })
    }
}

#[derive(Debug)]
pub struct ValidGalleyDetailUpdate {
    pub galley_no: String,
    pub arm_m: f64,
    pub domestic_weight_kg: f64,
    pub domestic_index: f64,
    pub international_weight_kg: f64,
    pub international_index: f64,
}

impl Validate for UpdateGalleyDetailPayload {
    type Valid = ValidGalleyDetailUpdate;

    fn validate(self) -> Result<ValidGalleyDetailUpdate, ValidationError> {
        Ok(ValidGalleyDetailUpdate {
            galley_no: required_str("galley_no", self.galley_no)?,
            arm_m: required_f64("arm_m", self.arm_m)?,
            domestic_weight_kg: required_f64("domestic_weight_kg", self.domestic_weight_kg)?,
            domestic_index: required_f64("domestic_index", self.domestic_index)?,
            international_weight_kg: required_f64(
                "international_weight_kg",
                self.international_weight_kg,
            )?,
            international_index: required_f64("international_index", self.international_index)?,
        })
    }
}

#[derive(Debug)]
pub struct ValidCrewDetail {
    pub flight_record_id: i64,
    pub description: String,
    pub qty: i64,
    pub arm_m: f64,
    pub weight_kg: f64,
    pub index: f64,
}

impl Validate for CreateCrewDetailPayload {
    type Valid = ValidCrewDetail;

    fn validate(self) -> Result<ValidCrewDetail, ValidationError> {
        Ok(ValidCrewDetail {
            flight_record_id: required_parent_id("flight_record_id", self.flight_record_id)?,
            description: required_str("description", self.description)?,
            qty: required_i64("qty", self.qty)?,
            arm_m: required_f64("arm_m", self.arm_m)?,
            weight_kg: required_f64("weight_kg", self.weight_kg)?,
            index: required_f64("index", self.index)?,
        })
    }
}

#[derive(Debug)]
pub struct ValidCrewDetailUpdate {
    pub description: String,
    pub qty: i64,
    pub arm_m: f64,
    pub weight_kg: f64,
    pub index: f64,
}

impl Validate for UpdateCrewDetailPayload {
    type Valid = ValidCrewDetailUpdate;

    fn validate(self) -> Result<ValidCrewDetailUpdate, ValidationError> {
        Ok(ValidCrewDetailUpdate {
            description: required_str("description", self.description)?,
            qty: required_i64("qty", self.qty)?,
            arm_m: required_f64("arm_m", self.arm_m)?,
            weight_kg: required_f64("weight_kg", self.weight_kg)?,
            index: required_f64("index", self.index)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight_record_payload() -> FlightRecordPayload {
        FlightRecordPayload {
            loading_index_doc: Some("DOC1".to_string()),
            weight_report_doc: Some("WR1".to_string()),
            report_date: Some("2024-01-01".to_string()),
            aircraft_reg: Some("PK-ABC".to_string()),
            empty_weight: Some(41820.0),
            empty_weight_index: Some(52.3),
            dow_domestic: Some(43050.0),
            doi_domestic: Some(51.1),
            dow_international: Some(43210.0),
            doi_international: Some(50.8),
        }
    }

    #[test]
    fn valid_flight_record_passes() {
        let valid = flight_record_payload().validate().unwrap();
        assert_eq!(valid.loading_index_doc, "DOC1");
        assert_eq!(valid.aircraft_reg.as_deref(), Some("PK-ABC"));
        assert_eq!(valid.empty_weight, 41820.0);
    }

    #[test]
    fn missing_string_field_is_reported_by_name() {
        let mut payload = flight_record_payload();
        payload.weight_report_doc = None;
        assert_eq!(
            payload.validate().unwrap_err(),
            ValidationError::MissingField("weight_report_doc")
        );

        let mut payload = flight_record_payload();
        payload.loading_index_doc = Some("   ".to_string());
        assert_eq!(
            payload.validate().unwrap_err(),
            ValidationError::MissingField("loading_index_doc")
        );
    }

    #[test]
    fn missing_numeric_field_is_reported_by_name() {
        let mut payload = flight_record_payload();
        payload.doi_international = None;
        assert_eq!(
            payload.validate().unwrap_err(),
            ValidationError::MissingField("doi_international")
        );
    }

    #[test]
    fn non_finite_numeric_field_is_rejected() {
        let mut payload = flight_record_payload();
        payload.dow_domestic = Some(f64::NAN);
        assert_eq!(
            payload.validate().unwrap_err(),
            ValidationError::NotNumeric("dow_domestic")
        );

        let mut payload = flight_record_payload();
        payload.empty_weight_index = Some(f64::INFINITY);
        assert_eq!(
            payload.validate().unwrap_err(),
            ValidationError::NotNumeric("empty_weight_index")
        );
    }

    #[test]
    fn empty_aircraft_reg_normalizes_to_none() {
        let mut payload = flight_record_payload();
        payload.aircraft_reg = Some("".to_string());
        assert_eq!(payload.validate().unwrap().aircraft_reg, None);

        let mut payload = flight_record_payload();
        payload.aircraft_reg = None;
        assert_eq!(payload.validate().unwrap().aircraft_reg, None);
    }

    #[test]
    fn galley_create_requires_owner() {
        let payload = CreateGalleyDetailPayload {
            flight_record_id: None,
            galley_no: Some("G1".to_string()),
            arm_m: Some(20.0),
            domestic_weight_kg: Some(100.0),
            domestic_index: Some(0.12),
            international_weight_kg: Some(50.0),
            international_index: Some(0.06),
        };
        assert_eq!(
            payload.clone().validate().unwrap_err(),
            ValidationError::MissingField("flight_record_id")
        );

        // Zero means "never filled in" on the form.
        let zero_owner = CreateGalleyDetailPayload {
            flight_record_id: Some(0),
            ..payload
        };
        assert_eq!(
            zero_owner.validate().unwrap_err(),
            ValidationError::MissingField("flight_record_id")
        );
    }

    #[test]
    fn crew_update_checks_every_field() {
        let payload = UpdateCrewDetailPayload {
            description: Some("Cabin crew".to_string()),
            qty: Some(4),
            arm_m: Some(22.0),
            weight_kg: Some(300.0),
            index: Some(0.95),
        };
        assert!(payload.clone().validate().is_ok());

        let missing_qty = UpdateCrewDetailPayload {
            qty: None,
            ..payload.clone()
        };
        assert_eq!(
            missing_qty.validate().unwrap_err(),
            ValidationError::MissingField("qty")
        );

        let bad_weight = UpdateCrewDetailPayload {
            weight_kg: Some(f64::NAN),
            ..payload
        };
        assert_eq!(
            bad_weight.validate().unwrap_err(),
            ValidationError::NotNumeric("weight_kg")
        );
    }
}
