//! Usage records for instruments and rooms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{json_object, not_blank};

/// Record of an operator using an instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InstrumentUsageRecord {
    pub id: i32,
    #[schema(example = "SEQ-001")]
    pub instrument_code: String,
    #[schema(example = "sequencing")]
    pub instrument: String,
    #[schema(example = "normal")]
    pub instrument_status: String,
    #[schema(example = "Niu Bo")]
    pub operator_name: String,
    #[schema(value_type = Object)]
    pub details: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Instrument usage submission
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewInstrumentUsageRecord {
    #[validate(
        length(max = 255, message = "instrument_code must be at most 255 characters"),
        custom(function = "not_blank", message = "instrument_code must not be blank")
    )]
    #[schema(example = "SEQ-001", max_length = 255)]
    pub instrument_code: String,
    #[validate(
        length(max = 255, message = "instrument must be at most 255 characters"),
        custom(function = "not_blank", message = "instrument must not be blank")
    )]
    #[schema(example = "sequencing", max_length = 255)]
    pub instrument: String,
    #[validate(
        length(max = 255, message = "instrument_status must be at most 255 characters"),
        custom(function = "not_blank", message = "instrument_status must not be blank")
    )]
    #[schema(example = "normal", max_length = 255)]
    pub instrument_status: String,
    #[validate(
        length(
            min = 2,
            max = 100,
            message = "operator_name must be between 2 and 100 characters"
        ),
        custom(function = "not_blank", message = "operator_name must not be blank")
    )]
    #[schema(example = "Niu Bo", min_length = 2, max_length = 100)]
    pub operator_name: String,
    #[serde(default = "empty_details")]
    #[validate(custom(function = "json_object"))]
    #[schema(value_type = Object)]
    pub details: Value,
}

/// Record of an operator entering or leaving a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoomUsageRecord {
    pub id: i32,
    pub room_id: i32,
    pub operator_id: i32,
    #[schema(example = "enter")]
    pub room_status: String,
    #[schema(example = "daily")]
    pub operation_type: String,
    #[schema(value_type = Object)]
    pub details: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Room usage submission
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewRoomUsageRecord {
    #[schema(example = 1)]
    pub room_id: i32,
    #[schema(example = 1)]
    pub operator_id: i32,
    #[validate(
        length(max = 255, message = "room_status must be at most 255 characters"),
        custom(function = "not_blank", message = "room_status must not be blank")
    )]
    #[schema(example = "enter", max_length = 255)]
    pub room_status: String,
    #[validate(
        length(max = 255, message = "operation_type must be at most 255 characters"),
        custom(function = "not_blank", message = "operation_type must not be blank")
    )]
    #[schema(example = "daily", max_length = 255)]
    pub operation_type: String,
    #[serde(default = "empty_details")]
    #[validate(custom(function = "json_object"))]
    #[schema(value_type = Object)]
    pub details: Value,
}

fn empty_details() -> Value {
    Value::Object(Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_details_default_to_empty_object() {
        let record: NewRoomUsageRecord = serde_json::from_value(json!({
            "room_id": 1,
            "operator_id": 2,
            "room_status": "enter",
            "operation_type": "daily"
        }))
        .unwrap();
        assert_eq!(record.details, json!({}));
    }

    fn instrument_record(operator_name: &str) -> NewInstrumentUsageRecord {
        NewInstrumentUsageRecord {
            instrument_code: "SEQ-001".to_string(),
            instrument: "sequencing".to_string(),
            instrument_status: "normal".to_string(),
            operator_name: operator_name.to_string(),
            details: json!({}),
        }
    }

    #[test]
    fn test_operator_name_length_bounds() {
        assert!(instrument_record("Niu Bo").validate().is_ok());
        assert!(instrument_record("Bo").validate().is_ok());
        assert!(instrument_record("A").validate().is_err());
        assert!(instrument_record(&"x".repeat(101)).validate().is_err());
        assert!(instrument_record(&"x".repeat(5000)).validate().is_err());
    }

    #[test]
    fn test_details_must_be_object() {
        let mut record = instrument_record("Niu Bo");
        record.details = json!(["A"]);
        let errors = record.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("details"));
    }

    #[test]
    fn test_blank_room_status_rejected() {
        let record = NewRoomUsageRecord {
            room_id: 1,
            operator_id: 2,
            room_status: "  ".to_string(),
            operation_type: "daily".to_string(),
            details: json!({}),
        };
        assert!(record.validate().is_err());
    }
}
